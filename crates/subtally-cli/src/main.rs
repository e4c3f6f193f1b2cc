//! Subtally CLI - Subscription cost tracker
//!
//! Usage:
//!   subtally annual --file subs.json          Annualized total in the default currency
//!   subtally alerts --file subs.json          Price increases in payment history
//!   subtally normalize --file payments.json   Validate and canonicalize payments
//!   subtally forecast --file subs.json        Upcoming renewals

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let settings = commands::load_settings(cli.config.as_deref())?;

    match cli.command {
        Commands::Annual { data, report } => commands::cmd_annual(&settings, &data, report),
        Commands::Monthly { data } => commands::cmd_monthly(&settings, &data),
        Commands::Alerts { file, threshold } => commands::cmd_alerts(&settings, &file, threshold),
        Commands::CheckPrice {
            previous,
            new,
            threshold,
        } => commands::cmd_check_price(&settings, previous, new, threshold),
        Commands::Normalize { file, output } => commands::cmd_normalize(&file, output.as_deref()),
        Commands::Forecast { data, from, to } => {
            commands::cmd_forecast(&settings, &data, from.as_deref(), to.as_deref())
        }
        Commands::Budget { data, date } => commands::cmd_budget(&settings, &data, date.as_deref()),
        Commands::Health {
            file,
            date,
            forgotten_days,
        } => commands::cmd_health(&settings, &file, date.as_deref(), forgotten_days),
        Commands::Export { file, kind, output } => {
            commands::cmd_export(&file, &kind, output.as_deref())
        }
    }
}
