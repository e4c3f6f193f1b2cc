//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Subtally - See what your subscriptions really cost
#[derive(Parser)]
#[command(name = "subtally")]
#[command(about = "Subscription cost tracker: annual totals, price alerts, forecasts", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Settings file (defaults to the data dir override, then built-in defaults)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by commands that read a subscription file
#[derive(Args, Debug, Clone)]
pub struct DataArgs {
    /// Subscriptions JSON file (array, or object with a "subscriptions" key)
    #[arg(short, long)]
    pub file: PathBuf,

    /// Target currency (defaults to the configured default_currency)
    #[arg(short, long)]
    pub currency: Option<String>,

    /// Rates JSON file, replacing the configured rate table
    #[arg(long)]
    pub rates: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Total annual cost of all subscriptions
    Annual {
        #[command(flatten)]
        data: DataArgs,

        /// List subscriptions left out of the total and why
        #[arg(long)]
        report: bool,
    },

    /// Total monthly-equivalent cost of all subscriptions
    Monthly {
        #[command(flatten)]
        data: DataArgs,
    },

    /// Scan each subscription's payment history for price increases
    Alerts {
        /// Subscriptions JSON file
        #[arg(short, long)]
        file: PathBuf,

        /// Minimum percentage increase (defaults to price_alert_threshold)
        #[arg(short, long)]
        threshold: Option<f64>,
    },

    /// Compare two prices directly
    CheckPrice {
        /// Previous price
        #[arg(long)]
        previous: f64,

        /// New price
        #[arg(long)]
        new: f64,

        /// Minimum percentage increase (defaults to price_alert_threshold)
        #[arg(short, long)]
        threshold: Option<f64>,
    },

    /// Validate raw payments and print them in canonical form
    Normalize {
        /// Payments JSON file (array, or object with a "payments" key)
        #[arg(short, long)]
        file: PathBuf,

        /// Write JSON to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Forecast renewals between two dates
    Forecast {
        #[command(flatten)]
        data: DataArgs,

        /// Start date (YYYY-MM-DD, default: today)
        #[arg(long)]
        from: Option<String>,

        /// End date (YYYY-MM-DD, default: 90 days after start)
        #[arg(long)]
        to: Option<String>,
    },

    /// Amounts spent and still due this month and year
    Budget {
        #[command(flatten)]
        data: DataArgs,

        /// Reference date (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<String>,
    },

    /// Payment health and forgotten subscriptions
    Health {
        /// Subscriptions JSON file
        #[arg(short, long)]
        file: PathBuf,

        /// Reference date (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<String>,

        /// Days without payment before a subscription counts as forgotten
        #[arg(long)]
        forgotten_days: Option<i64>,
    },

    /// Export subscriptions to CSV
    Export {
        /// Subscriptions JSON file
        #[arg(short, long)]
        file: PathBuf,

        /// Export kind: subscriptions, payments, annual
        #[arg(short, long, default_value = "subscriptions")]
        kind: String,

        /// Output file (default: conventional name for the kind)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
