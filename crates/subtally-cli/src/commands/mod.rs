//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `costs` - Annual and monthly totals
//! - `alerts` - Price increase detection
//! - `payments` - Payment normalization
//! - `planning` - Forecast, budget and health
//! - `export` - CSV export

pub mod alerts;
pub mod costs;
pub mod export;
pub mod payments;
pub mod planning;

// Re-export command functions for main.rs
pub use alerts::*;
pub use costs::*;
pub use export::*;
pub use payments::*;
pub use planning::*;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use subtally_core::config::Settings;
use subtally_core::load::{parse_rates, parse_subscriptions};
use subtally_core::{RateTable, Subscription};
use tracing::debug;

use crate::cli::DataArgs;

/// Load settings from `--config`, the data dir override, or built-in defaults
pub fn load_settings(path: Option<&Path>) -> Result<Settings> {
    Settings::load(path).context("Failed to load settings")
}

/// Read a subscriptions JSON file
pub fn load_subscriptions(path: &Path) -> Result<Vec<Subscription>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open subscriptions file: {}", path.display()))?;
    let subs = parse_subscriptions(BufReader::new(file))
        .with_context(|| format!("Failed to parse subscriptions file: {}", path.display()))?;
    debug!("Loaded {} subscriptions from {}", subs.len(), path.display());
    Ok(subs)
}

/// Rates from `--rates` if given, otherwise the configured table
pub fn resolve_rates(settings: &Settings, rates_path: Option<&Path>) -> Result<RateTable> {
    match rates_path {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open rates file: {}", path.display()))?;
            parse_rates(BufReader::new(file))
                .with_context(|| format!("Failed to parse rates file: {}", path.display()))
        }
        None => Ok(settings.rates.clone()),
    }
}

/// Everything a data command needs: subscriptions, currency and rates
pub struct Loaded {
    pub subscriptions: Vec<Subscription>,
    pub currency: String,
    pub rates: RateTable,
}

pub fn load_data(settings: &Settings, data: &DataArgs) -> Result<Loaded> {
    let currency = data
        .currency
        .as_deref()
        .map(|c| c.trim().to_uppercase())
        .unwrap_or_else(|| settings.default_currency.clone());

    let rates = resolve_rates(settings, data.rates.as_deref())?;
    if !rates.is_empty() && rates.rate(&currency).is_none() {
        tracing::warn!(
            "No rate for {} in rate table; amounts will not be converted",
            currency
        );
    }

    Ok(Loaded {
        subscriptions: load_subscriptions(&data.file)?,
        currency,
        rates,
    })
}

/// Parse an optional YYYY-MM-DD argument, defaulting to today
pub fn parse_date_arg(value: Option<&str>, flag: &str) -> Result<NaiveDate> {
    value
        .map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .transpose()
        .with_context(|| format!("Invalid {} date format (use YYYY-MM-DD)", flag))
        .map(|d| d.unwrap_or_else(|| Utc::now().date_naive()))
}

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
