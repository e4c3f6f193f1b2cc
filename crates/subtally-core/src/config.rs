//! Settings for the subtally tools
//!
//! ## Configuration Resolution
//!
//! Settings are loaded with a three-layer resolution:
//! 1. An explicit path, if given and it exists
//! 2. Override in data dir (~/.local/share/subtally/config/settings.toml)
//! 3. Embedded defaults (compiled into binary)

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::alerts::DEFAULT_THRESHOLD_PERCENT;
use crate::currency::RateTable;
use crate::error::{Error, Result};
use crate::models::DEFAULT_CURRENCY;

/// Embedded default settings (compiled into binary)
const DEFAULT_SETTINGS: &str = include_str!("../config/settings.toml");

/// Resolved settings
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Currency totals are reported in
    pub default_currency: String,
    /// Inclusive percentage threshold for price alerts
    pub price_alert_threshold: f64,
    /// Days without payment before a subscription counts as forgotten
    pub forgotten_after_days: i64,
    pub rates: RateTable,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_currency: DEFAULT_CURRENCY.to_string(),
            price_alert_threshold: DEFAULT_THRESHOLD_PERCENT,
            forgotten_after_days: 30,
            rates: RateTable::new(),
        }
    }
}

impl Settings {
    /// Load settings (explicit path, then data dir override, then embedded)
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let candidates = path
            .map(Path::to_path_buf)
            .into_iter()
            .chain(default_settings_path());

        for candidate in candidates {
            if candidate.exists() {
                debug!("Loading settings from {}", candidate.display());
                let content = fs::read_to_string(&candidate).map_err(|e| {
                    Error::Config(format!("Failed to read {}: {}", candidate.display(), e))
                })?;
                return parse_settings(&content);
            }
        }

        debug!("Using embedded default settings");
        parse_settings(DEFAULT_SETTINGS)
    }

    /// Embedded defaults only
    pub fn embedded() -> Result<Self> {
        parse_settings(DEFAULT_SETTINGS)
    }
}

/// Get the default settings override path
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("subtally").join("config").join("settings.toml"))
}

/// Raw settings structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawSettings {
    default_currency: Option<String>,
    price_alert_threshold: Option<f64>,
    forgotten_after_days: Option<i64>,
    rates: Option<RateTable>,
}

/// Parse settings from TOML content
pub fn parse_settings(content: &str) -> Result<Settings> {
    let raw: RawSettings = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid settings TOML: {}", e)))?;

    let mut settings = Settings::default();

    if let Some(currency) = raw.default_currency.filter(|c| !c.trim().is_empty()) {
        settings.default_currency = currency.trim().to_uppercase();
    }

    if let Some(threshold) = raw.price_alert_threshold {
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(Error::Config(format!(
                "price_alert_threshold must be a non-negative number, got {}",
                threshold
            )));
        }
        settings.price_alert_threshold = threshold;
    }

    if let Some(days) = raw.forgotten_after_days {
        if days < 0 {
            return Err(Error::Config(format!(
                "forgotten_after_days must not be negative, got {}",
                days
            )));
        }
        settings.forgotten_after_days = days;
    }

    if let Some(rates) = raw.rates {
        if let Some((code, rate)) = rates.iter().find(|(_, r)| !r.is_finite()) {
            return Err(Error::Config(format!("Rate for {} is not finite: {}", code, rate)));
        }
        settings.rates = rates;
    }

    Ok(settings)
}
