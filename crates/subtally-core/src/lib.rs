//! Subtally Core Library
//!
//! Calculation pipeline for recurring-payment tracking:
//! - Currency conversion over a caller-supplied rate table
//! - Frequency multiplier tables (annual occurrences, monthly factor)
//! - Annual and monthly cost aggregation
//! - Payment normalization with an injected id generator
//! - Price increase detection
//! - Renewal dates, forecasts and month/year budget figures
//! - JSON input parsing, CSV exports and TOML settings
//!
//! Every calculation is a pure function of its inputs. Rates, subscriptions
//! and payments are supplied by the caller; nothing is persisted here.

pub mod alerts;
pub mod annual;
pub mod budget;
pub mod config;
pub mod currency;
pub mod error;
pub mod export;
pub mod forecast;
pub mod frequency;
pub mod load;
pub mod models;
pub mod payments;
pub mod renewal;

pub use alerts::{detect_price_increase, price_history_alerts, PriceCheck};
pub use annual::{
    calculate_annual_cost, calculate_annual_cost_with_report, calculate_monthly_cost,
    AnnualCostReport, SkipReason,
};
pub use budget::{budget_summary, BudgetPeriod, BudgetSummary};
pub use config::Settings;
pub use currency::{convert, RateTable};
pub use error::{Error, Result};
pub use export::{export_csv, ExportKind};
pub use forecast::{forecast_spend, SpendForecast};
pub use frequency::{ANNUAL_OCCURRENCES, MONTHLY_FACTOR};
pub use models::{
    DatedPriceAlert, Frequency, Payment, PriceAlert, RawPayment, Subscription, DEFAULT_CURRENCY,
};
pub use payments::{normalize_payment, normalized_payments, IdGenerator, UuidGenerator};
pub use renewal::{forgotten_subscriptions, subscription_health, HealthStatus};
