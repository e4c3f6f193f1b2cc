//! Spend forecasting over a date window
//!
//! Walks each subscription's renewals forward from its last paid date and
//! sums the charges that fall inside the window.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

use crate::currency::RateTable;
use crate::models::Subscription;
use crate::renewal::{next_renewal, next_renewal_from_dates};

/// Category used for subscriptions without one
pub const UNCATEGORIZED: &str = "other";

/// Forecast total and per-category breakdown, in the target currency
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendForecast {
    pub total: f64,
    pub by_category: BTreeMap<String, f64>,
    /// Number of renewals that fell inside the window
    pub charges: usize,
}

/// Forecast spend for renewals in `[from, to]`.
///
/// Subscriptions without a parseable `date_paid` or with no price are left
/// out. The first counted renewal is the one after `date_paid`.
pub fn forecast_spend<F>(
    subscriptions: &[Subscription],
    from: NaiveDate,
    to: NaiveDate,
    currency: &str,
    rates: Option<&RateTable>,
    convert: F,
) -> SpendForecast
where
    F: Fn(f64, &str, &str, Option<&RateTable>) -> f64,
{
    let mut forecast = SpendForecast::default();

    for sub in subscriptions {
        let Some(price) = sub.price.filter(|p| *p != 0.0) else {
            continue;
        };
        let frequency = sub.frequency.as_deref();
        let Some(first) = next_renewal_from_dates(sub.date_paid.as_deref(), frequency) else {
            continue;
        };

        let amount = convert(price, sub.currency_or_default(), currency, rates);
        let category = sub.category.as_deref().unwrap_or(UNCATEGORIZED);

        let mut next = Some(first);
        while let Some(date) = next.filter(|d| *d <= to) {
            if date >= from {
                forecast.total += amount;
                *forecast.by_category.entry(category.to_string()).or_default() += amount;
                forecast.charges += 1;
            }
            next = next_renewal(date, frequency);
        }
    }

    debug!(
        "Forecast {} to {}: {} charges, {:.2} {}",
        from, to, forecast.charges, forecast.total, currency
    );

    forecast
}
