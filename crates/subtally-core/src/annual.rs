//! Annualized and monthly-equivalent cost aggregation
//!
//! Sums a subscription list into one total in a target currency. Malformed
//! entries (no positive price, no frequency, or a frequency without a table
//! entry) contribute nothing. The plain functions drop them silently;
//! [`calculate_annual_cost_with_report`] also lists what was skipped.
//!
//! The currency converter is injected so callers can supply
//! [`crate::currency::convert`] or any stub with the same shape.

use serde::Serialize;
use tracing::debug;

use crate::currency::RateTable;
use crate::frequency::{annual_occurrences, monthly_factor};
use crate::models::Subscription;

/// Why an entry was excluded from a total
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "reason", content = "token")]
pub enum SkipReason {
    /// Price missing, non-numeric, zero or negative
    InvalidPrice,
    MissingFrequency,
    /// Frequency token with no entry in the multiplier table
    UnsupportedFrequency(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedSubscription {
    /// Position in the input list
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub reason: SkipReason,
}

/// Annual total plus the entries that did not contribute to it
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnnualCostReport {
    pub total: f64,
    pub skipped: Vec<SkippedSubscription>,
}

/// Total annual cost of `subscriptions` in `target_currency`.
///
/// Each valid entry contributes `convert(price) * occurrences_per_year`.
pub fn calculate_annual_cost<F>(
    subscriptions: &[Subscription],
    target_currency: &str,
    rates: Option<&RateTable>,
    convert: F,
) -> f64
where
    F: Fn(f64, &str, &str, Option<&RateTable>) -> f64,
{
    subscriptions
        .iter()
        .filter_map(|sub| scaled_cost(sub, target_currency, rates, &convert, annual_occurrences).ok())
        .sum()
}

/// Same total as [`calculate_annual_cost`], with the skipped entries listed
pub fn calculate_annual_cost_with_report<F>(
    subscriptions: &[Subscription],
    target_currency: &str,
    rates: Option<&RateTable>,
    convert: F,
) -> AnnualCostReport
where
    F: Fn(f64, &str, &str, Option<&RateTable>) -> f64,
{
    let mut report = AnnualCostReport::default();

    for (index, sub) in subscriptions.iter().enumerate() {
        match scaled_cost(sub, target_currency, rates, &convert, annual_occurrences) {
            Ok(cost) => report.total += cost,
            Err(reason) => report.skipped.push(SkippedSubscription {
                index,
                name: sub.name.clone(),
                reason,
            }),
        }
    }

    debug!(
        "Annual cost {:.2} {} from {} subscriptions ({} skipped)",
        report.total,
        target_currency,
        subscriptions.len() - report.skipped.len(),
        report.skipped.len()
    );

    report
}

/// Total monthly-equivalent cost of `subscriptions` in `target_currency`.
///
/// Uses the monthly-factor table, so every known frequency contributes,
/// including semiannual, nine_months, biennial and triennial.
pub fn calculate_monthly_cost<F>(
    subscriptions: &[Subscription],
    target_currency: &str,
    rates: Option<&RateTable>,
    convert: F,
) -> f64
where
    F: Fn(f64, &str, &str, Option<&RateTable>) -> f64,
{
    subscriptions
        .iter()
        .filter_map(|sub| scaled_cost(sub, target_currency, rates, &convert, monthly_factor).ok())
        .sum()
}

/// Annual cost of a single subscription in its own currency
pub fn annual_cost_of(sub: &Subscription) -> Option<f64> {
    let price = valid_price(sub).ok()?;
    let occurrences = sub.frequency.as_deref().and_then(annual_occurrences)?;
    Some(price * occurrences)
}

/// Round to two decimals for display totals
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn valid_price(sub: &Subscription) -> Result<f64, SkipReason> {
    sub.price
        .filter(|p| p.is_finite() && *p > 0.0)
        .ok_or(SkipReason::InvalidPrice)
}

fn scaled_cost<F>(
    sub: &Subscription,
    target_currency: &str,
    rates: Option<&RateTable>,
    convert: &F,
    multiplier: fn(&str) -> Option<f64>,
) -> Result<f64, SkipReason>
where
    F: Fn(f64, &str, &str, Option<&RateTable>) -> f64,
{
    let price = valid_price(sub)?;
    let token = sub
        .frequency
        .as_deref()
        .filter(|f| !f.is_empty())
        .ok_or(SkipReason::MissingFrequency)?;

    let converted = convert(price, sub.currency.as_deref().unwrap_or(""), target_currency, rates);

    let factor =
        multiplier(token).ok_or_else(|| SkipReason::UnsupportedFrequency(token.to_string()))?;
    Ok(converted * factor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::convert;

    fn eur() -> RateTable {
        [("EUR", 1.0)].into_iter().collect()
    }

    fn identity(amount: f64, _: &str, _: &str, _: Option<&RateTable>) -> f64 {
        amount
    }

    #[test]
    fn test_single_monthly_subscription() {
        let subs = vec![Subscription::new(10.0, "EUR", "monthly")];
        assert_eq!(calculate_annual_cost(&subs, "EUR", Some(&eur()), convert), 120.0);
    }

    #[test]
    fn test_every_supported_frequency() {
        let subs = vec![
            Subscription::new(1.0, "EUR", "weekly"),
            Subscription::new(1.0, "EUR", "biweekly"),
            Subscription::new(1.0, "EUR", "monthly"),
            Subscription::new(1.0, "EUR", "quarterly"),
            Subscription::new(1.0, "EUR", "yearly"),
        ];
        assert_eq!(
            calculate_annual_cost(&subs, "EUR", None, identity),
            52.0 + 26.0 + 12.0 + 4.0 + 1.0
        );
    }

    #[test]
    fn test_zero_price_skipped() {
        let subs = vec![Subscription {
            price: Some(0.0),
            frequency: Some("monthly".into()),
            ..Default::default()
        }];
        assert_eq!(calculate_annual_cost(&subs, "EUR", Some(&eur()), convert), 0.0);
    }

    #[test]
    fn test_malformed_entries_skipped() {
        let subs = vec![
            Subscription::new(10.0, "EUR", "monthly"),
            Subscription {
                price: None,
                frequency: Some("monthly".into()),
                ..Default::default()
            },
            Subscription {
                price: Some(5.0),
                frequency: None,
                ..Default::default()
            },
            Subscription::new(-5.0, "EUR", "monthly"),
            Subscription::new(8.0, "EUR", "semiannual"),
            Subscription::new(8.0, "EUR", "daily"),
        ];
        assert_eq!(calculate_annual_cost(&subs, "EUR", None, identity), 120.0);
    }

    #[test]
    fn test_converter_invoked_with_subscription_currency() {
        use std::cell::RefCell;

        let calls = RefCell::new(Vec::new());
        let stub = |amount: f64, from: &str, to: &str, _: Option<&RateTable>| {
            calls.borrow_mut().push((from.to_string(), to.to_string()));
            amount * 2.0
        };
        let subs = vec![
            Subscription::new(10.0, "USD", "yearly"),
            Subscription::new(0.0, "GBP", "yearly"),
        ];

        assert_eq!(calculate_annual_cost(&subs, "EUR", None, stub), 20.0);
        assert_eq!(*calls.borrow(), vec![("USD".to_string(), "EUR".to_string())]);
    }

    #[test]
    fn test_conversion_applied_before_scaling() {
        let rates: RateTable = [("EUR", 1.0), ("USD", 2.0)].into_iter().collect();
        let subs = vec![Subscription::new(10.0, "USD", "quarterly")];
        assert_eq!(calculate_annual_cost(&subs, "EUR", Some(&rates), convert), 20.0);
    }

    #[test]
    fn test_appending_valid_entry_never_decreases_total() {
        let mut subs = vec![
            Subscription::new(3.5, "EUR", "weekly"),
            Subscription::new(0.0, "EUR", "monthly"),
            Subscription::new(12.0, "EUR", "nine_months"),
        ];
        let mut previous = calculate_annual_cost(&subs, "EUR", Some(&eur()), convert);
        for freq in ["weekly", "biweekly", "monthly", "quarterly", "yearly"] {
            subs.push(Subscription::new(0.01, "EUR", freq));
            let total = calculate_annual_cost(&subs, "EUR", Some(&eur()), convert);
            assert!(total >= previous);
            previous = total;
        }
    }

    #[test]
    fn test_report_lists_skipped_entries() {
        let subs = vec![
            Subscription::new(10.0, "EUR", "monthly"),
            Subscription {
                name: Some("Gym".into()),
                price: None,
                frequency: Some("monthly".into()),
                ..Default::default()
            },
            Subscription {
                price: Some(5.0),
                ..Default::default()
            },
            Subscription::new(8.0, "EUR", "biennial"),
        ];

        let report = calculate_annual_cost_with_report(&subs, "EUR", None, identity);
        assert_eq!(report.total, calculate_annual_cost(&subs, "EUR", None, identity));
        assert_eq!(report.skipped.len(), 3);
        assert_eq!(report.skipped[0].index, 1);
        assert_eq!(report.skipped[0].name.as_deref(), Some("Gym"));
        assert_eq!(report.skipped[0].reason, SkipReason::InvalidPrice);
        assert_eq!(report.skipped[1].reason, SkipReason::MissingFrequency);
        assert_eq!(
            report.skipped[2].reason,
            SkipReason::UnsupportedFrequency("biennial".into())
        );
    }

    #[test]
    fn test_monthly_cost_uses_extended_table() {
        let subs = vec![
            Subscription::new(10.0, "EUR", "monthly"),
            Subscription::new(60.0, "EUR", "semiannual"),
            Subscription::new(120.0, "EUR", "yearly"),
        ];
        let total = calculate_monthly_cost(&subs, "EUR", None, identity);
        assert!((total - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_annual_cost_of_single_subscription() {
        assert_eq!(annual_cost_of(&Subscription::new(5.0, "USD", "weekly")), Some(260.0));
        assert_eq!(annual_cost_of(&Subscription::new(5.0, "USD", "triennial")), None);
    }

    #[test]
    fn test_round_cents() {
        assert_eq!(round_cents(10.005_f64 + 0.0001), 10.01);
        assert_eq!(round_cents(119.88), 119.88);
        assert_eq!(round_cents(0.0), 0.0);
    }
}
