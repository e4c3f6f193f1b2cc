//! Price increase detection
//!
//! Compares a previous and a new price and reports increases whose rounded
//! percentage reaches a threshold. Non-qualifying comparisons return `None`;
//! nothing here fails.

use crate::models::{DatedPriceAlert, Payment, PriceAlert};

/// Threshold used when the caller does not pass one
pub const DEFAULT_THRESHOLD_PERCENT: f64 = 10.0;

/// Inputs for [`detect_price_increase`]
///
/// Prices are optional so callers can pass through values that failed to
/// parse as numbers; such comparisons never alert.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceCheck {
    pub previous_price: Option<f64>,
    pub new_price: Option<f64>,
    pub threshold_percent: f64,
}

impl PriceCheck {
    pub fn new(previous_price: f64, new_price: f64) -> Self {
        Self {
            previous_price: Some(previous_price),
            new_price: Some(new_price),
            threshold_percent: DEFAULT_THRESHOLD_PERCENT,
        }
    }

    pub fn with_threshold(mut self, threshold_percent: f64) -> Self {
        self.threshold_percent = threshold_percent;
        self
    }
}

/// Report a significant price increase.
///
/// Returns `None` when either price is missing or non-finite, when the price
/// did not go up, or when the rounded percentage is below the threshold. The
/// threshold is inclusive.
///
/// A rise from a previous price of zero also returns `None`. The tracker UI
/// raises an alert with an infinite percentage there; an integer percentage
/// cannot carry that, so no alert is produced.
pub fn detect_price_increase(check: &PriceCheck) -> Option<PriceAlert> {
    let previous = check.previous_price.filter(|p| p.is_finite())?;
    let new = check.new_price.filter(|p| p.is_finite())?;

    if new <= previous || previous == 0.0 {
        return None;
    }

    // Positive ratio here, so f64::round is round-half-up
    let percent = ((new - previous) / previous * 100.0).round();

    if percent < check.threshold_percent {
        return None;
    }

    Some(PriceAlert {
        old_price: previous,
        new_price: new,
        percent: percent as i64,
    })
}

/// Alerts for every significant increase between successive payments.
///
/// Payments are ordered by date (unparseable dates first, in input order)
/// and each payment is compared with the one before it.
pub fn price_history_alerts(payments: &[Payment], threshold_percent: f64) -> Vec<DatedPriceAlert> {
    let mut ordered: Vec<&Payment> = payments.iter().collect();
    ordered.sort_by_key(|p| p.parsed_date());

    ordered
        .windows(2)
        .filter_map(|pair| {
            let check = PriceCheck::new(pair[0].amount, pair[1].amount)
                .with_threshold(threshold_percent);
            detect_price_increase(&check).map(|alert| DatedPriceAlert {
                date: pair[1].date.clone(),
                alert,
            })
        })
        .collect()
}
