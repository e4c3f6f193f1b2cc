//! Spending and amounts due for the current month and year
//!
//! "Current" is relative to the `today` the caller passes in. All totals are
//! converted to the target currency and rounded to cents.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::annual::round_cents;
use crate::currency::RateTable;
use crate::models::{Payment, Subscription};
use crate::payments::normalized_payments;

/// Calendar window a budget figure covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetPeriod {
    Month,
    Year,
}

impl BudgetPeriod {
    fn contains(&self, payment: &Payment, today: NaiveDate) -> bool {
        let Some(date) = payment.parsed_date() else {
            return false;
        };
        match self {
            Self::Month => date.year() == today.year() && date.month() == today.month(),
            Self::Year => date.year() == today.year(),
        }
    }
}

/// Month and year figures in one place
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSummary {
    pub month_spent: f64,
    pub year_spent: f64,
    pub month_due: f64,
    pub year_due: f64,
}

/// Total paid during the period containing `today`
pub fn spent_in_period<F>(
    subscriptions: &[Subscription],
    period: BudgetPeriod,
    today: NaiveDate,
    currency: &str,
    rates: Option<&RateTable>,
    convert: F,
) -> f64
where
    F: Fn(f64, &str, &str, Option<&RateTable>) -> f64,
{
    let total: f64 = subscriptions
        .iter()
        .flat_map(|sub| normalized_payments(sub, currency, rates, &convert))
        .filter(|p| period.contains(p, today))
        .map(|p| finite_or_zero(p.amount))
        .sum();
    round_cents(total)
}

/// Total still due: the current price of every subscription with no payment
/// in the period containing `today`
pub fn due_in_period<F>(
    subscriptions: &[Subscription],
    period: BudgetPeriod,
    today: NaiveDate,
    currency: &str,
    rates: Option<&RateTable>,
    convert: F,
) -> f64
where
    F: Fn(f64, &str, &str, Option<&RateTable>) -> f64,
{
    let total: f64 = subscriptions
        .iter()
        .filter(|sub| {
            !normalized_payments(sub, currency, rates, &convert)
                .iter()
                .any(|p| period.contains(p, today))
        })
        .filter_map(|sub| {
            let price = sub.price?;
            let from = sub.currency.as_deref().unwrap_or("");
            Some(finite_or_zero(convert(price, from, currency, rates)))
        })
        .sum();
    round_cents(total)
}

/// All four budget figures for `today`
pub fn budget_summary<F>(
    subscriptions: &[Subscription],
    today: NaiveDate,
    currency: &str,
    rates: Option<&RateTable>,
    convert: F,
) -> BudgetSummary
where
    F: Fn(f64, &str, &str, Option<&RateTable>) -> f64,
{
    use BudgetPeriod::{Month, Year};

    BudgetSummary {
        month_spent: spent_in_period(subscriptions, Month, today, currency, rates, &convert),
        year_spent: spent_in_period(subscriptions, Year, today, currency, rates, &convert),
        month_due: due_in_period(subscriptions, Month, today, currency, rates, &convert),
        year_due: due_in_period(subscriptions, Year, today, currency, rates, &convert),
    }
}

fn finite_or_zero(n: f64) -> f64 {
    if n.is_finite() {
        n
    } else {
        0.0
    }
}
