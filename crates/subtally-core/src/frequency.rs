//! Frequency multiplier tables
//!
//! Two separate tables over the same frequency tokens:
//! - [`ANNUAL_OCCURRENCES`]: billing occurrences per year. Used by the annual
//!   cost aggregator. Covers only weekly through yearly.
//! - [`MONTHLY_FACTOR`]: cost of one period expressed as a multiple of a
//!   monthly cost. Covers every token, including semiannual, nine_months,
//!   biennial and triennial.
//!
//! The tables are kept apart: `semiannual` has a monthly factor but no annual
//! occurrence count, and the aggregator must keep excluding it.

use crate::models::Frequency;

/// Billing occurrences per year, keyed by frequency token
pub const ANNUAL_OCCURRENCES: [(&str, f64); 5] = [
    ("weekly", 52.0),
    ("biweekly", 26.0),
    ("monthly", 12.0),
    ("quarterly", 4.0),
    ("yearly", 1.0),
];

/// Monthly-equivalent factor, keyed by frequency token
pub const MONTHLY_FACTOR: [(&str, f64); 9] = [
    ("weekly", 4.345),
    ("biweekly", 2.1725),
    ("monthly", 1.0),
    ("quarterly", 1.0 / 3.0),
    ("semiannual", 1.0 / 6.0),
    ("nine_months", 1.0 / 9.0),
    ("yearly", 1.0 / 12.0),
    ("biennial", 1.0 / 24.0),
    ("triennial", 1.0 / 36.0),
];

/// Occurrences per year for `token`, `None` when the token has no entry
pub fn annual_occurrences(token: &str) -> Option<f64> {
    lookup(&ANNUAL_OCCURRENCES, token)
}

/// Monthly-equivalent factor for `token`, `None` when the token has no entry
pub fn monthly_factor(token: &str) -> Option<f64> {
    lookup(&MONTHLY_FACTOR, token)
}

fn lookup(table: &[(&str, f64)], token: &str) -> Option<f64> {
    table
        .iter()
        .find_map(|(key, value)| (*key == token).then_some(*value))
}

impl Frequency {
    pub fn annual_occurrences(&self) -> Option<f64> {
        annual_occurrences(self.as_str())
    }

    pub fn monthly_factor(&self) -> f64 {
        // Every variant has a monthly factor entry
        monthly_factor(self.as_str()).unwrap_or(1.0)
    }
}
