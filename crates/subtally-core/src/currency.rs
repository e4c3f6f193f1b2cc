//! Currency conversion over a caller-supplied rate table
//!
//! All rates in a [`RateTable`] are relative to one implicit base unit that is
//! never stored in the table. Conversion pivots through that base: divide by
//! the source rate, multiply by the target rate. The base is not validated;
//! a table mixing bases converts without complaint.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Exchange rates keyed by currency code
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RateTable(HashMap<String, f64>);

impl RateTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, code: impl Into<String>, rate: f64) {
        self.0.insert(code.into(), rate);
    }

    /// Rate for `code`, or `None` when missing, zero or NaN
    pub fn rate(&self, code: &str) -> Option<f64> {
        self.0
            .get(code)
            .copied()
            .filter(|r| *r != 0.0 && !r.is_nan())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for RateTable {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl From<HashMap<String, f64>> for RateTable {
    fn from(map: HashMap<String, f64>) -> Self {
        Self(map)
    }
}

/// Convert `amount` from currency `from` to currency `to`.
///
/// Never fails: without a table, or when either code has no usable rate, the
/// amount is returned unchanged.
pub fn convert(amount: f64, from: &str, to: &str, rates: Option<&RateTable>) -> f64 {
    let Some(rates) = rates else {
        return amount;
    };
    let (Some(rate_from), Some(rate_to)) = (rates.rate(from), rates.rate(to)) else {
        return amount;
    };
    if from == to {
        return amount;
    }

    let base = amount / rate_from;
    base * rate_to
}
