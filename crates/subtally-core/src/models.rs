//! Data models for subtally
//!
//! Records mirror the JSON shapes produced by the subscription tracker UI:
//! camelCase keys, optional fields everywhere, and prices that may arrive as
//! numbers or numeric strings.

use chrono::{Months, NaiveDate};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Currency used when a record does not name one
pub const DEFAULT_CURRENCY: &str = "EUR";

/// Subscription billing frequency
///
/// Covers every token the tracker knows about. Only the first five have an
/// annual-occurrence multiplier; see [`crate::frequency`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Weekly,
    Biweekly,
    Monthly,
    Quarterly,
    Semiannual,
    NineMonths,
    Yearly,
    Biennial,
    Triennial,
}

/// Length of one billing period
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillingPeriod {
    Days(u64),
    Months(u32),
}

impl BillingPeriod {
    /// Advance `date` by one period. Month arithmetic clamps to the last day
    /// of a shorter month (Jan 31 + 1 month = Feb 28/29).
    pub fn advance(&self, date: NaiveDate) -> Option<NaiveDate> {
        match *self {
            Self::Days(days) => date.checked_add_days(chrono::Days::new(days)),
            Self::Months(months) => date.checked_add_months(Months::new(months)),
        }
    }
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Biweekly => "biweekly",
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Semiannual => "semiannual",
            Self::NineMonths => "nine_months",
            Self::Yearly => "yearly",
            Self::Biennial => "biennial",
            Self::Triennial => "triennial",
        }
    }

    /// Get all frequencies, shortest period first
    pub fn all() -> &'static [Frequency] {
        &[
            Self::Weekly,
            Self::Biweekly,
            Self::Monthly,
            Self::Quarterly,
            Self::Semiannual,
            Self::NineMonths,
            Self::Yearly,
            Self::Biennial,
            Self::Triennial,
        ]
    }

    pub fn period(&self) -> BillingPeriod {
        match self {
            Self::Weekly => BillingPeriod::Days(7),
            Self::Biweekly => BillingPeriod::Days(14),
            Self::Monthly => BillingPeriod::Months(1),
            Self::Quarterly => BillingPeriod::Months(3),
            Self::Semiannual => BillingPeriod::Months(6),
            Self::NineMonths => BillingPeriod::Months(9),
            Self::Yearly => BillingPeriod::Months(12),
            Self::Biennial => BillingPeriod::Months(24),
            Self::Triennial => BillingPeriod::Months(36),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| format!("Unknown frequency: {}", s))
    }
}

/// A tracked subscription as supplied by the caller
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Price per billing period; `None` when missing or not numeric
    #[serde(default, deserialize_with = "lenient_number")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// Raw frequency token; unknown tokens are kept so callers can report them
    #[serde(default, deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
    #[serde(default, deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Payment method label (card, paypal, ...)
    #[serde(default, deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// Date of the last payment in the legacy single-date format
    #[serde(default, deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub date_paid: Option<String>,
    /// Stored payments; entries that are not payment objects are dropped
    #[serde(
        default,
        deserialize_with = "lenient_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub payments: Vec<RawPayment>,
    /// Legacy list of paid dates (pre-`payments` records)
    #[serde(
        default,
        deserialize_with = "lenient_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub history: Vec<String>,
}

impl Subscription {
    pub fn new(price: f64, currency: &str, frequency: &str) -> Self {
        Self {
            price: Some(price),
            currency: Some(currency.to_string()),
            frequency: Some(frequency.to_string()),
            ..Default::default()
        }
    }

    /// Parsed frequency, if the token is one we recognize
    pub fn frequency(&self) -> Option<Frequency> {
        self.frequency.as_deref().and_then(|f| f.parse().ok())
    }

    /// Currency code, falling back to [`DEFAULT_CURRENCY`] when absent or empty
    pub fn currency_or_default(&self) -> &str {
        non_empty(self.currency.as_deref()).unwrap_or(DEFAULT_CURRENCY)
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }
}

/// An unvalidated payment record as it arrives from storage or user input
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPayment {
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Kept untyped so that strict validation can tell `9.99` from `"9.99"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Value>,
    #[serde(default, deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

impl RawPayment {
    pub fn new(date: &str, amount: f64) -> Self {
        Self {
            date: Some(date.to_string()),
            amount: Some(Value::from(amount)),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_currency(mut self, currency: &str) -> Self {
        self.currency = Some(currency.to_string());
        self
    }
}

/// A validated payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: String,
    pub date: String,
    pub amount: f64,
    pub currency: String,
}

impl Payment {
    /// Calendar date of the payment, if the date string can be parsed
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_date(&self.date)
    }
}

/// A significant price increase between two successive prices
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceAlert {
    pub old_price: f64,
    pub new_price: f64,
    /// Rounded percentage increase
    pub percent: i64,
}

/// A price alert tied to the payment that triggered it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatedPriceAlert {
    pub date: String,
    #[serde(flatten)]
    pub alert: PriceAlert,
}

/// Parse a payment date: a plain `YYYY-MM-DD` date or an RFC 3339 timestamp
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            chrono::DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

pub(crate) fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

/// Coerce a JSON value to a number: numbers pass through, numeric strings are
/// parsed, everything else (including non-finite results) becomes `None`.
pub fn coerce_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) if s.trim().is_empty() => Some(0.0),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Null => Some(0.0),
        _ => None,
    };
    n.filter(|n| n.is_finite())
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(coerce_number))
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Strings pass through; any other JSON type reads as absent
fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}

/// A list that tolerates `null` and keeps only the elements that deserialize
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}
