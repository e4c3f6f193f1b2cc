//! Payment normalization
//!
//! Two entry points:
//! - [`normalize_payment`] strictly validates one ingested record. This is the
//!   only calculation that fails on bad input.
//! - [`normalized_payments`] collects the payment list of a stored
//!   subscription, including legacy `history` dates, converted to one
//!   currency.

use serde_json::Value;

use crate::currency::RateTable;
use crate::error::{Error, Result};
use crate::models::{coerce_number, non_empty, Payment, RawPayment, Subscription, DEFAULT_CURRENCY};

/// Source of fresh payment ids
///
/// Implementations must be safe to call concurrently and must not repeat ids
/// within the caller's dataset.
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Random v4 UUIDs
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

impl<F> IdGenerator for F
where
    F: Fn() -> String + Send + Sync,
{
    fn generate(&self) -> String {
        self()
    }
}

/// Validate and canonicalize a raw payment.
///
/// `date` must be present and non-empty and `amount` must be a JSON number
/// (numeric strings are rejected). A missing id is filled from `ids`; a
/// missing or empty currency becomes `"EUR"`.
pub fn normalize_payment(raw: &RawPayment, ids: &dyn IdGenerator) -> Result<Payment> {
    let date = non_empty(raw.date.as_deref());
    let amount = match &raw.amount {
        Some(Value::Number(n)) => n.as_f64(),
        _ => None,
    };

    let (Some(date), Some(amount)) = (date, amount) else {
        return Err(Error::Validation("Invalid payment object".to_string()));
    };

    Ok(Payment {
        id: raw.id.clone().unwrap_or_else(|| ids.generate()),
        date: date.to_string(),
        amount,
        currency: non_empty(raw.currency.as_deref())
            .unwrap_or(DEFAULT_CURRENCY)
            .to_string(),
    })
}

/// Normalize a batch, stopping at the first invalid record
pub fn normalize_payments(raw: &[RawPayment], ids: &dyn IdGenerator) -> Result<Vec<Payment>> {
    raw.iter().map(|p| normalize_payment(p, ids)).collect()
}

/// All payments recorded for a subscription.
///
/// Stored payments without an id (or without a numeric amount) are dropped.
/// Each legacy `history` date becomes a payment with the deterministic id
/// `"{subscription_id}-{date}"` and the subscription's current price.
pub fn subscription_payments(sub: &Subscription) -> Vec<Payment> {
    let sub_currency = sub.currency_or_default();

    let stored = sub.payments.iter().filter_map(|p| {
        let id = non_empty(p.id.as_deref())?;
        Some(Payment {
            id: id.to_string(),
            date: p.date.clone().unwrap_or_default(),
            amount: p.amount.as_ref().and_then(coerce_number)?,
            currency: non_empty(p.currency.as_deref())
                .unwrap_or(sub_currency)
                .to_string(),
        })
    });

    let sub_id = sub.id.as_deref().unwrap_or_default();
    let legacy = sub.history.iter().filter_map(|date| {
        Some(Payment {
            id: format!("{}-{}", sub_id, date),
            date: date.clone(),
            amount: sub.price?,
            currency: sub_currency.to_string(),
        })
    });

    stored.chain(legacy).collect()
}

/// Convert every payment to `currency` and relabel it
pub fn convert_payments<F>(
    payments: Vec<Payment>,
    currency: &str,
    rates: Option<&RateTable>,
    convert: F,
) -> Vec<Payment>
where
    F: Fn(f64, &str, &str, Option<&RateTable>) -> f64,
{
    payments
        .into_iter()
        .map(|p| Payment {
            amount: convert(p.amount, &p.currency, currency, rates),
            currency: currency.to_string(),
            ..p
        })
        .collect()
}

/// [`subscription_payments`] converted to `currency`
pub fn normalized_payments<F>(
    sub: &Subscription,
    currency: &str,
    rates: Option<&RateTable>,
    convert: F,
) -> Vec<Payment>
where
    F: Fn(f64, &str, &str, Option<&RateTable>) -> f64,
{
    convert_payments(subscription_payments(sub), currency, rates, convert)
}
