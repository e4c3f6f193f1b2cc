//! CSV exports
//!
//! Supports:
//! - Subscription list (`name,price,currency,frequency,category,method`)
//! - Payment history (`name,paymentDate,amount,currency`)
//! - Annual summary (`name,annual_cost,currency`)

use std::io::Write;

use crate::annual::annual_cost_of;
use crate::error::Result;
use crate::models::{coerce_number, non_empty, Subscription};

/// Export kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Subscriptions,
    Payments,
    AnnualSummary,
}

impl ExportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Subscriptions => "subscriptions",
            Self::Payments => "payments",
            Self::AnnualSummary => "annual",
        }
    }

    /// Conventional file name for this export
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Subscriptions => "subscriptions.csv",
            Self::Payments => "payment-history.csv",
            Self::AnnualSummary => "annual-summary.csv",
        }
    }
}

impl std::str::FromStr for ExportKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "subscriptions" => Ok(Self::Subscriptions),
            "payments" => Ok(Self::Payments),
            "annual" => Ok(Self::AnnualSummary),
            _ => Err(format!("Unknown export kind: {}", s)),
        }
    }
}

/// Write the requested export to `writer`
pub fn export_csv<W: Write>(kind: ExportKind, subscriptions: &[Subscription], writer: W) -> Result<()> {
    match kind {
        ExportKind::Subscriptions => export_subscriptions(subscriptions, writer),
        ExportKind::Payments => export_payment_history(subscriptions, writer),
        ExportKind::AnnualSummary => export_annual_summary(subscriptions, writer),
    }
}

pub fn export_subscriptions<W: Write>(subscriptions: &[Subscription], writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(["name", "price", "currency", "frequency", "category", "method"])?;

    for sub in subscriptions {
        csv.write_record([
            sub.display_name(),
            &sub.price.map(|p| p.to_string()).unwrap_or_default(),
            sub.currency_or_default(),
            sub.frequency.as_deref().unwrap_or(""),
            sub.category.as_deref().unwrap_or(""),
            sub.method.as_deref().unwrap_or(""),
        ])?;
    }

    csv.flush()?;
    Ok(())
}

/// One row per stored payment. Payment currency falls back to the
/// subscription's, then to EUR.
pub fn export_payment_history<W: Write>(subscriptions: &[Subscription], writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(["name", "paymentDate", "amount", "currency"])?;

    for sub in subscriptions {
        for payment in &sub.payments {
            let amount = payment
                .amount
                .as_ref()
                .and_then(coerce_number)
                .map(|a| a.to_string())
                .unwrap_or_default();
            csv.write_record([
                sub.display_name(),
                payment.date.as_deref().unwrap_or(""),
                &amount,
                non_empty(payment.currency.as_deref()).unwrap_or(sub.currency_or_default()),
            ])?;
        }
    }

    csv.flush()?;
    Ok(())
}

/// Annual cost per subscription in its own currency. Subscriptions whose
/// frequency has no annual multiplier are exported with an empty cost.
pub fn export_annual_summary<W: Write>(subscriptions: &[Subscription], writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(["name", "annual_cost", "currency"])?;

    for sub in subscriptions {
        let annual = annual_cost_of(sub)
            .map(|cost| format!("{:.2}", cost))
            .unwrap_or_default();
        csv.write_record([sub.display_name(), &annual, sub.currency_or_default()])?;
    }

    csv.flush()?;
    Ok(())
}
