//! Renewal dates and payment recency
//!
//! All functions take `today` explicitly so results are reproducible.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{parse_date, Frequency, Subscription};

/// Days past the expected renewal before a subscription is considered inactive
pub const AT_RISK_GRACE_DAYS: i64 = 30;

/// Next renewal after `date` for a frequency token.
///
/// Unknown tokens renew monthly. Returns `None` only if the date would
/// overflow the calendar.
pub fn next_renewal(date: NaiveDate, frequency: Option<&str>) -> Option<NaiveDate> {
    let frequency = frequency
        .and_then(|f| f.parse::<Frequency>().ok())
        .unwrap_or(Frequency::Monthly);
    frequency.period().advance(date)
}

/// Next renewal after the most recent parseable date in `dates`
pub fn next_renewal_from_dates<'a, I>(dates: I, frequency: Option<&str>) -> Option<NaiveDate>
where
    I: IntoIterator<Item = &'a str>,
{
    let last = latest_date(dates)?;
    next_renewal(last, frequency)
}

/// Latest parseable date, ignoring anything that does not parse
pub fn latest_date<'a, I>(dates: I) -> Option<NaiveDate>
where
    I: IntoIterator<Item = &'a str>,
{
    dates.into_iter().filter_map(parse_date).max()
}

/// Payment recency status of a subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    /// No recorded payment with a usable date
    NeverPaid,
    /// Next renewal is today or later
    Active,
    /// Renewal missed by at most [`AT_RISK_GRACE_DAYS`]
    AtRisk,
    Inactive,
}

impl HealthStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NeverPaid => "never_paid",
            Self::Active => "active",
            Self::AtRisk => "at_risk",
            Self::Inactive => "inactive",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::NeverPaid => "Never paid",
            Self::Active => "Active",
            Self::AtRisk => "At-risk",
            Self::Inactive => "Inactive",
        }
    }
}

/// Classify a subscription by its stored payments relative to `today`
pub fn subscription_health(sub: &Subscription, today: NaiveDate) -> HealthStatus {
    let dates = sub.payments.iter().filter_map(|p| p.date.as_deref());
    let Some(last_paid) = latest_date(dates) else {
        return HealthStatus::NeverPaid;
    };

    let Some(next) = next_renewal(last_paid, sub.frequency.as_deref()) else {
        return HealthStatus::Inactive;
    };

    let days_until = (next - today).num_days();
    if days_until >= 0 {
        HealthStatus::Active
    } else if days_until >= -AT_RISK_GRACE_DAYS {
        HealthStatus::AtRisk
    } else {
        HealthStatus::Inactive
    }
}

/// A subscription with no payment for longer than the threshold
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForgottenSubscription<'a> {
    pub subscription: &'a Subscription,
    pub last_paid: NaiveDate,
    pub overdue_days: i64,
}

/// Subscriptions whose latest payment is more than `threshold_days` old.
///
/// Paid dates come from `payments` when any are stored, otherwise from the
/// legacy `history` list plus `date_paid`. Subscriptions with no usable
/// date are left out.
pub fn forgotten_subscriptions(
    subscriptions: &[Subscription],
    threshold_days: i64,
    today: NaiveDate,
) -> Vec<ForgottenSubscription<'_>> {
    subscriptions
        .iter()
        .filter_map(|sub| {
            let paid_dates: Vec<&str> = if sub.payments.is_empty() {
                sub.history
                    .iter()
                    .map(String::as_str)
                    .chain(sub.date_paid.as_deref())
                    .collect()
            } else {
                sub.payments.iter().filter_map(|p| p.date.as_deref()).collect()
            };
            let last_paid = latest_date(paid_dates)?;

            let overdue_days = (today - last_paid).num_days();
            (overdue_days > threshold_days).then_some(ForgottenSubscription {
                subscription: sub,
                last_paid,
                overdue_days,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawPayment;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn with_payments(frequency: &str, dates: &[&str]) -> Subscription {
        Subscription {
            frequency: Some(frequency.to_string()),
            payments: dates.iter().map(|d| RawPayment::new(d, 9.99)).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_next_renewal_periods() {
        let start = date("2024-01-15");
        assert_eq!(next_renewal(start, Some("weekly")), Some(date("2024-01-22")));
        assert_eq!(next_renewal(start, Some("biweekly")), Some(date("2024-01-29")));
        assert_eq!(next_renewal(start, Some("quarterly")), Some(date("2024-04-15")));
        assert_eq!(next_renewal(start, Some("nine_months")), Some(date("2024-10-15")));
        assert_eq!(next_renewal(start, Some("triennial")), Some(date("2027-01-15")));
    }

    #[test]
    fn test_unknown_frequency_renews_monthly() {
        let start = date("2024-01-15");
        assert_eq!(next_renewal(start, Some("daily")), Some(date("2024-02-15")));
        assert_eq!(next_renewal(start, None), Some(date("2024-02-15")));
    }

    #[test]
    fn test_next_renewal_from_latest_date() {
        let dates = ["2024-01-01", "garbage", "2024-03-01", "2024-02-01"];
        assert_eq!(
            next_renewal_from_dates(dates, Some("monthly")),
            Some(date("2024-04-01"))
        );
        assert_eq!(next_renewal_from_dates(Vec::<&str>::new(), Some("monthly")), None);
    }

    #[test]
    fn test_health_never_paid() {
        let sub = with_payments("monthly", &[]);
        assert_eq!(subscription_health(&sub, date("2024-06-01")), HealthStatus::NeverPaid);
    }

    #[test]
    fn test_health_transitions() {
        let sub = with_payments("monthly", &["2024-05-01"]);
        // Next renewal 2024-06-01
        assert_eq!(subscription_health(&sub, date("2024-06-01")), HealthStatus::Active);
        assert_eq!(subscription_health(&sub, date("2024-06-20")), HealthStatus::AtRisk);
        assert_eq!(subscription_health(&sub, date("2024-07-01")), HealthStatus::AtRisk);
        assert_eq!(subscription_health(&sub, date("2024-07-02")), HealthStatus::Inactive);
    }

    #[test]
    fn test_forgotten_subscriptions() {
        let today = date("2024-06-30");
        let subs = vec![
            with_payments("monthly", &["2024-06-15"]),
            with_payments("monthly", &["2024-04-01", "2024-05-01"]),
            Subscription {
                history: vec!["2024-01-01".into()],
                date_paid: Some("2024-02-01".into()),
                ..Default::default()
            },
            Subscription::default(),
        ];

        let forgotten = forgotten_subscriptions(&subs, 30, today);
        assert_eq!(forgotten.len(), 2);
        assert_eq!(forgotten[0].last_paid, date("2024-05-01"));
        assert_eq!(forgotten[0].overdue_days, 60);
        assert_eq!(forgotten[1].last_paid, date("2024-02-01"));
    }

    #[test]
    fn test_forgotten_threshold_is_exclusive() {
        let subs = vec![with_payments("monthly", &["2024-05-31"])];
        assert!(forgotten_subscriptions(&subs, 30, date("2024-06-30")).is_empty());
        assert_eq!(forgotten_subscriptions(&subs, 29, date("2024-06-30")).len(), 1);
    }
}
