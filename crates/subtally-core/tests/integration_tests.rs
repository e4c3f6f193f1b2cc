//! Integration tests for subtally-core
//!
//! These tests exercise the load → normalize → aggregate → alert workflow
//! the way a caller holding a tracker export would.

use chrono::NaiveDate;
use subtally_core::{
    annual::round_cents,
    budget_summary, calculate_annual_cost, calculate_annual_cost_with_report,
    calculate_monthly_cost, convert, detect_price_increase, forecast_spend,
    load::{parse_raw_payments, parse_subscriptions},
    normalize_payment,
    payments::{normalize_payments, subscription_payments},
    price_history_alerts, Error, PriceAlert, PriceCheck, RateTable, SkipReason, UuidGenerator,
};

/// A tracker export with a mix of currencies, frequencies and bad entries
fn tracker_export() -> &'static str {
    r#"{
      "exportedAt": "2024-06-15T08:00:00Z",
      "subscriptions": [
        {"id": "netflix", "name": "Netflix", "price": 15.49, "currency": "USD",
         "frequency": "monthly", "category": "Streaming", "datePaid": "2024-06-01",
         "payments": [
           {"id": "n1", "date": "2024-04-01", "amount": 13.49},
           {"id": "n2", "date": "2024-05-01", "amount": 15.49},
           {"id": "n3", "date": "2024-06-01", "amount": 15.49}
         ]},
        {"id": "gym", "name": "Gym", "price": "30", "currency": "EUR",
         "frequency": "monthly", "category": "Health", "datePaid": "2024-05-20"},
        {"id": "domain", "name": "Domain", "price": 12, "currency": "EUR",
         "frequency": "yearly", "history": ["2023-06-10", "2024-06-10"]},
        {"id": "broken", "name": "Broken", "price": "n/a", "frequency": "monthly"},
        {"id": "insurance", "name": "Insurance", "price": 120, "currency": "EUR",
         "frequency": "semiannual"}
      ]
    }"#
}

fn rates() -> RateTable {
    [("EUR", 1.0), ("USD", 1.25)].into_iter().collect()
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

// =============================================================================
// Aggregation
// =============================================================================

#[test]
fn test_annual_cost_of_tracker_export() {
    let subs = parse_subscriptions(tracker_export().as_bytes()).unwrap();
    assert_eq!(subs.len(), 5);

    let total = calculate_annual_cost(&subs, "EUR", Some(&rates()), convert);
    // Netflix 15.49 USD = 12.392 EUR * 12, Gym 30 * 12, Domain 12 * 1
    let expected = 15.49 / 1.25 * 12.0 + 360.0 + 12.0;
    assert!((total - expected).abs() < 1e-9);
    assert_eq!(round_cents(total), 520.70);
}

#[test]
fn test_report_explains_excluded_entries() {
    let subs = parse_subscriptions(tracker_export().as_bytes()).unwrap();
    let report = calculate_annual_cost_with_report(&subs, "EUR", Some(&rates()), convert);

    let skipped: Vec<_> = report
        .skipped
        .iter()
        .map(|s| (s.name.as_deref(), &s.reason))
        .collect();
    assert_eq!(
        skipped,
        vec![
            (Some("Broken"), &SkipReason::InvalidPrice),
            (
                Some("Insurance"),
                &SkipReason::UnsupportedFrequency("semiannual".to_string())
            ),
        ]
    );
}

#[test]
fn test_monthly_cost_includes_semiannual() {
    let subs = parse_subscriptions(tracker_export().as_bytes()).unwrap();
    let monthly = calculate_monthly_cost(&subs, "EUR", Some(&rates()), convert);
    let expected = 15.49 / 1.25 + 30.0 + 1.0 + 20.0;
    assert!((monthly - expected).abs() < 1e-9);
}

#[test]
fn test_missing_rates_degrade_to_unconverted_total() {
    let subs = parse_subscriptions(tracker_export().as_bytes()).unwrap();
    let total = calculate_annual_cost(&subs, "EUR", None, convert);
    assert!((total - (15.49 * 12.0 + 360.0 + 12.0)).abs() < 1e-9);
}

// =============================================================================
// Payments and alerts
// =============================================================================

#[test]
fn test_ingest_payments_file() {
    let raw = parse_raw_payments(
        r#"[{"date": "2024-01-01", "amount": 9.99},
            {"id": "keep", "date": "2024-02-01", "amount": 9.99, "currency": "USD"}]"#
            .as_bytes(),
    )
    .unwrap();

    let payments = normalize_payments(&raw, &UuidGenerator).unwrap();
    assert_eq!(payments[0].currency, "EUR");
    assert!(!payments[0].id.is_empty());
    assert_eq!(payments[1].id, "keep");
    assert_ne!(payments[0].id, payments[1].id);
}

#[test]
fn test_ingest_rejects_string_amount() {
    let raw = parse_raw_payments(r#"[{"date": "2024-01-01", "amount": "9.99"}]"#.as_bytes())
        .unwrap();
    let err = normalize_payment(&raw[0], &UuidGenerator).unwrap_err();
    assert_eq!(err.to_string(), "Validation error: Invalid payment object");
    assert!(matches!(err, Error::Validation(_)));
}

#[test]
fn test_price_history_of_tracker_subscription() {
    let subs = parse_subscriptions(tracker_export().as_bytes()).unwrap();
    let payments = subscription_payments(&subs[0]);
    assert_eq!(payments.len(), 3);

    let alerts = price_history_alerts(&payments, 10.0);
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].date, "2024-05-01");
    assert_eq!(
        alerts[0].alert,
        PriceAlert {
            old_price: 13.49,
            new_price: 15.49,
            percent: 15,
        }
    );
}

#[test]
fn test_price_alert_examples() {
    assert_eq!(detect_price_increase(&PriceCheck::new(100.0, 100.0)), None);
    assert_eq!(detect_price_increase(&PriceCheck::new(100.0, 105.0)), None);
    assert_eq!(
        detect_price_increase(&PriceCheck::new(100.0, 111.0)),
        Some(PriceAlert {
            old_price: 100.0,
            new_price: 111.0,
            percent: 11,
        })
    );
    assert_eq!(
        detect_price_increase(&PriceCheck::new(100.0, 110.0).with_threshold(10.0)),
        Some(PriceAlert {
            old_price: 100.0,
            new_price: 110.0,
            percent: 10,
        })
    );
}

// =============================================================================
// Forecast and budget
// =============================================================================

#[test]
fn test_forecast_next_quarter() {
    let subs = parse_subscriptions(tracker_export().as_bytes()).unwrap();
    let forecast = forecast_spend(
        &subs,
        date("2024-07-01"),
        date("2024-09-30"),
        "EUR",
        Some(&rates()),
        convert,
    );

    // Netflix renews 07-01, 08-01, 09-01; Gym 06-20 (outside), 07-20, 08-20, 09-20
    assert_eq!(forecast.charges, 6);
    assert!((forecast.by_category["Streaming"] - 3.0 * 15.49 / 1.25).abs() < 1e-9);
    assert_eq!(forecast.by_category["Health"], 90.0);
}

#[test]
fn test_budget_for_mid_june() {
    let subs = parse_subscriptions(tracker_export().as_bytes()).unwrap();
    let summary = budget_summary(&subs, date("2024-06-15"), "EUR", Some(&rates()), convert);

    // Paid in June: Netflix 15.49 USD, Domain 12 EUR (legacy history)
    assert_eq!(summary.month_spent, round_cents(15.49 / 1.25 + 12.0));
    // Unpaid in June: Gym 30, Insurance 120; Broken has no price
    assert_eq!(summary.month_due, 150.0);
    assert_eq!(summary.year_due, 150.0);
}
