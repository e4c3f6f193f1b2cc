//! Price alert command implementations

use std::path::Path;

use anyhow::{bail, Result};
use subtally_core::config::Settings;
use subtally_core::payments::subscription_payments;
use subtally_core::{detect_price_increase, price_history_alerts, PriceCheck};

use super::{load_subscriptions, truncate};

pub fn cmd_alerts(settings: &Settings, file: &Path, threshold: Option<f64>) -> Result<()> {
    let threshold = resolve_threshold(settings, threshold)?;
    let subscriptions = load_subscriptions(file)?;

    let mut found = 0;
    println!();
    println!("📈 Price Increases (threshold {}%)", threshold);
    println!("   ─────────────────────────────────────────────────────────────");

    for sub in &subscriptions {
        let payments = subscription_payments(sub);
        for dated in price_history_alerts(&payments, threshold) {
            found += 1;
            println!(
                "   {:20} │ {} │ {:>8.2} → {:<8.2} │ +{}%",
                truncate(sub.display_name(), 20),
                dated.date,
                dated.alert.old_price,
                dated.alert.new_price,
                dated.alert.percent
            );
        }
    }

    if found == 0 {
        println!("   No price increases at or above {}%", threshold);
    }

    Ok(())
}

pub fn cmd_check_price(
    settings: &Settings,
    previous: f64,
    new: f64,
    threshold: Option<f64>,
) -> Result<()> {
    let threshold = resolve_threshold(settings, threshold)?;
    let check = PriceCheck::new(previous, new).with_threshold(threshold);

    match detect_price_increase(&check) {
        Some(alert) => println!(
            "⚠️  Price increased {}%: {:.2} → {:.2}",
            alert.percent, alert.old_price, alert.new_price
        ),
        None => println!("✅ No significant price increase"),
    }

    Ok(())
}

fn resolve_threshold(settings: &Settings, threshold: Option<f64>) -> Result<f64> {
    let threshold = threshold.unwrap_or(settings.price_alert_threshold);
    if !threshold.is_finite() || threshold < 0.0 {
        bail!("Threshold must be a non-negative number, got {}", threshold);
    }
    Ok(threshold)
}
