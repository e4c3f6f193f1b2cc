//! Cost total command implementations

use anyhow::Result;
use subtally_core::annual::round_cents;
use subtally_core::config::Settings;
use subtally_core::{calculate_annual_cost_with_report, calculate_monthly_cost, convert, SkipReason};

use super::{load_data, truncate};
use crate::cli::DataArgs;

pub fn cmd_annual(settings: &Settings, data: &DataArgs, show_report: bool) -> Result<()> {
    let loaded = load_data(settings, data)?;
    let report = calculate_annual_cost_with_report(
        &loaded.subscriptions,
        &loaded.currency,
        Some(&loaded.rates),
        convert,
    );

    println!();
    println!("💰 Annual Subscription Cost");
    println!("   ─────────────────────────────────────────────");
    println!(
        "   {:.2} {} per year ({} subscriptions counted)",
        round_cents(report.total),
        loaded.currency,
        loaded.subscriptions.len() - report.skipped.len()
    );

    if show_report && !report.skipped.is_empty() {
        println!();
        println!("   Not counted:");
        for skipped in &report.skipped {
            let name = skipped
                .name
                .as_deref()
                .map(|n| truncate(n, 24))
                .unwrap_or_else(|| format!("#{}", skipped.index));
            println!("   • {:24} │ {}", name, describe_skip(&skipped.reason));
        }
    } else if !report.skipped.is_empty() {
        println!(
            "   ({} left out, run with --report for details)",
            report.skipped.len()
        );
    }

    Ok(())
}

pub fn cmd_monthly(settings: &Settings, data: &DataArgs) -> Result<()> {
    let loaded = load_data(settings, data)?;
    let total = calculate_monthly_cost(
        &loaded.subscriptions,
        &loaded.currency,
        Some(&loaded.rates),
        convert,
    );

    println!();
    println!("📅 Monthly-Equivalent Cost");
    println!("   ─────────────────────────────────────────────");
    println!("   {:.2} {} per month", round_cents(total), loaded.currency);

    Ok(())
}

pub fn describe_skip(reason: &SkipReason) -> String {
    match reason {
        SkipReason::InvalidPrice => "missing or invalid price".to_string(),
        SkipReason::MissingFrequency => "no billing frequency".to_string(),
        SkipReason::UnsupportedFrequency(token) => {
            format!("frequency '{}' has no annual multiplier", token)
        }
    }
}
