//! Forecast, budget and health command implementations

use std::path::Path;

use anyhow::{bail, Result};
use chrono::{Duration, NaiveDate};
use subtally_core::config::Settings;
use subtally_core::{
    budget_summary, convert, forecast_spend, forgotten_subscriptions, subscription_health,
    HealthStatus,
};

use super::{load_data, load_subscriptions, parse_date_arg, truncate};
use crate::cli::DataArgs;

/// Default forecast window length
const FORECAST_DAYS: i64 = 90;

pub fn cmd_forecast(
    settings: &Settings,
    data: &DataArgs,
    from: Option<&str>,
    to: Option<&str>,
) -> Result<()> {
    let from = parse_date_arg(from, "--from")?;
    let to = match to {
        Some(_) => Some(parse_date_arg(to, "--to")?),
        None => None,
    };
    let (from, to) = forecast_window(from, to)?;

    let loaded = load_data(settings, data)?;
    let forecast = forecast_spend(
        &loaded.subscriptions,
        from,
        to,
        &loaded.currency,
        Some(&loaded.rates),
        convert,
    );

    println!();
    println!("🔮 Forecast {} → {}", from, to);
    println!("   ─────────────────────────────────────────────");
    for (category, amount) in &forecast.by_category {
        println!("   {:24} │ {:>10.2} {}", truncate(category, 24), amount, loaded.currency);
    }
    println!("   ─────────────────────────────────────────────");
    println!(
        "   {:24} │ {:>10.2} {} ({} charges)",
        "Total", forecast.total, loaded.currency, forecast.charges
    );

    Ok(())
}

/// Resolve the forecast window, defaulting to [`FORECAST_DAYS`] after `from`
pub fn forecast_window(from: NaiveDate, to: Option<NaiveDate>) -> Result<(NaiveDate, NaiveDate)> {
    let to = match to {
        Some(to) => to,
        None => match from.checked_add_signed(Duration::days(FORECAST_DAYS)) {
            Some(to) => to,
            None => bail!("--from ({}) is too late for a {} day forecast", from, FORECAST_DAYS),
        },
    };
    if to < from {
        bail!("--to ({}) is before --from ({})", to, from);
    }
    Ok((from, to))
}

pub fn cmd_budget(settings: &Settings, data: &DataArgs, date: Option<&str>) -> Result<()> {
    let today = parse_date_arg(date, "--date")?;
    let loaded = load_data(settings, data)?;
    let summary = budget_summary(
        &loaded.subscriptions,
        today,
        &loaded.currency,
        Some(&loaded.rates),
        convert,
    );

    let currency = &loaded.currency;
    println!();
    println!("📊 Budget as of {}", today);
    println!("   ─────────────────────────────────────────────");
    println!("   Spent this month  │ {:>10.2} {}", summary.month_spent, currency);
    println!("   Due this month    │ {:>10.2} {}", summary.month_due, currency);
    println!("   Spent this year   │ {:>10.2} {}", summary.year_spent, currency);
    println!("   Due this year     │ {:>10.2} {}", summary.year_due, currency);

    Ok(())
}

pub fn cmd_health(
    settings: &Settings,
    file: &Path,
    date: Option<&str>,
    forgotten_days: Option<i64>,
) -> Result<()> {
    let today = parse_date_arg(date, "--date")?;
    let threshold = forgotten_days.unwrap_or(settings.forgotten_after_days);
    if threshold < 0 {
        bail!("--forgotten-days must not be negative");
    }
    let subscriptions = load_subscriptions(file)?;

    println!();
    println!("🩺 Subscription Health as of {}", today);
    println!("   ─────────────────────────────────────────────");
    for sub in &subscriptions {
        let status = subscription_health(sub, today);
        let icon = match status {
            HealthStatus::Active => "✅",
            HealthStatus::AtRisk => "⚠️ ",
            HealthStatus::Inactive => "❌",
            HealthStatus::NeverPaid => "➖",
        };
        println!(
            "   {} {:24} │ {}",
            icon,
            truncate(sub.display_name(), 24),
            status.label()
        );
    }

    let forgotten = forgotten_subscriptions(&subscriptions, threshold, today);
    if !forgotten.is_empty() {
        println!();
        println!("   No payment in over {} days:", threshold);
        for f in forgotten {
            println!(
                "   • {:24} │ last paid {} ({} days ago)",
                truncate(f.subscription.display_name(), 24),
                f.last_paid,
                f.overdue_days
            );
        }
    }

    Ok(())
}
