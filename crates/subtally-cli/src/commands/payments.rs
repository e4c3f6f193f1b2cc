//! Payment normalization command

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use subtally_core::load::parse_raw_payments;
use subtally_core::payments::normalize_payments;
use subtally_core::UuidGenerator;
use tracing::info;

pub fn cmd_normalize(file: &Path, output: Option<&Path>) -> Result<()> {
    let reader = File::open(file)
        .with_context(|| format!("Failed to open payments file: {}", file.display()))?;
    let raw = parse_raw_payments(BufReader::new(reader))
        .with_context(|| format!("Failed to parse payments file: {}", file.display()))?;

    let payments = normalize_payments(&raw, &UuidGenerator).context("Payment validation failed")?;
    let json = serde_json::to_string_pretty(&payments)?;

    match output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {} payments to {}", payments.len(), path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}
