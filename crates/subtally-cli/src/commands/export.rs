//! Export command implementation

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use subtally_core::{export_csv, ExportKind};

use super::load_subscriptions;

pub fn cmd_export(file: &Path, kind: &str, output: Option<&Path>) -> Result<()> {
    let kind: ExportKind = kind.parse().map_err(|e: String| anyhow::anyhow!(e))?;
    let subscriptions = load_subscriptions(file)?;

    let output = output.unwrap_or_else(|| Path::new(kind.file_name()));
    let writer = File::create(output)
        .with_context(|| format!("Failed to create {}", output.display()))?;

    export_csv(kind, &subscriptions, BufWriter::new(writer))
        .with_context(|| format!("Failed to export {}", kind.as_str()))?;

    println!(
        "✅ Exported {} subscriptions ({}) to {}",
        subscriptions.len(),
        kind.as_str(),
        output.display()
    );

    Ok(())
}
