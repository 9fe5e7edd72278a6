//! JSON report generation and persistence

use std::path::Path;

use anyhow::{Context, Result};

use crate::metrics::EvaluationReport;

/// JSON report generator
pub struct JsonReporter;

impl JsonReporter {
    /// Generate a pretty-printed JSON report
    pub fn generate(report: &EvaluationReport) -> Result<String> {
        let json = serde_json::to_string_pretty(report)?;
        Ok(json)
    }

    /// Generate a compact JSON report (no pretty printing)
    pub fn generate_compact(report: &EvaluationReport) -> Result<String> {
        let json = serde_json::to_string(report)?;
        Ok(json)
    }
}

/// Save a report as pretty JSON, creating parent directories as needed
pub async fn write_report(report: &EvaluationReport, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let json = JsonReporter::generate(report)?;
    tokio::fs::write(path, json)
        .await
        .with_context(|| format!("Failed to write report to {}", path.display()))?;
    tracing::debug!("report written to {}", path.display());
    Ok(())
}

/// Load a previously saved report
pub async fn read_report(path: impl AsRef<Path>) -> Result<EvaluationReport> {
    let path = path.as_ref();
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read report {}", path.display()))?;
    let report = serde_json::from_str(&content)
        .with_context(|| format!("{} is not a valid evaluation report", path.display()))?;
    Ok(report)
}
