//! Re-render a saved report

use std::path::PathBuf;

use anyhow::Result;
use spiqc_eval::report::read_report;
use spiqc_eval::{ReportFormat, generate_report};

/// Show evaluation report from a previous run
pub async fn run(results: PathBuf, format: ReportFormat) -> Result<()> {
    let report = read_report(&results).await?;
    println!("{}", generate_report(&report, format)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use spiqc_eval::metrics::Details;
    use spiqc_eval::report::write_report;
    use spiqc_eval::{Dimension, DimensionResult, EvaluationReport, Weights};

    fn unassessed_report() -> EvaluationReport {
        let details = Details {
            correctness: DimensionResult::failed(Dimension::Correctness, "no unit"),
            efficiency: DimensionResult::failed(Dimension::Efficiency, "no unit"),
            security: DimensionResult::failed(Dimension::Security, "no source"),
            conformance: DimensionResult::failed(Dimension::Conformance, "no source"),
        };
        EvaluationReport::assemble(details, &Weights::default())
    }

    #[tokio::test]
    async fn test_renders_saved_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qc_results.json");
        write_report(&unassessed_report(), &path).await.unwrap();

        for format in [ReportFormat::Table, ReportFormat::Markdown, ReportFormat::Json] {
            run(path.clone(), format).await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_missing_results_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(
            run(dir.path().join("missing.json"), ReportFormat::Table)
                .await
                .is_err()
        );
    }
}
