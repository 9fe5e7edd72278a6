//! Evaluate a single target

use std::path::PathBuf;

use anyhow::{Context, Result};
use colored::*;
use spiqc_eval::report::{QualityGate, write_report};
use spiqc_eval::{EvalProgress, Evaluator, ReportFormat, generate_report};

use super::load_config;
use crate::console::{CliConsole, colored_score};

/// Run an evaluation and print the report
pub async fn run(
    target: PathBuf,
    config: Option<PathBuf>,
    output: Option<PathBuf>,
    format: ReportFormat,
    verbose: bool,
) -> Result<()> {
    let console = CliConsole::new(verbose);
    let eval_config = load_config(config.as_deref())?;
    let mut evaluator = Evaluator::new(eval_config);

    // Progress lines would corrupt JSON on stdout
    let show_progress = format != ReportFormat::Json;
    if show_progress {
        evaluator.set_progress_callback(Box::new(|progress: EvalProgress| {
            CliConsole::new(true).progress(progress.current, progress.total, &progress.message);
        }));
        console.info(&format!("Evaluating {}", target.display()));
    }

    let report = evaluator
        .run_evaluation(&target)
        .await
        .with_context(|| format!("Failed to evaluate {}", target.display()))?;

    println!("{}", generate_report(&report, format)?);

    if let Some(ref path) = output {
        write_report(&report, path).await?;
        if show_progress {
            console.success(&format!("Results saved to {}", path.display()));
        }
    }

    if show_progress {
        let gate = QualityGate::from_overall(report.scores.overall);
        let verdict = match gate {
            QualityGate::Pass => gate.label().green().bold(),
            QualityGate::ConditionalPass => gate.label().yellow().bold(),
            QualityGate::Fail => gate.label().red().bold(),
        };
        println!(
            "\nOverall QC score: {} ({})",
            colored_score(report.scores.overall),
            verdict
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_target_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(
            dir.path().join("nope.py"),
            None,
            None,
            ReportFormat::Json,
            false,
        )
        .await
        .unwrap_err();

        assert!(format!("{:#}", err).contains("not found"));
    }
}
