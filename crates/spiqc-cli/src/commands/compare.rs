//! Compare two versions of a target

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::*;
use spiqc_eval::report::read_report;
use spiqc_eval::{EvalConfig, EvaluationReport, Evaluator, compare_reports, render_comparison};

use super::load_config;
use crate::console::CliConsole;

/// Compare a baseline against a candidate
///
/// Each side is either a saved JSON report or a target to evaluate now.
pub async fn run(
    baseline: PathBuf,
    candidate: PathBuf,
    config: Option<PathBuf>,
    verbose: bool,
) -> Result<()> {
    let console = CliConsole::new(verbose);
    let eval_config = load_config(config.as_deref())?;

    let baseline_report = load_or_evaluate(&baseline, &eval_config, &console).await?;
    let candidate_report = load_or_evaluate(&candidate, &eval_config, &console).await?;

    let comparison = compare_reports(&baseline_report, &candidate_report);
    println!("{}", render_comparison(&comparison));

    if comparison.has_regressions() {
        console.warn(&format!(
            "{} regression(s) in {}",
            comparison.regressions.len(),
            comparison.candidate_name
        ));
    } else {
        println!("{}", "No regressions against the baseline.".green());
    }

    Ok(())
}

/// Read a `.json` report, or evaluate anything else as a target
pub async fn load_or_evaluate(
    path: &Path,
    config: &EvalConfig,
    console: &CliConsole,
) -> Result<EvaluationReport> {
    let is_report = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_report {
        console.info(&format!("Loading report {}", path.display()));
        return read_report(path).await;
    }

    console.info(&format!("Evaluating {}", path.display()));
    Evaluator::new(config.clone())
        .run_evaluation(path)
        .await
        .with_context(|| format!("Failed to evaluate {}", path.display()))
}
