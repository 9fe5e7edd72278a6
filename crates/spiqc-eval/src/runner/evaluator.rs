//! Evaluation driver
//!
//! Loads a target, runs the four scorers and aggregates their scores.

use std::path::Path;

use tracing::Instrument;

use super::EvalConfig;
use crate::error::LoadError;
use crate::metrics::{Details, Dimension, DimensionResult, EvaluationReport};
use crate::scorers::{
    ConformanceScorer, CorrectnessScorer, EfficiencyScorer, Scorer, SecurityScorer,
};
use crate::target::{Target, TargetLoader};

/// Callback for progress updates during evaluation
pub type ProgressCallback = Box<dyn Fn(EvalProgress) + Send + Sync>;

/// Progress update during evaluation
#[derive(Debug, Clone)]
pub struct EvalProgress {
    /// Dimensions started so far, this one included
    pub current: usize,
    /// Total number of dimensions
    pub total: usize,
    pub dimension: Dimension,
    /// Status message
    pub message: String,
}

/// Runs evaluations with a fixed configuration
pub struct Evaluator {
    config: EvalConfig,
    progress_callback: Option<ProgressCallback>,
}

impl Evaluator {
    pub fn new(config: EvalConfig) -> Self {
        Self {
            config,
            progress_callback: None,
        }
    }

    /// Set progress callback
    pub fn set_progress_callback(&mut self, callback: ProgressCallback) {
        self.progress_callback = Some(callback);
    }

    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    /// Load and evaluate a target file
    ///
    /// Only load failures are returned as errors. Once the target is loaded
    /// the report is always complete.
    pub async fn run_evaluation(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<EvaluationReport, LoadError> {
        let path = path.as_ref();
        tracing::info!("starting evaluation of {}", path.display());

        let target = TargetLoader::new(&self.config).load(path).await?;
        Ok(self.evaluate_target(&target).await)
    }

    /// Evaluate an already loaded target
    pub async fn evaluate_target(&self, target: &Target) -> EvaluationReport {
        let correctness = CorrectnessScorer::new(self.config.cases.clone());
        let efficiency = EfficiencyScorer::new(
            self.config.profile.clone(),
            self.config.time_budget,
            self.config.memory_budget,
        );
        let security = SecurityScorer::new(self.config.penalty_per_issue);
        let conformance = ConformanceScorer::new(self.config.max_line_length);

        let details = if self.config.parallel {
            let (correctness, security, conformance) = tokio::join!(
                self.run_scorer(&correctness, target, 1),
                self.run_scorer(&security, target, 2),
                self.run_scorer(&conformance, target, 3),
            );
            // Timed alone so concurrent scorers do not skew measurements
            let efficiency = self.run_scorer(&efficiency, target, 4).await;
            Details {
                correctness,
                efficiency,
                security,
                conformance,
            }
        } else {
            Details {
                correctness: self.run_scorer(&correctness, target, 1).await,
                efficiency: self.run_scorer(&efficiency, target, 2).await,
                security: self.run_scorer(&security, target, 3).await,
                conformance: self.run_scorer(&conformance, target, 4).await,
            }
        };

        let report = EvaluationReport::assemble(details, &self.config.weights)
            .stamped(target.path().display().to_string());
        tracing::info!(
            "evaluation of {} finished: overall {:.3}",
            target.path().display(),
            report.scores.overall
        );
        report
    }

    async fn run_scorer<S: Scorer>(
        &self,
        scorer: &S,
        target: &Target,
        current: usize,
    ) -> DimensionResult<S::Detail> {
        let dimension = scorer.dimension();
        self.report_progress(
            current,
            dimension,
            format!("Evaluating {}...", dimension.display_name()),
        );

        let span = tracing::info_span!("dimension", name = dimension.name());
        let result = scorer.score(target).instrument(span).await;

        match result.error() {
            Some(error) => {
                tracing::warn!("{} fell back to {:.3}: {}", dimension, result.score, error)
            }
            None => tracing::info!("{} scored {:.3}", dimension, result.score),
        }
        result
    }

    fn report_progress(&self, current: usize, dimension: Dimension, message: String) {
        if let Some(ref callback) = self.progress_callback {
            callback(EvalProgress {
                current,
                total: Dimension::ALL.len(),
                dimension,
                message,
            });
        }
    }
}
