//! SPI-QC code quality evaluator
//!
//! Scores a calculator target along four independent dimensions and fuses
//! them into a single overall score with a weighted harmonic mean.
//!
//! # Dimensions
//!
//! - **Correctness**: a fixed table of input/expected-output cases
//! - **Efficiency**: wall time and peak memory over representative calls
//! - **Security**: lexical signatures of unsafe constructs
//! - **Conformance**: docstrings, line length and naming over the syntax tree
//!
//! Targets are Python sources exposing a calculator class. The executable
//! unit runs in a child interpreter behind a JSON-line protocol, so a target
//! that hangs or crashes only costs the dimension that was probing it.
//!
//! # Example
//!
//! ```rust,ignore
//! use spiqc_eval::{EvalConfig, Evaluator};
//!
//! let evaluator = Evaluator::new(EvalConfig::default());
//! let report = evaluator.run_evaluation("binary_calculator.py").await?;
//! println!("overall: {:.3}", report.scores.overall);
//! ```

pub mod compare;
pub mod error;
pub mod metrics;
pub mod report;
pub mod runner;
pub mod scorers;
pub mod syntax;
pub mod target;

use std::path::Path;

// Re-exports for convenience
pub use compare::{ReportComparison, compare_reports, render_comparison};
pub use error::{ConfigError, LoadError, SyntaxError, UnitError};
pub use metrics::{Dimension, DimensionResult, EvaluationReport, Scores, Weights};
pub use report::{ReportFormat, generate_report};
pub use runner::{EvalConfig, EvalProgress, Evaluator, ProgressCallback};
pub use target::{CalculatorUnit, Operation, Target, TargetLoader, UnitLauncher};

/// Evaluate a target with the default configuration
pub async fn run_evaluation(path: impl AsRef<Path>) -> Result<EvaluationReport, LoadError> {
    Evaluator::new(EvalConfig::default())
        .run_evaluation(path)
        .await
}
