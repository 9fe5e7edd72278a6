//! Evaluation runner components
//!
//! Configuration and the evaluator that drives the scorers.

mod config;
mod evaluator;

pub use config::EvalConfig;
pub use evaluator::{EvalProgress, Evaluator, ProgressCallback};
