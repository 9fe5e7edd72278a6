//! Result types and score aggregation
//!
//! This module holds the report model shared by the scorers, the renderers
//! and the comparison tooling.

mod aggregator;
mod types;

pub use aggregator::{EPSILON, Weights, combine};
pub use types::{
    ConformanceDetail, CorrectnessDetail, Details, Dimension, DimensionResult, EfficiencyDetail,
    EvaluationReport, Finding, NamingViolation, OperationSample, Outcome, Scores, SecurityDetail,
    SecurityRule,
};
