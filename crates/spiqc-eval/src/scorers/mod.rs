//! Dimension scorers
//!
//! Each scorer turns a [`Target`] into one [`DimensionResult`]. Scorers
//! never fail: internal errors become the dimension's fallback score with
//! an `error` detail.

mod cases;
mod conformance;
mod correctness;
mod efficiency;
mod security;

pub use cases::{ProfileOperation, TestCase, default_cases, default_profile};
pub use conformance::ConformanceScorer;
pub use correctness::CorrectnessScorer;
pub use efficiency::EfficiencyScorer;
pub use security::SecurityScorer;

use async_trait::async_trait;

use crate::metrics::{Dimension, DimensionResult};
use crate::target::Target;

/// Scores one dimension of a target
#[async_trait]
pub trait Scorer: Send + Sync {
    type Detail: Send;

    fn dimension(&self) -> Dimension;

    async fn score(&self, target: &Target) -> DimensionResult<Self::Detail>;
}

/// Record a recovered scorer failure
pub(crate) fn fallback<T>(dimension: Dimension, error: impl std::fmt::Display) -> DimensionResult<T> {
    let message = error.to_string();
    tracing::warn!("{} could not be assessed: {}", dimension, message);
    DimensionResult::failed(dimension, message)
}
