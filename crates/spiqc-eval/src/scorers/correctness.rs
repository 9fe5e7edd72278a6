//! Correctness scoring against literal test cases

use async_trait::async_trait;

use super::{Scorer, TestCase, fallback};
use crate::metrics::{CorrectnessDetail, Dimension, DimensionResult};
use crate::target::{Reply, Target};

/// Runs every case against a fresh unit; score is the pass ratio
pub struct CorrectnessScorer {
    cases: Vec<TestCase>,
}

impl CorrectnessScorer {
    pub fn new(cases: Vec<TestCase>) -> Self {
        Self { cases }
    }
}

#[async_trait]
impl Scorer for CorrectnessScorer {
    type Detail = CorrectnessDetail;

    fn dimension(&self) -> Dimension {
        Dimension::Correctness
    }

    async fn score(&self, target: &Target) -> DimensionResult<CorrectnessDetail> {
        if self.cases.is_empty() {
            return fallback(Dimension::Correctness, "no test cases configured");
        }

        let mut unit = match target.instantiate().await {
            Ok(unit) => unit,
            Err(e) => return fallback(Dimension::Correctness, e),
        };

        let mut passed = 0;
        let mut failed_tests = Vec::new();

        for case in &self.cases {
            // A broken unit fails this case only; the next call relaunches it
            let failure = match unit.invoke(case.op, &[case.a.as_str(), case.b.as_str()]).await {
                Ok(probe) => match probe.reply {
                    Reply::Text(ref got) if *got == case.expected => None,
                    Reply::Raised(message) => Some(case.exception(&message)),
                    other => Some(case.mismatch(other.display_value())),
                },
                Err(e) => Some(case.exception(&e.to_string())),
            };

            match failure {
                None => {
                    tracing::debug!("{} passed", case.call());
                    passed += 1;
                }
                Some(description) => {
                    tracing::debug!("{}", description);
                    failed_tests.push(description);
                }
            }
        }

        let total = self.cases.len();
        DimensionResult::assessed(
            passed as f64 / total as f64,
            CorrectnessDetail {
                passed,
                total,
                failed_tests,
            },
        )
    }
}
