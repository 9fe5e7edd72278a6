//! Efficiency scoring from per-call time and memory

use std::time::{Duration, Instant};

use async_trait::async_trait;

use super::{ProfileOperation, Scorer, fallback};
use crate::metrics::{Dimension, DimensionResult, EfficiencyDetail, OperationSample};
use crate::target::{Reply, Target};

const FAILED_CALLS_NOTE: &str =
    "failed calls are excluded from total_time and max_memory";

/// Budgets a run is normalized against
#[derive(Debug, Clone, Copy)]
struct Budgets {
    time: Duration,
    memory: u64,
}

/// Times each profile operation against a fresh unit
///
/// `time_score = max(0, 1 - total / time_budget)` and
/// `memory_score = max(0, 1 - peak / memory_budget)`; the score is their mean.
pub struct EfficiencyScorer {
    profile: Vec<ProfileOperation>,
    budgets: Budgets,
}

impl EfficiencyScorer {
    pub fn new(profile: Vec<ProfileOperation>, time_budget: Duration, memory_budget: u64) -> Self {
        Self {
            profile,
            budgets: Budgets {
                time: time_budget,
                memory: memory_budget,
            },
        }
    }

    fn time_score(&self, total: Duration) -> f64 {
        let budget = self.budgets.time.as_secs_f64();
        if budget <= 0.0 {
            return 0.0;
        }
        (1.0 - total.as_secs_f64() / budget).max(0.0)
    }

    fn memory_score(&self, peak: u64) -> f64 {
        if self.budgets.memory == 0 {
            return 0.0;
        }
        (1.0 - peak as f64 / self.budgets.memory as f64).max(0.0)
    }
}

#[async_trait]
impl Scorer for EfficiencyScorer {
    type Detail = EfficiencyDetail;

    fn dimension(&self) -> Dimension {
        Dimension::Efficiency
    }

    async fn score(&self, target: &Target) -> DimensionResult<EfficiencyDetail> {
        let mut unit = match target.instantiate().await {
            Ok(unit) => unit,
            Err(e) => return fallback(Dimension::Efficiency, e),
        };

        let mut total = Duration::ZERO;
        let mut max_memory = 0u64;
        let mut samples = Vec::with_capacity(self.profile.len());
        let mut failed_operations = Vec::new();

        for operation in &self.profile {
            let started = Instant::now();
            let outcome = unit
                .invoke(operation.op, &[operation.a.as_str(), operation.b.as_str()])
                .await;
            let wall = started.elapsed();

            let probe = match outcome {
                Ok(probe) => probe,
                Err(e) => {
                    failed_operations.push(format!("{}: {}", operation.call(), e));
                    continue;
                }
            };
            if let Reply::Raised(message) = &probe.reply {
                failed_operations.push(format!("{}: exception - {}", operation.call(), message));
                continue;
            }

            let elapsed = probe.elapsed.unwrap_or(wall);
            let peak_memory = probe.peak_memory.unwrap_or(0);
            tracing::debug!(
                "{} took {:?}, peak {} bytes",
                operation.call(),
                elapsed,
                peak_memory
            );

            total += elapsed;
            max_memory = max_memory.max(peak_memory);
            samples.push(OperationSample {
                operation: operation.op,
                elapsed: elapsed.as_secs_f64(),
                peak_memory,
            });
        }

        let time_score = self.time_score(total);
        let memory_score = self.memory_score(max_memory);
        let note = (!failed_operations.is_empty()).then(|| FAILED_CALLS_NOTE.to_string());

        DimensionResult::assessed(
            (time_score + memory_score) / 2.0,
            EfficiencyDetail {
                total_time: total.as_secs_f64(),
                max_memory,
                time_score,
                memory_score,
                samples,
                failed_operations,
                note,
            },
        )
    }
}
