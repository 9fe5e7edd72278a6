//! Core types for evaluation results

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::aggregator::{Weights, combine};
use crate::syntax::DeclarationKind;
use crate::target::Operation;

/// One of the four scored dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Correctness,
    Efficiency,
    Security,
    Conformance,
}

impl Dimension {
    pub const ALL: [Dimension; 4] = [
        Dimension::Correctness,
        Dimension::Efficiency,
        Dimension::Security,
        Dimension::Conformance,
    ];

    /// Key used in reports
    pub fn name(&self) -> &'static str {
        match self {
            Dimension::Correctness => "correctness",
            Dimension::Efficiency => "efficiency",
            Dimension::Security => "security",
            Dimension::Conformance => "conformance",
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            Dimension::Correctness => "Correctness",
            Dimension::Efficiency => "Efficiency",
            Dimension::Security => "Security",
            Dimension::Conformance => "Conformance",
        }
    }

    /// Score substituted when the scorer could not run
    ///
    /// Efficiency and conformance fall back to a neutral 0.5 ("could not
    /// assess"); correctness and security to 0.0.
    pub fn fallback_score(&self) -> f64 {
        match self {
            Dimension::Correctness | Dimension::Security => 0.0,
            Dimension::Efficiency | Dimension::Conformance => 0.5,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Clamp into [0, 1], mapping NaN to 0
pub(crate) fn unit_interval(score: f64) -> f64 {
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 1.0)
    }
}

/// Dimension detail or the error that replaced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Outcome<T> {
    Failed { error: String },
    Assessed(T),
}

/// Result of scoring one dimension
///
/// Serializes flat: `{"score": .., <detail fields>}` or
/// `{"score": .., "error": ".."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionResult<T> {
    pub score: f64,
    #[serde(flatten)]
    pub outcome: Outcome<T>,
}

impl<T> DimensionResult<T> {
    pub fn assessed(score: f64, detail: T) -> Self {
        Self {
            score: unit_interval(score),
            outcome: Outcome::Assessed(detail),
        }
    }

    /// Error result carrying the dimension's fallback score
    pub fn failed(dimension: Dimension, error: impl Into<String>) -> Self {
        Self {
            score: dimension.fallback_score(),
            outcome: Outcome::Failed {
                error: error.into(),
            },
        }
    }

    pub fn detail(&self) -> Option<&T> {
        match &self.outcome {
            Outcome::Assessed(detail) => Some(detail),
            Outcome::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Failed { error } => Some(error),
            Outcome::Assessed(_) => None,
        }
    }
}

/// Correctness detail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrectnessDetail {
    pub passed: usize,
    pub total: usize,
    pub failed_tests: Vec<String>,
}

/// One measured call in the efficiency profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationSample {
    pub operation: Operation,
    /// Seconds spent in the call
    pub elapsed: f64,
    /// Peak bytes allocated during the call
    pub peak_memory: u64,
}

/// Efficiency detail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EfficiencyDetail {
    /// Seconds summed over successful calls
    pub total_time: f64,
    /// Largest per-call peak in bytes
    pub max_memory: u64,
    pub time_score: f64,
    pub memory_score: f64,
    #[serde(default)]
    pub samples: Vec<OperationSample>,
    #[serde(default)]
    pub failed_operations: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Which security signature matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecurityRule {
    DynamicExecution,
    UncheckedInputParsing,
    UncheckedDivision,
    BareExcept,
}

impl SecurityRule {
    pub const ALL: [SecurityRule; 4] = [
        SecurityRule::DynamicExecution,
        SecurityRule::UncheckedInputParsing,
        SecurityRule::UncheckedDivision,
        SecurityRule::BareExcept,
    ];

    pub fn message(&self) -> &'static str {
        match self {
            SecurityRule::DynamicExecution => "Use of eval/exec - code injection risk",
            SecurityRule::UncheckedInputParsing => "Potential integer overflow from user input",
            SecurityRule::UncheckedDivision => "Division without zero check",
            SecurityRule::BareExcept => "Bare except clause - may hide security issues",
        }
    }
}

/// A matched security signature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub rule: SecurityRule,
    pub message: String,
    /// 1-based line of the first match
    pub line: usize,
}

/// Security detail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityDetail {
    pub issues: Vec<String>,
    pub issue_count: usize,
    #[serde(default)]
    pub findings: Vec<Finding>,
}

/// A declaration whose name breaks the naming convention
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamingViolation {
    pub kind: DeclarationKind,
    pub name: String,
    pub line: usize,
}

/// Conformance detail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConformanceDetail {
    pub documentation_coverage: f64,
    pub line_length_score: f64,
    pub naming_score: f64,
    pub long_lines: usize,
    pub naming_issues: usize,
    #[serde(default)]
    pub total_lines: usize,
    #[serde(default)]
    pub declarations: usize,
    #[serde(default)]
    pub naming_violations: Vec<NamingViolation>,
}

/// Headline scores
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scores {
    pub correctness: f64,
    pub efficiency: f64,
    pub security: f64,
    pub conformance: f64,
    pub overall: f64,
}

impl Scores {
    pub fn get(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Correctness => self.correctness,
            Dimension::Efficiency => self.efficiency,
            Dimension::Security => self.security,
            Dimension::Conformance => self.conformance,
        }
    }
}

/// Per-dimension details
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Details {
    pub correctness: DimensionResult<CorrectnessDetail>,
    pub efficiency: DimensionResult<EfficiencyDetail>,
    pub security: DimensionResult<SecurityDetail>,
    pub conformance: DimensionResult<ConformanceDetail>,
}

impl Details {
    /// Error recorded for a dimension, if it fell back
    pub fn error(&self, dimension: Dimension) -> Option<&str> {
        match dimension {
            Dimension::Correctness => self.correctness.error(),
            Dimension::Efficiency => self.efficiency.error(),
            Dimension::Security => self.security.error(),
            Dimension::Conformance => self.conformance.error(),
        }
    }
}

/// Structured result of one evaluation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub scores: Scores,
    pub details: Details,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluator_version: Option<String>,
}

impl EvaluationReport {
    /// Combine four dimension results into a report
    pub fn assemble(details: Details, weights: &Weights) -> Self {
        let correctness = details.correctness.score;
        let efficiency = details.efficiency.score;
        let security = details.security.score;
        let conformance = details.conformance.score;

        let overall = combine(
            [
                (Dimension::Correctness, correctness),
                (Dimension::Efficiency, efficiency),
                (Dimension::Security, security),
                (Dimension::Conformance, conformance),
            ],
            weights,
        );

        Self {
            scores: Scores {
                correctness,
                efficiency,
                security,
                conformance,
                overall,
            },
            details,
            target: None,
            generated_at: None,
            evaluator_version: None,
        }
    }

    /// Attach the target path and generation metadata
    pub fn stamped(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self.generated_at = Some(Utc::now());
        self.evaluator_version = Some(env!("CARGO_PKG_VERSION").to_string());
        self
    }

    pub fn security_issue_count(&self) -> Option<usize> {
        self.details.security.detail().map(|d| d.issues.len())
    }

    pub fn documentation_coverage(&self) -> Option<f64> {
        self.details
            .conformance
            .detail()
            .map(|d| d.documentation_coverage)
    }
}
