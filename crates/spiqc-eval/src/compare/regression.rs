//! Regression detection between two evaluation reports
//!
//! Flags score drops, new security findings and lost documentation in a
//! candidate relative to its baseline.

use serde::{Deserialize, Serialize};

use crate::metrics::{Dimension, EvaluationReport, SecurityRule};

/// A detected regression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Regression {
    /// Type of regression
    pub regression_type: RegressionType,

    /// Dimension the regression belongs to; `None` for the overall score
    pub dimension: Option<Dimension>,

    /// Description of the regression
    pub description: String,

    /// Baseline value
    pub baseline_value: String,

    /// Candidate value
    pub current_value: String,

    /// Severity (0.0 - 1.0)
    pub severity: f64,
}

/// Type of regression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegressionType {
    /// A dimension or overall score decreased
    ScoreDecrease,
    /// More security findings than the baseline
    NewSecurityFindings,
    /// Documentation coverage decreased
    DocumentationDecrease,
}

/// Regression detector configuration
#[derive(Debug, Clone)]
pub struct RegressionConfig {
    /// Largest score drop that is still tolerated (e.g., 0.05)
    pub score_threshold: f64,

    /// Largest documentation coverage drop that is still tolerated
    pub documentation_threshold: f64,
}

impl Default for RegressionConfig {
    fn default() -> Self {
        Self {
            score_threshold: 0.05,
            documentation_threshold: 0.05,
        }
    }
}

/// Detector for finding regressions between evaluation reports
pub struct RegressionDetector {
    config: RegressionConfig,
}

impl RegressionDetector {
    pub fn new(config: RegressionConfig) -> Self {
        Self { config }
    }

    /// Create with default configuration
    pub fn with_defaults() -> Self {
        Self::new(RegressionConfig::default())
    }

    /// Compare a candidate report against its baseline
    pub fn detect(
        &self,
        baseline: &EvaluationReport,
        candidate: &EvaluationReport,
    ) -> Vec<Regression> {
        let mut regressions = Vec::new();

        for dimension in Dimension::ALL {
            if let Some(reg) = self.check_score(
                Some(dimension),
                baseline.scores.get(dimension),
                candidate.scores.get(dimension),
            ) {
                regressions.push(reg);
            }
        }
        if let Some(reg) =
            self.check_score(None, baseline.scores.overall, candidate.scores.overall)
        {
            regressions.push(reg);
        }

        if let Some(reg) = self.check_security(baseline, candidate) {
            regressions.push(reg);
        }
        if let Some(reg) = self.check_documentation(baseline, candidate) {
            regressions.push(reg);
        }

        regressions
    }

    fn check_score(
        &self,
        dimension: Option<Dimension>,
        baseline: f64,
        current: f64,
    ) -> Option<Regression> {
        let drop = baseline - current;
        if drop <= self.config.score_threshold {
            return None;
        }

        let label = dimension.map_or("Overall", |d| d.display_name());
        Some(Regression {
            regression_type: RegressionType::ScoreDecrease,
            dimension,
            description: format!(
                "{} score decreased from {:.3} to {:.3}",
                label, baseline, current
            ),
            baseline_value: format!("{:.3}", baseline),
            current_value: format!("{:.3}", current),
            severity: (drop / baseline.max(0.01)).min(1.0),
        })
    }

    fn check_security(
        &self,
        baseline: &EvaluationReport,
        candidate: &EvaluationReport,
    ) -> Option<Regression> {
        let before = baseline.security_issue_count()?;
        let after = candidate.security_issue_count()?;
        if after <= before {
            return None;
        }

        let added = after - before;
        Some(Regression {
            regression_type: RegressionType::NewSecurityFindings,
            dimension: Some(Dimension::Security),
            description: format!("{} new security finding(s)", added),
            baseline_value: before.to_string(),
            current_value: after.to_string(),
            severity: (added as f64 / SecurityRule::ALL.len() as f64).min(1.0),
        })
    }

    fn check_documentation(
        &self,
        baseline: &EvaluationReport,
        candidate: &EvaluationReport,
    ) -> Option<Regression> {
        let before = baseline.documentation_coverage()?;
        let after = candidate.documentation_coverage()?;
        let drop = before - after;
        if drop <= self.config.documentation_threshold {
            return None;
        }

        Some(Regression {
            regression_type: RegressionType::DocumentationDecrease,
            dimension: Some(Dimension::Conformance),
            description: format!(
                "Documentation coverage decreased from {:.1}% to {:.1}%",
                before * 100.0,
                after * 100.0
            ),
            baseline_value: format!("{:.1}%", before * 100.0),
            current_value: format!("{:.1}%", after * 100.0),
            severity: (drop / before.max(0.01)).min(1.0),
        })
    }

    /// Generate a summary of regressions
    pub fn summarize(regressions: &[Regression]) -> String {
        if regressions.is_empty() {
            return "No regressions detected.".to_string();
        }

        let mut summary = format!("Found {} regression(s):\n", regressions.len());
        for (i, reg) in regressions.iter().enumerate() {
            summary.push_str(&format!(
                "  {}. [{:?}] {} (severity: {:.0}%)\n",
                i + 1,
                reg.regression_type,
                reg.description,
                reg.severity * 100.0
            ));
        }
        summary
    }
}
