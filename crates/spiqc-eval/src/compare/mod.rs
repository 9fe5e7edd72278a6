//! Side-by-side comparison of two evaluation reports

mod regression;

pub use regression::{Regression, RegressionConfig, RegressionDetector, RegressionType};

use serde::{Deserialize, Serialize};

use crate::metrics::{Dimension, EvaluationReport};

/// One compared score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRow {
    /// Dimension key, or `"overall"`
    pub metric: String,
    pub baseline: f64,
    pub candidate: f64,
    /// `candidate - baseline`
    pub delta: f64,
}

/// Result of comparing a candidate report against a baseline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportComparison {
    pub baseline_name: String,
    pub candidate_name: String,
    pub rows: Vec<ScoreRow>,
    /// Name of the version with the higher overall score; ties go to the candidate
    pub better: String,
    /// Absolute difference between the overall scores
    pub margin: f64,
    pub baseline_security_issues: Option<usize>,
    pub candidate_security_issues: Option<usize>,
    pub baseline_documentation: Option<f64>,
    pub candidate_documentation: Option<f64>,
    pub regressions: Vec<Regression>,
}

impl ReportComparison {
    /// Regressions were found
    pub fn has_regressions(&self) -> bool {
        !self.regressions.is_empty()
    }

    pub fn row(&self, metric: &str) -> Option<&ScoreRow> {
        self.rows.iter().find(|r| r.metric == metric)
    }
}

/// Compare two reports, naming each side after its target path
pub fn compare_reports(baseline: &EvaluationReport, candidate: &EvaluationReport) -> ReportComparison {
    let baseline_name = baseline.target.clone().unwrap_or_else(|| "baseline".to_string());
    let mut candidate_name = candidate
        .target
        .clone()
        .unwrap_or_else(|| "candidate".to_string());
    if candidate_name == baseline_name {
        candidate_name = format!("{} (candidate)", candidate_name);
    }
    compare_named(
        &baseline_name,
        baseline,
        &candidate_name,
        candidate,
        &RegressionDetector::with_defaults(),
    )
}

/// Compare two reports under explicit names with a custom detector
pub fn compare_named(
    baseline_name: &str,
    baseline: &EvaluationReport,
    candidate_name: &str,
    candidate: &EvaluationReport,
    detector: &RegressionDetector,
) -> ReportComparison {
    let mut rows: Vec<ScoreRow> = Dimension::ALL
        .iter()
        .map(|d| score_row(d.name(), baseline.scores.get(*d), candidate.scores.get(*d)))
        .collect();
    rows.push(score_row(
        "overall",
        baseline.scores.overall,
        candidate.scores.overall,
    ));

    let (better, margin) = if baseline.scores.overall > candidate.scores.overall {
        (
            baseline_name,
            baseline.scores.overall - candidate.scores.overall,
        )
    } else {
        (
            candidate_name,
            candidate.scores.overall - baseline.scores.overall,
        )
    };

    let regressions = detector.detect(baseline, candidate);
    tracing::debug!(
        "compared {} with {}: {} regression(s)",
        baseline_name,
        candidate_name,
        regressions.len()
    );

    ReportComparison {
        baseline_name: baseline_name.to_string(),
        candidate_name: candidate_name.to_string(),
        rows,
        better: better.to_string(),
        margin,
        baseline_security_issues: baseline.security_issue_count(),
        candidate_security_issues: candidate.security_issue_count(),
        baseline_documentation: baseline.documentation_coverage(),
        candidate_documentation: candidate.documentation_coverage(),
        regressions,
    }
}

fn score_row(metric: &str, baseline: f64, candidate: f64) -> ScoreRow {
    ScoreRow {
        metric: metric.to_string(),
        baseline,
        candidate,
        delta: candidate - baseline,
    }
}

/// Render a comparison as a plain-text table
pub fn render_comparison(comparison: &ReportComparison) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "\nCOMPARISON: {} vs {}\n",
        comparison.baseline_name, comparison.candidate_name
    ));
    output.push_str(&format!("{:=<60}\n", ""));
    output.push_str(&format!(
        "{:<12} {:>10} {:>10} {:>12}\n",
        "Dimension", "Baseline", "Candidate", "Difference"
    ));
    output.push_str(&format!("{:-<60}\n", ""));
    for row in &comparison.rows {
        output.push_str(&format!(
            "{:<12} {:>10.3} {:>10.3} {:>+12.3}\n",
            title_case(&row.metric),
            row.baseline,
            row.candidate,
            row.delta
        ));
    }

    output.push_str("\nANALYSIS\n");
    output.push_str(&format!("{:-<30}\n", ""));
    output.push_str(&format!(
        "Better version: {} (by {:.3} points)\n",
        comparison.better, comparison.margin
    ));
    if let (Some(before), Some(after)) = (
        comparison.baseline_security_issues,
        comparison.candidate_security_issues,
    ) {
        output.push_str(&format!(
            "Security issues: {} has {}, {} has {}\n",
            comparison.baseline_name, before, comparison.candidate_name, after
        ));
    }
    if let (Some(before), Some(after)) = (
        comparison.baseline_documentation,
        comparison.candidate_documentation,
    ) {
        output.push_str(&format!(
            "Documentation: {} has {:.1}%, {} has {:.1}%\n",
            comparison.baseline_name,
            before * 100.0,
            comparison.candidate_name,
            after * 100.0
        ));
    }

    output.push('\n');
    output.push_str(&RegressionDetector::summarize(&comparison.regressions));
    output
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::fixtures::sample_report;

    #[test]
    fn test_rows_and_deltas() {
        let baseline = sample_report(0);
        let candidate = sample_report(2);
        let comparison = compare_reports(&baseline, &candidate);

        assert_eq!(comparison.rows.len(), 5);
        let security = comparison.row("security").unwrap();
        assert_eq!(security.baseline, 1.0);
        assert!((security.delta + 0.4).abs() < 1e-9);
        assert!(comparison.row("overall").unwrap().delta < 0.0);
    }

    #[test]
    fn test_better_version_and_counts() {
        let comparison = compare_reports(&sample_report(0), &sample_report(3));

        assert_eq!(comparison.baseline_name, "calc.py");
        assert_eq!(comparison.candidate_name, "calc.py (candidate)");
        assert_eq!(comparison.better, "calc.py");
        assert!(comparison.margin > 0.0);
        assert_eq!(comparison.baseline_security_issues, Some(0));
        assert_eq!(comparison.candidate_security_issues, Some(3));
        assert!(comparison.has_regressions());
    }

    #[test]
    fn test_tie_goes_to_candidate() {
        let report = sample_report(1);
        let comparison = compare_named(
            "Reference",
            &report,
            "Flawed",
            &report,
            &RegressionDetector::with_defaults(),
        );
        assert_eq!(comparison.better, "Flawed");
        assert_eq!(comparison.margin, 0.0);
        assert!(!comparison.has_regressions());
    }

    #[test]
    fn test_render_comparison() {
        let comparison = compare_named(
            "Reference",
            &sample_report(0),
            "Flawed",
            &sample_report(1),
            &RegressionDetector::with_defaults(),
        );
        let text = render_comparison(&comparison);

        assert!(text.contains("COMPARISON: Reference vs Flawed"));
        assert!(text.contains("Security          1.000      0.800       -0.200"));
        assert!(text.contains("Better version: Reference"));
        assert!(text.contains("Security issues: Reference has 0, Flawed has 1"));
        assert!(text.contains("regression(s):"));
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("overall"), "Overall");
        assert_eq!(title_case(""), "");
    }
}
