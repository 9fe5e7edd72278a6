//! Markdown report generation

use anyhow::Result;

use super::{QualityGate, grade_mark, recommendations};
use crate::metrics::{Dimension, EvaluationReport};

/// Markdown report generator
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Generate a Markdown report
    pub fn generate(report: &EvaluationReport) -> Result<String> {
        let scores = &report.scores;
        let details = &report.details;
        let mut md = String::new();

        md.push_str("# SPI-QC Evaluation Report\n\n");

        md.push_str("## Overview\n\n");
        if let Some(ref target) = report.target {
            md.push_str(&format!("- **Target**: `{}`\n", target));
        }
        if let Some(ref version) = report.evaluator_version {
            md.push_str(&format!("- **Evaluator Version**: {}\n", version));
        }
        if let Some(ref generated_at) = report.generated_at {
            md.push_str(&format!(
                "- **Timestamp**: {}\n",
                generated_at.format("%Y-%m-%d %H:%M:%S UTC")
            ));
        }
        let gate = QualityGate::from_overall(scores.overall);
        md.push_str(&format!("- **Overall Score**: {:.3}\n", scores.overall));
        md.push_str(&format!("- **Quality Gate**: {}\n\n", gate));

        md.push_str("## Scores\n\n");
        md.push_str("| Dimension | Score | Grade |\n|-----------|-------|-------|\n");
        for dimension in Dimension::ALL {
            let score = scores.get(dimension);
            md.push_str(&format!(
                "| {} | {:.3} | {} |\n",
                dimension.display_name(),
                score,
                grade_mark(score)
            ));
        }
        md.push_str(&format!("| **Overall** | **{:.3}** | |\n\n", scores.overall));

        md.push_str("## Details\n\n");

        md.push_str("### Correctness\n\n");
        if let Some(detail) = details.correctness.detail() {
            md.push_str(&format!(
                "{}/{} test cases passed.\n\n",
                detail.passed, detail.total
            ));
            for test in &detail.failed_tests {
                md.push_str(&format!("- ❌ `{}`\n", test));
            }
            if !detail.failed_tests.is_empty() {
                md.push('\n');
            }
        }

        md.push_str("### Efficiency\n\n");
        if let Some(detail) = details.efficiency.detail() {
            md.push_str("| Metric | Value |\n|--------|-------|\n");
            md.push_str(&format!("| Total Time | {:.6}s |\n", detail.total_time));
            md.push_str(&format!(
                "| Peak Memory | {} bytes |\n",
                super::thousands(detail.max_memory)
            ));
            md.push_str(&format!("| Time Score | {:.3} |\n", detail.time_score));
            md.push_str(&format!("| Memory Score | {:.3} |\n\n", detail.memory_score));
            if let Some(ref note) = detail.note {
                md.push_str(&format!("> {}\n\n", note));
            }
        }

        md.push_str("### Security\n\n");
        if let Some(detail) = details.security.detail() {
            if detail.findings.is_empty() && detail.issues.is_empty() {
                md.push_str("No security issues detected.\n\n");
            } else if detail.findings.len() == detail.issues.len() {
                md.push_str("| Line | Issue |\n|------|-------|\n");
                for finding in &detail.findings {
                    md.push_str(&format!("| {} | {} |\n", finding.line, finding.message));
                }
                md.push('\n');
            } else {
                for issue in &detail.issues {
                    md.push_str(&format!("- ⚠️ {}\n", issue));
                }
                md.push('\n');
            }
        }

        md.push_str("### Conformance\n\n");
        if let Some(detail) = details.conformance.detail() {
            md.push_str("| Check | Compliance |\n|-------|------------|\n");
            md.push_str(&format!(
                "| Documentation | {:.1}% |\n",
                detail.documentation_coverage * 100.0
            ));
            md.push_str(&format!(
                "| Line Length | {:.1}% ({} long) |\n",
                detail.line_length_score * 100.0,
                detail.long_lines
            ));
            md.push_str(&format!(
                "| Naming | {:.1}% ({} violations) |\n\n",
                detail.naming_score * 100.0,
                detail.naming_issues
            ));
        }

        // Dimensions that fell back
        let errors: Vec<_> = Dimension::ALL
            .iter()
            .filter_map(|d| details.error(*d).map(|e| (*d, e)))
            .collect();
        if !errors.is_empty() {
            md.push_str("## Errors\n\n");
            for (dimension, error) in errors {
                md.push_str(&format!(
                    "- **{}** (fallback {:.1}): {}\n",
                    dimension.display_name(),
                    dimension.fallback_score(),
                    error
                ));
            }
            md.push('\n');
        }

        md.push_str("## Recommendations\n\n");
        for advice in recommendations(scores) {
            md.push_str(&format!("- {}\n", advice));
        }

        Ok(md)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::fixtures::sample_report;

    #[test]
    fn test_markdown_generation() {
        let md = MarkdownReporter::generate(&sample_report(1)).unwrap();

        assert!(md.contains("# SPI-QC Evaluation Report"));
        assert!(md.contains("- **Target**: `calc.py`"));
        assert!(md.contains("| Correctness | 0.857 | ⚠ |"));
        assert!(md.contains("6/7 test cases passed."));
        assert!(md.contains("| 12 | Division without zero check |"));
        assert!(md.contains("## Errors"));
        assert!(md.contains("- **Conformance** (fallback 0.5): Invalid syntax at line 3"));
    }

    #[test]
    fn test_markdown_without_errors_omits_section() {
        use crate::metrics::{ConformanceDetail, DimensionResult};

        let mut report = sample_report(0);
        report.details.conformance = DimensionResult::assessed(
            1.0,
            ConformanceDetail {
                documentation_coverage: 1.0,
                line_length_score: 1.0,
                naming_score: 1.0,
                long_lines: 0,
                naming_issues: 0,
                total_lines: 40,
                declarations: 6,
                naming_violations: Vec::new(),
            },
        );
        let md = MarkdownReporter::generate(&report).unwrap();
        assert!(md.contains("No security issues detected."));
        assert!(md.contains("| Documentation | 100.0% |"));
        assert!(!md.contains("## Errors"));
    }
}
