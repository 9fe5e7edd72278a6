//! Report generation for evaluation results
//!
//! Renders an [`EvaluationReport`] as a terminal table, Markdown or JSON.

mod advice;
mod json;
mod markdown;

pub use advice::{ACCEPTABLE, GOOD, QualityGate, grade_mark, recommendations};
pub use json::{JsonReporter, read_report, write_report};
pub use markdown::MarkdownReporter;

use std::fmt;
use std::str::FromStr;

use anyhow::Result;

use crate::metrics::{Dimension, EvaluationReport};

/// Report format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Table,
    Markdown,
    Json,
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" | "text" => Ok(ReportFormat::Table),
            "markdown" | "md" => Ok(ReportFormat::Markdown),
            "json" => Ok(ReportFormat::Json),
            other => Err(format!(
                "unknown report format '{}' (expected table, markdown or json)",
                other
            )),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ReportFormat::Table => "table",
            ReportFormat::Markdown => "markdown",
            ReportFormat::Json => "json",
        })
    }
}

/// Generate a report in the specified format
pub fn generate_report(report: &EvaluationReport, format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Json => JsonReporter::generate(report),
        ReportFormat::Markdown => MarkdownReporter::generate(report),
        ReportFormat::Table => generate_table(report),
    }
}

/// Detailed plain-text report for terminal output
fn generate_table(report: &EvaluationReport) -> Result<String> {
    let scores = &report.scores;
    let details = &report.details;
    let mut output = String::new();

    output.push_str(&format!("\n{:=<60}\n", "= SPI-QC Evaluation Report "));
    if let Some(ref target) = report.target {
        output.push_str(&format!("Target: {}\n", target));
    }
    if let Some(ref generated_at) = report.generated_at {
        output.push_str(&format!(
            "Generated: {}\n",
            generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
    }
    output.push_str(&format!("{:=<60}\n\n", ""));

    output.push_str(&format!("OVERALL QC SCORE: {:.3}\n", scores.overall));
    output.push_str("(Weighted harmonic mean of all dimensions)\n\n");

    output.push_str("DIMENSION SCORES\n");
    output.push_str(&format!("{:-<40}\n", ""));
    for dimension in Dimension::ALL {
        let score = scores.get(dimension);
        output.push_str(&format!(
            "{:<12}: {:.3} {}\n",
            dimension.display_name(),
            score,
            grade_mark(score)
        ));
    }

    output.push_str("\nDETAILED ANALYSIS\n");
    output.push_str(&format!("{:=<60}\n", ""));

    // Correctness
    output.push_str(&section_header(1, Dimension::Correctness, scores.correctness));
    if let Some(detail) = details.correctness.detail() {
        output.push_str(&format!("Tests passed: {}/{}\n", detail.passed, detail.total));
        if detail.failed_tests.is_empty() {
            output.push_str("  ✓ All tests passed!\n");
        } else {
            output.push_str("Failed tests:\n");
            for test in &detail.failed_tests {
                output.push_str(&format!("  ✗ {}\n", test));
            }
        }
    }
    push_error(&mut output, details.correctness.error());

    // Efficiency
    output.push_str(&section_header(2, Dimension::Efficiency, scores.efficiency));
    if let Some(detail) = details.efficiency.detail() {
        output.push_str(&format!(
            "Total execution time: {:.6}s\n",
            detail.total_time
        ));
        output.push_str(&format!(
            "Peak memory usage: {} bytes\n",
            thousands(detail.max_memory)
        ));
        output.push_str(&format!("Time performance: {:.3}\n", detail.time_score));
        output.push_str(&format!("Memory performance: {:.3}\n", detail.memory_score));
        for failed in &detail.failed_operations {
            output.push_str(&format!("  ✗ {}\n", failed));
        }
        if let Some(ref note) = detail.note {
            output.push_str(&format!("  ⚠ {}\n", note));
        }
    }
    push_error(&mut output, details.efficiency.error());

    // Security
    output.push_str(&section_header(3, Dimension::Security, scores.security));
    if let Some(detail) = details.security.detail() {
        if detail.issues.is_empty() {
            output.push_str("  ✓ No security issues detected!\n");
        } else {
            output.push_str(&format!(
                "Security issues found ({}):\n",
                detail.issues.len()
            ));
            if detail.findings.len() == detail.issues.len() {
                for finding in &detail.findings {
                    output.push_str(&format!(
                        "  ⚠ {} (line {})\n",
                        finding.message, finding.line
                    ));
                }
            } else {
                for issue in &detail.issues {
                    output.push_str(&format!("  ⚠ {}\n", issue));
                }
            }
        }
    }
    push_error(&mut output, details.security.error());

    // Conformance
    output.push_str(&section_header(4, Dimension::Conformance, scores.conformance));
    if let Some(detail) = details.conformance.detail() {
        output.push_str(&format!(
            "Documentation coverage: {:.1}%\n",
            detail.documentation_coverage * 100.0
        ));
        output.push_str(&format!(
            "Line length compliance: {:.1}%\n",
            detail.line_length_score * 100.0
        ));
        output.push_str(&format!(
            "Naming convention compliance: {:.1}%\n",
            detail.naming_score * 100.0
        ));
        if detail.long_lines > 0 {
            output.push_str(&format!(
                "  ⚠ {} lines exceed the line length limit\n",
                detail.long_lines
            ));
        }
        if detail.naming_issues > 0 {
            output.push_str(&format!(
                "  ⚠ {} naming convention violations\n",
                detail.naming_issues
            ));
            for violation in &detail.naming_violations {
                output.push_str(&format!(
                    "    - {} '{}' (line {})\n",
                    violation.kind, violation.name, violation.line
                ));
            }
        }
    }
    push_error(&mut output, details.conformance.error());

    output.push_str("\nRECOMMENDATIONS\n");
    output.push_str(&format!("{:=<60}\n", ""));
    for advice in recommendations(scores) {
        output.push_str(&format!("• {}\n", advice));
    }

    let gate = QualityGate::from_overall(scores.overall);
    output.push_str("\nQUALITY GATE\n");
    output.push_str(&format!("{:=<60}\n", ""));
    output.push_str(&format!("{} {}\n", gate_icon(gate), gate));

    Ok(output)
}

fn section_header(index: usize, dimension: Dimension, score: f64) -> String {
    format!(
        "\n{}. {} (Score: {:.3})\n{:-<30}\n",
        index,
        dimension.display_name().to_uppercase(),
        score,
        ""
    )
}

fn push_error(output: &mut String, error: Option<&str>) {
    if let Some(error) = error {
        output.push_str(&format!("Error: {}\n", error));
    }
}

fn gate_icon(gate: QualityGate) -> &'static str {
    match gate {
        QualityGate::Pass => "✅",
        QualityGate::ConditionalPass => "⚠️ ",
        QualityGate::Fail => "❌",
    }
}

/// Group digits by thousands: 1234567 -> "1,234,567"
pub(crate) fn thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}


#[cfg(test)]
mod tests {
    use super::fixtures::sample_report;
    use super::*;

    #[test]
    fn test_format_parsing() {
        assert_eq!("json".parse::<ReportFormat>(), Ok(ReportFormat::Json));
        assert_eq!("MD".parse::<ReportFormat>(), Ok(ReportFormat::Markdown));
        assert_eq!("table".parse::<ReportFormat>(), Ok(ReportFormat::Table));
        assert!("html".parse::<ReportFormat>().is_err());
    }

    #[test]
    fn test_table_report_sections() {
        let report = sample_report(2);
        let table = generate_report(&report, ReportFormat::Table).unwrap();

        assert!(table.contains("Target: calc.py"));
        assert!(table.contains("OVERALL QC SCORE:"));
        assert!(table.contains("Tests passed: 6/7"));
        assert!(table.contains("  ✗ add(1, 1): got 11, expected 10"));
        assert!(table.contains("Peak memory usage: 1,234 bytes"));
        assert!(table.contains("Security issues found (2):"));
        assert!(table.contains("Division without zero check (line 12)"));
        assert!(table.contains("Error: Invalid syntax at line 3"));
        assert!(table.contains("• Address security vulnerabilities"));
        assert!(table.contains("QUALITY GATE"));
    }

    #[test]
    fn test_table_marks_dimensions() {
        let report = sample_report(0);
        let table = generate_report(&report, ReportFormat::Table).unwrap();
        assert!(table.contains("Security    : 1.000 ✓"));
        assert!(table.contains("Conformance : 0.500 ✗"));
        assert!(table.contains("✓ No security issues detected!"));
    }

    #[test]
    fn test_thousands_grouping() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(1000), "1,000");
        assert_eq!(thousands(1_048_576), "1,048,576");
    }
}
