//! Conformance scoring: docstrings, line length, naming

use async_trait::async_trait;
use regex::Regex;

use super::{Scorer, fallback};
use crate::metrics::{ConformanceDetail, Dimension, DimensionResult, NamingViolation};
use crate::syntax::{DeclarationKind, Outline};
use crate::target::Target;

const FUNCTION_NAME: &str = r"^[a-z_][a-z0-9_]*$";
const CLASS_NAME: &str = r"^[A-Z][a-zA-Z0-9]*$";

/// Averages documentation coverage, line-length compliance and naming
/// compliance over the syntax tree
pub struct ConformanceScorer {
    max_line_length: usize,
}

impl ConformanceScorer {
    pub fn new(max_line_length: usize) -> Self {
        Self { max_line_length }
    }

    fn assess(&self, source: &str) -> anyhow::Result<ConformanceDetail> {
        let outline = Outline::parse(source)?;
        outline.ensure_valid()?;

        let function_name = Regex::new(FUNCTION_NAME)?;
        let class_name = Regex::new(CLASS_NAME)?;

        let declarations = outline.declarations();
        let documented = declarations.iter().filter(|d| d.documented).count();
        let documentation_coverage = if declarations.is_empty() {
            0.0
        } else {
            documented as f64 / declarations.len() as f64
        };

        let lines: Vec<&str> = source.split('\n').collect();
        let long_lines = lines
            .iter()
            .filter(|l| l.chars().count() > self.max_line_length)
            .count();
        let line_length_score = (1.0 - long_lines as f64 / lines.len() as f64).max(0.0);

        let naming_violations: Vec<NamingViolation> = declarations
            .iter()
            .filter(|d| {
                let pattern = match d.kind {
                    DeclarationKind::Class => &class_name,
                    DeclarationKind::Function => &function_name,
                };
                !pattern.is_match(&d.name)
            })
            .map(|d| NamingViolation {
                kind: d.kind,
                name: d.name.clone(),
                line: d.line,
            })
            .collect();
        let naming_issues = naming_violations.len();
        let naming_score =
            (1.0 - naming_issues as f64 / declarations.len().max(1) as f64).max(0.0);

        Ok(ConformanceDetail {
            documentation_coverage,
            line_length_score,
            naming_score,
            long_lines,
            naming_issues,
            total_lines: lines.len(),
            declarations: declarations.len(),
            naming_violations,
        })
    }
}

impl Default for ConformanceScorer {
    fn default() -> Self {
        Self::new(79)
    }
}

#[async_trait]
impl Scorer for ConformanceScorer {
    type Detail = ConformanceDetail;

    fn dimension(&self) -> Dimension {
        Dimension::Conformance
    }

    async fn score(&self, target: &Target) -> DimensionResult<ConformanceDetail> {
        match self.assess(target.source()) {
            Ok(detail) => DimensionResult::assessed(
                (detail.documentation_coverage + detail.line_length_score + detail.naming_score)
                    / 3.0,
                detail,
            ),
            Err(e) => fallback(Dimension::Conformance, format!("{:#}", e)),
        }
    }
}
