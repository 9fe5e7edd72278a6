//! Security scoring from unsafe-construct signatures
//!
//! Rules run over the masked source, so string literals and comments never
//! match. Each rule contributes at most one finding. Matching is lexical;
//! false positives and negatives are accepted.

use async_trait::async_trait;
use regex::Regex;

use super::{Scorer, fallback};
use crate::metrics::{Dimension, DimensionResult, Finding, SecurityDetail, SecurityRule};
use crate::syntax::{MaskedLine, MaskedSource};
use crate::target::Target;

struct Rules {
    dynamic_execution: Regex,
    input_call: Regex,
    numeric_parse: Regex,
    bare_except: Regex,
    def_line: Regex,
    zero_guard: Regex,
    inline_guard: Regex,
}

impl Rules {
    fn compile() -> Result<Self, regex::Error> {
        Ok(Self {
            dynamic_execution: Regex::new(r"\b(?:eval|exec)\s*\(")?,
            input_call: Regex::new(r"\binput\s*\(")?,
            numeric_parse: Regex::new(r"\b(?:int|float)\s*\(")?,
            bare_except: Regex::new(r"^\s*except\s*:")?,
            def_line: Regex::new(r"^\s*(?:async\s+)?def\b")?,
            zero_guard: Regex::new(r"^\s*(?:if|elif|while|assert)\b.*(?:\b0\b|\bnot\s+\w)")?,
            inline_guard: Regex::new(r"\bif\b.+\belse\b")?,
        })
    }

    fn first_line(&self, masked: &MaskedSource, pattern: &Regex) -> Option<usize> {
        masked
            .lines()
            .iter()
            .find(|l| pattern.is_match(&l.code))
            .map(|l| l.number)
    }

    fn scan(&self, masked: &MaskedSource) -> Vec<Finding> {
        SecurityRule::ALL
            .iter()
            .filter_map(|rule| {
                let line = match rule {
                    SecurityRule::DynamicExecution => {
                        self.first_line(masked, &self.dynamic_execution)
                    }
                    SecurityRule::UncheckedInputParsing => self.unchecked_input(masked),
                    SecurityRule::UncheckedDivision => self.unchecked_division(masked),
                    SecurityRule::BareExcept => self.first_line(masked, &self.bare_except),
                }?;
                Some(Finding {
                    rule: *rule,
                    message: rule.message().to_string(),
                    line,
                })
            })
            .collect()
    }

    fn unchecked_input(&self, masked: &MaskedSource) -> Option<usize> {
        if masked.contains("ValueError") {
            return None;
        }
        self.first_line(masked, &self.numeric_parse)?;
        self.first_line(masked, &self.input_call)
    }

    fn unchecked_division(&self, masked: &MaskedSource) -> Option<usize> {
        if masked.contains("ZeroDivisionError") {
            return None;
        }
        let lines = masked.lines();
        lines
            .iter()
            .enumerate()
            .filter(|(_, l)| l.is_code() && has_division(&l.code))
            .find(|(idx, l)| {
                let start = self.scope_start(lines, *idx);
                let guarded_before = lines[start..*idx]
                    .iter()
                    .any(|g| g.is_code() && self.zero_guard.is_match(&g.code));
                !guarded_before && !self.inline_guard.is_match(&l.code)
            })
            .map(|(_, l)| l.number)
    }

    /// Index of the enclosing `def` line, or 0 at module level
    fn scope_start(&self, lines: &[MaskedLine], idx: usize) -> usize {
        let mut indent = lines[idx].indent;
        for j in (0..idx).rev() {
            let line = &lines[j];
            if !line.is_code() || line.indent >= indent {
                continue;
            }
            if self.def_line.is_match(&line.code) {
                return j;
            }
            indent = line.indent;
        }
        0
    }
}

/// A `/`, `//` or augmented form that is not a positional-only marker
fn has_division(code: &str) -> bool {
    code.match_indices('/').any(|(i, _)| {
        let rest = code[i + 1..]
            .trim_start_matches('/')
            .trim_start_matches('=')
            .trim_start();
        !(rest.starts_with(',') || rest.starts_with(')'))
    })
}

/// Penalizes each matched signature
pub struct SecurityScorer {
    penalty_per_issue: f64,
}

impl SecurityScorer {
    pub fn new(penalty_per_issue: f64) -> Self {
        Self { penalty_per_issue }
    }

    /// Findings for raw source, in rule order
    pub fn findings(source: &str) -> Result<Vec<Finding>, regex::Error> {
        let rules = Rules::compile()?;
        Ok(rules.scan(&MaskedSource::new(source)))
    }
}

impl Default for SecurityScorer {
    fn default() -> Self {
        Self::new(0.2)
    }
}

#[async_trait]
impl Scorer for SecurityScorer {
    type Detail = SecurityDetail;

    fn dimension(&self) -> Dimension {
        Dimension::Security
    }

    async fn score(&self, target: &Target) -> DimensionResult<SecurityDetail> {
        let findings = match Self::findings(target.source()) {
            Ok(findings) => findings,
            Err(e) => return fallback(Dimension::Security, e),
        };

        for finding in &findings {
            tracing::debug!("line {}: {}", finding.line, finding.message);
        }

        let issue_count = findings.len();
        DimensionResult::assessed(
            (1.0 - issue_count as f64 * self.penalty_per_issue).max(0.0),
            SecurityDetail {
                issues: findings.iter().map(|f| f.message.clone()).collect(),
                issue_count,
                findings,
            },
        )
    }
}
