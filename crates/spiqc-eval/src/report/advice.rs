//! Grades, recommendations and the quality gate

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::metrics::{Dimension, Scores};

/// Score at or above which a dimension or run is considered good
pub const GOOD: f64 = 0.8;
/// Score at or above which a dimension or run is acceptable with work
pub const ACCEPTABLE: f64 = 0.6;

/// Three-level mark for a single score
pub fn grade_mark(score: f64) -> &'static str {
    if score >= GOOD {
        "✓"
    } else if score >= ACCEPTABLE {
        "⚠"
    } else {
        "✗"
    }
}

/// Verdict on the overall score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityGate {
    Pass,
    ConditionalPass,
    Fail,
}

impl QualityGate {
    pub fn from_overall(overall: f64) -> Self {
        if overall >= GOOD {
            QualityGate::Pass
        } else if overall >= ACCEPTABLE {
            QualityGate::ConditionalPass
        } else {
            QualityGate::Fail
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            QualityGate::Pass => "PASS",
            QualityGate::ConditionalPass => "CONDITIONAL PASS",
            QualityGate::Fail => "FAIL",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            QualityGate::Pass => "Code meets quality standards",
            QualityGate::ConditionalPass => "Code needs improvements",
            QualityGate::Fail => "Code requires significant improvements",
        }
    }
}

impl fmt::Display for QualityGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.label(), self.description())
    }
}

/// Actionable advice for every dimension below [`GOOD`]
pub fn recommendations(scores: &Scores) -> Vec<&'static str> {
    let mut advice = Vec::new();

    for dimension in [
        Dimension::Correctness,
        Dimension::Security,
        Dimension::Conformance,
        Dimension::Efficiency,
    ] {
        if scores.get(dimension) >= GOOD {
            continue;
        }
        match dimension {
            Dimension::Correctness => advice.push("Fix failing test cases to improve correctness"),
            Dimension::Security => advice
                .push("Address security vulnerabilities (especially division by zero)"),
            Dimension::Conformance => {
                advice.push("Add docstrings to classes and methods");
                advice.push("Follow PEP 8 style guidelines");
            }
            Dimension::Efficiency => advice.push("Optimize algorithms for better performance"),
        }
    }

    if advice.is_empty() {
        advice.push("Code quality is good! Consider minor optimizations.");
    }
    advice
}
