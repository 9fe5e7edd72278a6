//! Weighted harmonic mean over dimension scores
//!
//! The harmonic mean is dominated by the weakest dimension, so one very
//! low score drags the overall score toward zero regardless of the others.

use serde::{Deserialize, Serialize};

use super::types::{Dimension, unit_interval};

/// Keeps a zero score from dividing by zero
pub const EPSILON: f64 = 1e-6;

/// Per-dimension weights, expected to sum to 1.0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    #[serde(default = "default_weight")]
    pub correctness: f64,
    #[serde(default = "default_weight")]
    pub efficiency: f64,
    #[serde(default = "default_weight")]
    pub security: f64,
    #[serde(default = "default_weight")]
    pub conformance: f64,
}

fn default_weight() -> f64 {
    0.25
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            correctness: default_weight(),
            efficiency: default_weight(),
            security: default_weight(),
            conformance: default_weight(),
        }
    }
}

impl Weights {
    pub fn new(correctness: f64, efficiency: f64, security: f64, conformance: f64) -> Self {
        Self {
            correctness,
            efficiency,
            security,
            conformance,
        }
    }

    pub fn get(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Correctness => self.correctness,
            Dimension::Efficiency => self.efficiency,
            Dimension::Security => self.security,
            Dimension::Conformance => self.conformance,
        }
    }

    pub fn total(&self) -> f64 {
        Dimension::ALL.iter().map(|d| self.get(*d)).sum()
    }

    /// Every weight is finite and non-negative
    pub fn validate(&self) -> Result<(), String> {
        for dimension in Dimension::ALL {
            let weight = self.get(dimension);
            if !weight.is_finite() || weight < 0.0 {
                return Err(format!(
                    "weight for {} must be a non-negative number, got {}",
                    dimension, weight
                ));
            }
        }
        Ok(())
    }
}

/// Overall score: `1 / Σ(w / (s + ε))`, clamped to [0, 1]
///
/// Scores are clamped into range first. Dimensions with zero weight do not
/// contribute; if no dimension carries weight the result is 0.
pub fn combine<I>(scores: I, weights: &Weights) -> f64
where
    I: IntoIterator<Item = (Dimension, f64)>,
{
    let harmonic_sum: f64 = scores
        .into_iter()
        .map(|(dimension, score)| weights.get(dimension) / (unit_interval(score) + EPSILON))
        .sum();

    if harmonic_sum > 0.0 && harmonic_sum.is_finite() {
        unit_interval(1.0 / harmonic_sum)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(score: f64) -> [(Dimension, f64); 4] {
        Dimension::ALL.map(|d| (d, score))
    }

    #[test]
    fn test_perfect_scores_clamp_to_one() {
        assert_eq!(combine(uniform(1.0), &Weights::default()), 1.0);
    }

    #[test]
    fn test_uniform_scores_return_the_score() {
        let overall = combine(uniform(0.6), &Weights::default());
        assert!((overall - 0.6).abs() < 1e-5);
    }

    #[test]
    fn test_zero_dimension_collapses_overall() {
        let scores = [
            (Dimension::Correctness, 0.0),
            (Dimension::Efficiency, 1.0),
            (Dimension::Security, 1.0),
            (Dimension::Conformance, 1.0),
        ];
        let overall = combine(scores, &Weights::default());
        assert!(overall <= 4e-6 + 1e-12);
    }

    #[test]
    fn test_known_mix() {
        // 1 / (0.25/1 + 0.25/0.5 + 0.25/0.4 + 0.25/0.8)
        let scores = [
            (Dimension::Correctness, 1.0),
            (Dimension::Efficiency, 0.5),
            (Dimension::Security, 0.4),
            (Dimension::Conformance, 0.8),
        ];
        let expected = 1.0 / (0.25 + 0.5 + 0.625 + 0.3125);
        let overall = combine(scores, &Weights::default());
        assert!((overall - expected).abs() < 1e-5);
    }

    #[test]
    fn test_zero_weights_give_zero() {
        let weights = Weights::new(0.0, 0.0, 0.0, 0.0);
        assert_eq!(combine(uniform(0.9), &weights), 0.0);
    }

    #[test]
    fn test_zero_weight_dimension_is_ignored() {
        let weights = Weights::new(0.5, 0.5, 0.0, 0.0);
        let scores = [
            (Dimension::Correctness, 0.8),
            (Dimension::Efficiency, 0.8),
            (Dimension::Security, 0.0),
            (Dimension::Conformance, 0.0),
        ];
        assert!((combine(scores, &weights) - 0.8).abs() < 1e-5);
    }

    #[test]
    fn test_validate_rejects_negative_and_nan() {
        assert!(Weights::default().validate().is_ok());
        assert!(Weights::new(-0.1, 0.4, 0.4, 0.3).validate().is_err());
        assert!(Weights::new(f64::NAN, 0.4, 0.4, 0.2).validate().is_err());
    }
}
