//! Evaluation configuration
//!
//! Test tables, budgets, weights and process settings for a run. Loaded
//! from TOML; every field has a default.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::metrics::Weights;
use crate::scorers::{ProfileOperation, TestCase, default_cases, default_profile};

/// Configuration for evaluation runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalConfig {
    /// Interpreter used to run the target
    #[serde(default = "default_interpreter")]
    pub interpreter: String,

    /// Calculator class instantiated for execution-based scorers
    #[serde(default = "default_unit_class")]
    pub unit_class: String,

    /// Limit for a single call into the unit
    #[serde(default = "default_call_timeout", with = "humantime_serde")]
    pub call_timeout: Duration,

    /// Limit for importing the target and constructing the unit
    #[serde(default = "default_launch_timeout", with = "humantime_serde")]
    pub launch_timeout: Duration,

    /// Run correctness, security and conformance concurrently
    #[serde(default)]
    pub parallel: bool,

    /// Total call time that drives the time score to zero
    #[serde(default = "default_time_budget", with = "humantime_serde")]
    pub time_budget: Duration,

    /// Peak bytes that drive the memory score to zero
    #[serde(default = "default_memory_budget")]
    pub memory_budget: u64,

    /// Longest line, in characters, that still conforms
    #[serde(default = "default_max_line_length")]
    pub max_line_length: usize,

    /// Security score lost per finding
    #[serde(default = "default_penalty_per_issue")]
    pub penalty_per_issue: f64,

    /// Aggregation weights
    #[serde(default)]
    pub weights: Weights,

    /// Correctness cases
    #[serde(default = "default_cases")]
    pub cases: Vec<TestCase>,

    /// Efficiency profile
    #[serde(default = "default_profile")]
    pub profile: Vec<ProfileOperation>,
}

fn default_interpreter() -> String {
    "python3".to_string()
}

fn default_unit_class() -> String {
    "BinaryCalculator".to_string()
}

fn default_call_timeout() -> Duration {
    Duration::from_secs(5)
}

fn default_launch_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_time_budget() -> Duration {
    Duration::from_millis(1)
}

fn default_memory_budget() -> u64 {
    1024 * 1024
}

fn default_max_line_length() -> usize {
    79
}

fn default_penalty_per_issue() -> f64 {
    0.2
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            interpreter: default_interpreter(),
            unit_class: default_unit_class(),
            call_timeout: default_call_timeout(),
            launch_timeout: default_launch_timeout(),
            parallel: false,
            time_budget: default_time_budget(),
            memory_budget: default_memory_budget(),
            max_line_length: default_max_line_length(),
            penalty_per_issue: default_penalty_per_issue(),
            weights: Weights::default(),
            cases: default_cases(),
            profile: default_profile(),
        }
    }
}

impl EvalConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and validate a TOML config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: EvalConfig = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Check invariants the scorers rely on
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.weights.validate().map_err(ConfigError::Invalid)?;

        if self.interpreter.trim().is_empty() {
            return Err(ConfigError::Invalid("interpreter must not be empty".into()));
        }
        if self.unit_class.trim().is_empty() {
            return Err(ConfigError::Invalid("unit_class must not be empty".into()));
        }
        if self.call_timeout.is_zero() || self.launch_timeout.is_zero() {
            return Err(ConfigError::Invalid("timeouts must be positive".into()));
        }
        if self.time_budget.is_zero() || self.memory_budget == 0 {
            return Err(ConfigError::Invalid(
                "efficiency budgets must be positive".into(),
            ));
        }
        if self.max_line_length == 0 {
            return Err(ConfigError::Invalid(
                "max_line_length must be positive".into(),
            ));
        }
        if !self.penalty_per_issue.is_finite() || self.penalty_per_issue < 0.0 {
            return Err(ConfigError::Invalid(
                "penalty_per_issue must be a non-negative number".into(),
            ));
        }
        if self.cases.is_empty() {
            return Err(ConfigError::Invalid(
                "at least one correctness case is required".into(),
            ));
        }
        if self.profile.is_empty() {
            return Err(ConfigError::Invalid(
                "at least one efficiency operation is required".into(),
            ));
        }
        Ok(())
    }

    /// Set the interpreter
    pub fn with_interpreter(mut self, interpreter: impl Into<String>) -> Self {
        self.interpreter = interpreter.into();
        self
    }

    /// Set the calculator class name
    pub fn with_unit_class(mut self, class_name: impl Into<String>) -> Self {
        self.unit_class = class_name.into();
        self
    }

    /// Set the per-call timeout
    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }

    /// Set aggregation weights
    pub fn with_weights(mut self, weights: Weights) -> Self {
        self.weights = weights;
        self
    }

    /// Set efficiency budgets
    pub fn with_budgets(mut self, time: Duration, memory: u64) -> Self {
        self.time_budget = time;
        self.memory_budget = memory;
        self
    }

    /// Replace the correctness cases
    pub fn with_cases(mut self, cases: Vec<TestCase>) -> Self {
        self.cases = cases;
        self
    }

    /// Replace the efficiency profile
    pub fn with_profile(mut self, profile: Vec<ProfileOperation>) -> Self {
        self.profile = profile;
        self
    }

    /// Enable concurrent scoring
    pub fn parallel(mut self) -> Self {
        self.parallel = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::Operation;

    #[test]
    fn test_default_config() {
        let config = EvalConfig::default();
        assert_eq!(config.interpreter, "python3");
        assert_eq!(config.unit_class, "BinaryCalculator");
        assert_eq!(config.time_budget, Duration::from_millis(1));
        assert_eq!(config.memory_budget, 1_048_576);
        assert_eq!(config.max_line_length, 79);
        assert_eq!(config.cases.len(), 7);
        assert_eq!(config.profile.len(), 3);
        assert!(!config.parallel);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = EvalConfig::new()
            .with_interpreter("python3.12")
            .with_call_timeout(Duration::from_secs(2))
            .with_weights(Weights::new(0.4, 0.1, 0.3, 0.2))
            .with_cases(vec![TestCase::new(Operation::Add, "1", "1", "10")])
            .parallel();

        assert_eq!(config.interpreter, "python3.12");
        assert_eq!(config.call_timeout, Duration::from_secs(2));
        assert_eq!(config.weights.correctness, 0.4);
        assert_eq!(config.cases.len(), 1);
        assert!(config.parallel);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: EvalConfig = toml::from_str(
            r#"
call_timeout = "250ms"
parallel = true

[weights]
correctness = 0.7
efficiency = 0.1
security = 0.1
conformance = 0.1

[[cases]]
op = "divide"
a = "110"
b = "11"
expected = "10"
"#,
        )
        .unwrap();

        assert_eq!(config.call_timeout, Duration::from_millis(250));
        assert!(config.parallel);
        assert_eq!(config.weights.correctness, 0.7);
        assert_eq!(config.cases.len(), 1);
        assert_eq!(config.cases[0].op, Operation::Divide);
        assert_eq!(config.profile.len(), 3);
        assert_eq!(config.interpreter, "python3");
    }

    #[test]
    fn test_toml_round_trip() {
        let config = EvalConfig::default();
        let text = config.to_toml().unwrap();
        let parsed: EvalConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let negative = EvalConfig::new().with_weights(Weights::new(-1.0, 0.5, 0.5, 1.0));
        assert!(matches!(negative.validate(), Err(ConfigError::Invalid(_))));

        let no_cases = EvalConfig::new().with_cases(Vec::new());
        assert!(no_cases.validate().is_err());

        let no_profile = EvalConfig::new().with_profile(Vec::new());
        assert!(matches!(no_profile.validate(), Err(ConfigError::Invalid(_))));

        let no_budget = EvalConfig::new().with_budgets(Duration::ZERO, 1024);
        assert!(no_budget.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spiqc.toml");
        std::fs::write(&path, "unit_class = \"Calc\"\nmax_line_length = 99\n").unwrap();

        let config = EvalConfig::load(&path).unwrap();
        assert_eq!(config.unit_class, "Calc");
        assert_eq!(config.max_line_length, 99);

        std::fs::write(&path, "penalty_per_issue = -0.5\n").unwrap();
        assert!(matches!(
            EvalConfig::load(&path),
            Err(ConfigError::Invalid(_))
        ));

        std::fs::write(&path, "parallel = \"yes\"\n").unwrap();
        assert!(matches!(EvalConfig::load(&path), Err(ConfigError::Parse { .. })));
    }
}
