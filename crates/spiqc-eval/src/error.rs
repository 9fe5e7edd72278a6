//! Error types for the evaluator
//!
//! Only [`LoadError`] escapes a run. Everything else is recovered by the
//! scorer that hit it and recorded in that dimension's detail.

use std::path::PathBuf;
use std::time::Duration;

/// Failure to turn a path into an evaluable target
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The target file does not exist
    #[error("Target not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// The target exists but cannot be read as UTF-8 text
    #[error("Failed to read target {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No class in the target exposes the full calculator interface
    #[error("Target {} is missing required operations: {}", path.display(), missing.join(", "))]
    MissingCapability { path: PathBuf, missing: Vec<String> },
}

/// Failure while talking to a live calculator unit
#[derive(Debug, Clone, thiserror::Error)]
pub enum UnitError {
    /// The interpreter process could not be started
    #[error("Failed to spawn unit process: {0}")]
    Spawn(String),

    /// The target imported badly or its class could not be constructed
    #[error("Failed to instantiate unit: {0}")]
    Instantiation(String),

    /// A call or the startup handshake did not finish in time
    #[error("Unit call timed out after {0:?}")]
    Timeout(Duration),

    /// The unit replied with something that is not a protocol message
    #[error("Malformed unit reply: {0}")]
    Protocol(String),

    /// Reading from or writing to the unit failed
    #[error("Unit I/O error: {0}")]
    Io(String),

    /// The unit exited before replying
    #[error("Unit process exited unexpectedly")]
    Closed,
}

impl From<std::io::Error> for UnitError {
    fn from(err: std::io::Error) -> Self {
        UnitError::Io(err.to_string())
    }
}

/// Failure while loading or checking an [`crate::EvalConfig`]
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Failure while building a syntax outline
#[derive(Debug, Clone, thiserror::Error)]
pub enum SyntaxError {
    /// The grammar could not be installed into the parser
    #[error("Failed to load Python grammar: {0}")]
    Language(String),

    /// The parser gave up without producing a tree
    #[error("Parser produced no syntax tree")]
    Parse,

    /// The tree contains error or missing nodes
    #[error("Invalid syntax at line {line}")]
    Invalid { line: usize },
}
