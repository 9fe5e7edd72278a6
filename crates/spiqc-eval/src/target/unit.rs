//! Calculator capability interface
//!
//! Scorers only ever see a target's executable side through these traits.
//! The Python process implementation lives in `python.rs`; tests provide
//! in-process fakes.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::UnitError;

/// An operation the calculator interface exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
    #[serde(rename = "validate_binary")]
    Validate,
}

impl Operation {
    /// Every operation a target must expose to be loadable
    pub const REQUIRED: [Operation; 5] = [
        Operation::Add,
        Operation::Subtract,
        Operation::Multiply,
        Operation::Divide,
        Operation::Validate,
    ];

    /// Method name on the target class
    pub fn method_name(&self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Subtract => "subtract",
            Operation::Multiply => "multiply",
            Operation::Divide => "divide",
            Operation::Validate => "validate_binary",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.method_name())
    }
}

/// What the target did with a single call
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Returned a string
    Text(String),
    /// Returned something other than a string, rendered for display
    NonText(String),
    /// Raised, with the exception message
    Raised(String),
}

impl Reply {
    /// Rendering used in failure descriptions
    pub fn display_value(&self) -> &str {
        match self {
            Reply::Text(s) | Reply::NonText(s) | Reply::Raised(s) => s,
        }
    }
}

/// One instrumented call against a unit
#[derive(Debug, Clone, PartialEq)]
pub struct Probe {
    pub reply: Reply,
    /// Time spent inside the call, as measured by the unit itself
    pub elapsed: Option<Duration>,
    /// Peak bytes allocated during the call, as measured by the unit itself
    pub peak_memory: Option<u64>,
}

impl Probe {
    /// Probe without unit-side instrumentation
    pub fn bare(reply: Reply) -> Self {
        Self {
            reply,
            elapsed: None,
            peak_memory: None,
        }
    }

    /// Attach unit-side measurements
    pub fn with_measurements(mut self, elapsed: Duration, peak_memory: u64) -> Self {
        self.elapsed = Some(elapsed);
        self.peak_memory = Some(peak_memory);
        self
    }
}

/// A live instance of the target's calculator class
#[async_trait]
pub trait CalculatorUnit: Send {
    /// Invoke `op` with textual operands
    ///
    /// A target-side exception is `Ok` with [`Reply::Raised`]. `Err` means
    /// the unit itself broke (timeout, crash, protocol error).
    async fn invoke(&mut self, op: Operation, args: &[&str]) -> Result<Probe, UnitError>;
}

/// Produces fresh calculator units for a target
#[async_trait]
pub trait UnitLauncher: Send + Sync {
    async fn launch(&self) -> Result<Box<dyn CalculatorUnit>, UnitError>;
}
