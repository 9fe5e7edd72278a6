//! Shared helpers for integration tests

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use spiqc_eval::target::{Probe, Reply};
use spiqc_eval::{CalculatorUnit, Operation, Target, UnitError, UnitLauncher};

/// Documented calculator with a guarded division
pub const CLEAN_SOURCE: &str = r#""""Binary calculator."""


class BinaryCalculator:
    """Arithmetic on binary strings."""

    def add(self, a, b):
        """Add two binary numbers."""
        return bin(int(a, 2) + int(b, 2))[2:]

    def subtract(self, a, b):
        """Subtract b from a."""
        return bin(int(a, 2) - int(b, 2))[2:]

    def multiply(self, a, b):
        """Multiply two binary numbers."""
        return bin(int(a, 2) * int(b, 2))[2:]

    def divide(self, a, b):
        """Integer division of binary numbers."""
        if int(b, 2) == 0:
            raise ValueError("division by zero")
        return bin(int(a, 2) // int(b, 2))[2:]

    def validate_binary(self, s):
        """Check that s only holds binary digits."""
        return all(c in "01" for c in s)
"#;

/// Undocumented calculator with eval, an unguarded division and a bare except
pub const FLAWED_SOURCE: &str = r#"class BinaryCalculator:
    def add(self, a, b):
        return bin(eval("0b" + a) + int(b, 2))[2:]

    def subtract(self, a, b):
        return bin(int(a, 2) - int(b, 2))[2:]

    def multiply(self, a, b):
        return bin(int(a, 2) * int(b, 2))[2:]

    def divide(self, a, b):
        return bin(int(a, 2) // int(b, 2))[2:]

    def validate_binary(self, s):
        try:
            int(s, 2)
            return True
        except:
            return False
"#;

/// [`CLEAN_SOURCE`] with one extra security finding and nothing else changed
pub fn clean_source_with_eval() -> String {
    CLEAN_SOURCE.replace(
        r#"return all(c in "01" for c in s)"#,
        r#"return all(c in eval("'01'") for c in s)"#,
    )
}

type Behavior = dyn Fn(Operation, &str, &str) -> Reply + Send + Sync;

/// In-process calculator with fixed measurements
pub struct FakeLauncher {
    behavior: Arc<Behavior>,
    refuse: bool,
}

impl FakeLauncher {
    /// Correct binary arithmetic
    pub fn correct() -> Arc<Self> {
        Arc::new(Self {
            behavior: Arc::new(binary),
            refuse: false,
        })
    }

    /// Adds one to every sum
    pub fn off_by_one() -> Arc<Self> {
        Arc::new(Self {
            behavior: Arc::new(|op: Operation, a: &str, b: &str| match (op, binary(op, a, b)) {
                (Operation::Add, Reply::Text(sum)) => {
                    let value = u128::from_str_radix(&sum, 2).unwrap_or(0) + 1;
                    Reply::Text(format!("{:b}", value))
                }
                (_, reply) => reply,
            }),
            refuse: false,
        })
    }

    /// Every launch fails as if the class were missing
    pub fn refusing() -> Arc<Self> {
        Arc::new(Self {
            behavior: Arc::new(binary),
            refuse: true,
        })
    }
}

fn binary(op: Operation, a: &str, b: &str) -> Reply {
    let (Ok(a), Ok(b)) = (i128::from_str_radix(a, 2), i128::from_str_radix(b, 2)) else {
        return Reply::Raised("invalid literal for int() with base 2".to_string());
    };
    let value = match op {
        Operation::Add => a + b,
        Operation::Subtract => a - b,
        Operation::Multiply => a * b,
        Operation::Divide if b == 0 => {
            return Reply::Raised("integer division or modulo by zero".to_string());
        }
        Operation::Divide => a / b,
        Operation::Validate => return Reply::NonText("True".to_string()),
    };
    if value < 0 {
        Reply::Text(format!("-{:b}", -value))
    } else {
        Reply::Text(format!("{:b}", value))
    }
}

struct FakeUnit {
    behavior: Arc<Behavior>,
}

#[async_trait]
impl CalculatorUnit for FakeUnit {
    async fn invoke(&mut self, op: Operation, args: &[&str]) -> Result<Probe, UnitError> {
        let a = args.first().copied().unwrap_or("");
        let b = args.get(1).copied().unwrap_or("0");
        Ok(Probe::bare((self.behavior)(op, a, b))
            .with_measurements(Duration::from_micros(20), 2048))
    }
}

#[async_trait]
impl UnitLauncher for FakeLauncher {
    async fn launch(&self) -> Result<Box<dyn CalculatorUnit>, UnitError> {
        if self.refuse {
            return Err(UnitError::Instantiation(
                "module has no attribute 'BinaryCalculator'".to_string(),
            ));
        }
        Ok(Box::new(FakeUnit {
            behavior: Arc::clone(&self.behavior),
        }))
    }
}

/// Build a target over in-memory source
pub fn target(name: &str, source: &str, launcher: Arc<FakeLauncher>) -> Target {
    Target::from_source(name, source, launcher).expect("source exposes the calculator interface")
}
