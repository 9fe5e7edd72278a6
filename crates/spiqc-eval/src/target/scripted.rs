//! In-process units for unit tests

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use super::unit::{CalculatorUnit, Operation, Probe, Reply, UnitLauncher};
use crate::error::UnitError;

type Behavior = Arc<dyn Fn(Operation, &[&str]) -> Result<Probe, UnitError> + Send + Sync>;

pub(crate) struct ScriptedLauncher {
    behavior: Behavior,
    refusal: Option<String>,
}

impl ScriptedLauncher {
    pub(crate) fn with<F>(behavior: F) -> Arc<Self>
    where
        F: Fn(Operation, &[&str]) -> Result<Probe, UnitError> + Send + Sync + 'static,
    {
        Arc::new(Self {
            behavior: Arc::new(behavior),
            refusal: None,
        })
    }

    /// Correct binary arithmetic, 10µs and 1 KiB per call
    pub(crate) fn binary() -> Arc<Self> {
        Self::with(|op, args| {
            Ok(Probe::bare(binary_reply(op, args))
                .with_measurements(Duration::from_micros(10), 1024))
        })
    }

    pub(crate) fn refusing(message: &str) -> Arc<Self> {
        let behavior: Behavior = Arc::new(|_: Operation, _: &[&str]| Err(UnitError::Closed));
        Arc::new(Self {
            behavior,
            refusal: Some(message.to_string()),
        })
    }
}

pub(crate) fn binary_reply(op: Operation, args: &[&str]) -> Reply {
    let parse = |s: &str| i128::from_str_radix(s, 2);
    let (a, b) = match (parse(args[0]), args.get(1).map(|s| parse(*s))) {
        (Ok(a), Some(Ok(b))) => (a, b),
        _ => return Reply::Raised("invalid literal for int() with base 2".to_string()),
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

struct ScriptedUnit {
    behavior: Behavior,
}

#[async_trait]
impl CalculatorUnit for ScriptedUnit {
    async fn invoke(&mut self, op: Operation, args: &[&str]) -> Result<Probe, UnitError> {
        (self.behavior)(op, args)
    }
}

#[async_trait]
impl UnitLauncher for ScriptedLauncher {
    async fn launch(&self) -> Result<Box<dyn CalculatorUnit>, UnitError> {
        if let Some(message) = &self.refusal {
            return Err(UnitError::Instantiation(message.clone()));
        }
        Ok(Box::new(ScriptedUnit {
            behavior: Arc::clone(&self.behavior),
        }))
    }
}

/// Source that passes the capability check
pub(crate) const CALCULATOR_SOURCE: &str = "\
class BinaryCalculator:
    def add(self, a, b):
        return bin(int(a, 2) + int(b, 2))[2:]

    def subtract(self, a, b):
        return bin(int(a, 2) - int(b, 2))[2:]

    def multiply(self, a, b):
        return bin(int(a, 2) * int(b, 2))[2:]

    def divide(self, a, b):
        return bin(int(a, 2) // int(b, 2))[2:]

    def validate_binary(self, s):
        return all(c in '01' for c in s)
";
