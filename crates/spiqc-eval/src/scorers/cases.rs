//! Built-in probe tables

use serde::{Deserialize, Serialize};

use crate::target::Operation;

/// A literal input/expected-output case
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    pub op: Operation,
    pub a: String,
    pub b: String,
    pub expected: String,
}

impl TestCase {
    pub fn new(
        op: Operation,
        a: impl Into<String>,
        b: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        Self {
            op,
            a: a.into(),
            b: b.into(),
            expected: expected.into(),
        }
    }

    /// `op(a, b)` as shown in failure descriptions
    pub fn call(&self) -> String {
        format!("{}({}, {})", self.op, self.a, self.b)
    }

    pub fn mismatch(&self, got: &str) -> String {
        format!("{}: got {}, expected {}", self.call(), got, self.expected)
    }

    pub fn exception(&self, message: &str) -> String {
        format!("{}: exception - {}", self.call(), message)
    }
}

/// A representative call timed by the efficiency scorer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileOperation {
    pub op: Operation,
    pub a: String,
    pub b: String,
}

impl ProfileOperation {
    pub fn new(op: Operation, a: impl Into<String>, b: impl Into<String>) -> Self {
        Self {
            op,
            a: a.into(),
            b: b.into(),
        }
    }

    pub fn call(&self) -> String {
        format!("{}({}, {})", self.op, self.a, self.b)
    }
}

/// Binary arithmetic cases, zero operands included
pub fn default_cases() -> Vec<TestCase> {
    vec![
        TestCase::new(Operation::Add, "101", "11", "1000"),
        TestCase::new(Operation::Add, "1111", "1", "10000"),
        TestCase::new(Operation::Subtract, "1000", "11", "101"),
        TestCase::new(Operation::Multiply, "101", "11", "1111"),
        TestCase::new(Operation::Divide, "1000", "10", "100"),
        TestCase::new(Operation::Add, "0", "0", "0"),
        TestCase::new(Operation::Multiply, "101", "0", "0"),
    ]
}

/// Larger operands for timing
pub fn default_profile() -> Vec<ProfileOperation> {
    vec![
        ProfileOperation::new(Operation::Add, "1".repeat(20), "1".repeat(15)),
        ProfileOperation::new(Operation::Multiply, "1111", "1010"),
        ProfileOperation::new(Operation::Subtract, "1".repeat(25), "101010"),
    ]
}
