//! Evaluation of real Python targets through the interpreter
//!
//! Skipped when no `python3` is on the PATH.

use std::path::PathBuf;
use std::time::Duration;

use spiqc_eval::metrics::SecurityRule;
use spiqc_eval::{Dimension, EvalConfig, Evaluator, LoadError, Operation, TargetLoader};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn python_available() -> bool {
    let available = std::process::Command::new("python3")
        .arg("--version")
        .output()
        .map(|out| out.status.success())
        .unwrap_or(false);
    if !available {
        eprintln!("python3 not found, skipping");
    }
    available
}

#[tokio::test]
async fn clean_target_scores_well() {
    if !python_available() {
        return;
    }

    let report = Evaluator::new(EvalConfig::default())
        .run_evaluation(fixture("clean_calculator.py"))
        .await
        .unwrap();

    assert_eq!(report.scores.correctness, 1.0, "{:?}", report.details.correctness);
    assert_eq!(report.scores.security, 1.0);
    assert_eq!(report.scores.conformance, 1.0);

    let efficiency = report.details.efficiency.detail().unwrap();
    assert_eq!(efficiency.samples.len(), 3);
    assert!(efficiency.failed_operations.is_empty());
    assert!((0.0..=1.0).contains(&report.scores.efficiency));
    assert!(report.scores.overall > 0.0);
}

#[tokio::test]
async fn flawed_target_fails_to_instantiate() {
    if !python_available() {
        return;
    }

    let report = Evaluator::new(EvalConfig::default())
        .run_evaluation(fixture("flawed_calculator.py"))
        .await
        .unwrap();

    assert_eq!(report.scores.correctness, 0.0);
    assert_eq!(report.scores.efficiency, 0.5);
    let error = report.details.error(Dimension::Correctness).unwrap();
    assert!(error.contains("BinaryCalculator"), "{}", error);

    let security = report.details.security.detail().unwrap();
    let rules: Vec<_> = security.findings.iter().map(|f| f.rule).collect();
    assert_eq!(rules, SecurityRule::ALL.to_vec());
    assert!(report.scores.security < 0.25);

    let conformance = report.details.conformance.detail().unwrap();
    assert_eq!(conformance.documentation_coverage, 0.0);
    assert!(conformance.naming_issues >= 1);
    assert!(report.scores.overall < 1e-5);
}

#[tokio::test]
async fn configured_class_name_is_used() {
    if !python_available() {
        return;
    }

    let config = EvalConfig::default().with_unit_class("binaryCalculator");
    let report = Evaluator::new(config)
        .run_evaluation(fixture("flawed_calculator.py"))
        .await
        .unwrap();

    assert_eq!(report.scores.correctness, 1.0, "{:?}", report.details.correctness);
}

#[tokio::test]
async fn syntax_error_falls_back_to_neutral_conformance() {
    if !python_available() {
        return;
    }

    let report = Evaluator::new(EvalConfig::default())
        .run_evaluation(fixture("broken_syntax.py"))
        .await
        .unwrap();

    assert_eq!(report.scores.conformance, 0.5);
    assert!(
        report
            .details
            .error(Dimension::Conformance)
            .unwrap()
            .starts_with("Invalid syntax at line")
    );
    // The interpreter cannot import it either
    assert_eq!(report.scores.correctness, 0.0);
    assert!(report.details.error(Dimension::Security).is_none());
}

#[tokio::test]
async fn missing_operations_are_reported_at_load() {
    let err = Evaluator::new(EvalConfig::default())
        .run_evaluation(fixture("missing_ops.py"))
        .await
        .unwrap_err();

    match err {
        LoadError::MissingCapability { missing, .. } => {
            assert_eq!(missing, vec!["multiply", "divide", "validate_binary"]);
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn hung_call_times_out_and_unit_recovers() {
    if !python_available() {
        return;
    }

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("slow.py");
    std::fs::write(
        &path,
        "\
import time


class BinaryCalculator:
    def add(self, a, b):
        if a == '1111':
            time.sleep(30)
        return bin(int(a, 2) + int(b, 2))[2:]

    def subtract(self, a, b):
        return bin(int(a, 2) - int(b, 2))[2:]

    def multiply(self, a, b):
        return bin(int(a, 2) * int(b, 2))[2:]

    def divide(self, a, b):
        return bin(int(a, 2) // int(b, 2))[2:]

    def validate_binary(self, s):
        return True
",
    )
    .unwrap();

    let config = EvalConfig::default().with_call_timeout(Duration::from_millis(500));
    let target = TargetLoader::new(&config).load(&path).await.unwrap();
    let mut unit = target.instantiate().await.unwrap();

    let err = unit.invoke(Operation::Add, &["1111", "1"]).await.unwrap_err();
    assert!(err.to_string().contains("timed out"), "{}", err);

    // The next call runs in a fresh interpreter
    let probe = unit.invoke(Operation::Add, &["101", "11"]).await.unwrap();
    assert_eq!(probe.reply, spiqc_eval::target::Reply::Text("1000".to_string()));
}
