//! Configuration management commands

use std::path::Path;

use anyhow::{Context, Result, bail};
use colored::*;
use spiqc_eval::EvalConfig;

use crate::console::CliConsole;

/// Write the default configuration to `path`
pub async fn init(path: &Path, force: bool) -> Result<()> {
    let console = CliConsole::new(true);
    console.print_header("Configuration Initialization");

    if path.exists() && !force {
        console.error(&format!(
            "Configuration file already exists: {}",
            path.display()
        ));
        console.info("Use --force to overwrite");
        bail!("Configuration file already exists: {}", path.display());
    }

    let content = EvalConfig::default().to_toml()?;
    tokio::fs::write(path, content)
        .await
        .with_context(|| format!("Failed to write configuration file {}", path.display()))?;

    console.success(&format!("Created configuration file: {}", path.display()));
    console.info("Edit the test cases, budgets and weights to suit your targets");
    Ok(())
}

/// Show the configuration that `evaluate` would use
pub async fn show(path: &Path) -> Result<()> {
    let console = CliConsole::new(true);
    console.print_header("Configuration");

    let config = if path.exists() {
        let config = EvalConfig::load(path)?;
        console.success(&format!("Loaded configuration from: {}", path.display()));
        config
    } else {
        console.warn(&format!("Configuration file not found: {}", path.display()));
        console.info("Using default configuration");
        EvalConfig::default()
    };

    print_config(&console, &config);
    Ok(())
}

fn print_config(console: &CliConsole, config: &EvalConfig) {
    console.info(&format!("Interpreter: {}", config.interpreter.green()));
    console.info(&format!("Calculator class: {}", config.unit_class.green()));
    console.info(&format!(
        "Timeouts: call {:?}, launch {:?}",
        config.call_timeout, config.launch_timeout
    ));
    console.info(&format!(
        "Parallel scoring: {}",
        if config.parallel {
            "✓ Enabled".green()
        } else {
            "✗ Disabled".red()
        }
    ));

    console.print_header("Scoring");
    console.info(&format!(
        "Efficiency budgets: {:?} total time, {} bytes peak memory",
        config.time_budget, config.memory_budget
    ));
    console.info(&format!("Max line length: {}", config.max_line_length));
    console.info(&format!("Penalty per security issue: {}", config.penalty_per_issue));
    console.info(&format!(
        "Weights: correctness {}, efficiency {}, security {}, conformance {}",
        config.weights.correctness,
        config.weights.efficiency,
        config.weights.security,
        config.weights.conformance
    ));

    console.print_header("Test Cases");
    for case in &config.cases {
        console.info(&format!("  • {} = {}", case.call(), case.expected));
    }

    console.print_header("Efficiency Profile");
    for operation in &config.profile {
        console.info(&format!("  • {}", operation.call()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_init_then_show() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spiqc.toml");

        init(&path, false).await.unwrap();
        let loaded = EvalConfig::load(&path).unwrap();
        assert_eq!(loaded, EvalConfig::default());

        show(&path).await.unwrap();
    }

    #[tokio::test]
    async fn test_init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spiqc.toml");
        std::fs::write(&path, "max_line_length = 120\n").unwrap();

        assert!(init(&path, false).await.is_err());
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "max_line_length = 120\n"
        );

        init(&path, true).await.unwrap();
        assert_eq!(EvalConfig::load(&path).unwrap().max_line_length, 79);
    }

    #[tokio::test]
    async fn test_show_without_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        show(&dir.path().join("absent.toml")).await.unwrap();
    }
}
