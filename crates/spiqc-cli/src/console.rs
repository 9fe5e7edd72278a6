//! CLI console utilities

use colored::*;

/// CLI console for formatted status output
pub struct CliConsole {
    verbose: bool,
}

impl CliConsole {
    pub const fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Print an info message (verbose only)
    pub fn info(&self, message: &str) {
        if self.verbose {
            println!("{} {}", "ℹ".blue().bold(), message);
        }
    }

    pub fn success(&self, message: &str) {
        println!("{} {}", "✓".green().bold(), message.green());
    }

    pub fn warn(&self, message: &str) {
        println!("{} {}", "⚠".yellow().bold(), message.yellow());
    }

    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red().bold(), message.red());
    }

    pub fn print_header(&self, title: &str) {
        println!();
        println!("{}", title.bold().underline());
        println!("{}", "=".repeat(title.chars().count()).dimmed());
    }

    /// Progress line in the `[n/total]` style
    pub fn progress(&self, current: usize, total: usize, message: &str) {
        println!("{} {}", format!("[{}/{}]", current, total).cyan(), message);
    }
}

/// Color a score by its grade
pub fn colored_score(score: f64) -> ColoredString {
    let text = format!("{:.3}", score);
    if score >= spiqc_eval::report::GOOD {
        text.green()
    } else if score >= spiqc_eval::report::ACCEPTABLE {
        text.yellow()
    } else {
        text.red()
    }
}
