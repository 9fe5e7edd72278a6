//! SPI-QC command-line interface
//!
//! ```bash
//! spiqc evaluate ai_generated/binary_calculator.py --output results/qc_results.json
//! spiqc report results/qc_results.json --format markdown
//! spiqc compare binary_calculator.py binary_calculator_flawed.py
//! spiqc config init
//! ```
//!
//! Logging goes to stderr. `RUST_LOG` overrides the level chosen by
//! `--verbose`.

mod args;
mod commands;
mod console;
mod router;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use args::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    router::route(cli).await
}
