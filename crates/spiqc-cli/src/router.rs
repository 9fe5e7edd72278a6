//! Command routing logic for CLI

use anyhow::Result;

use crate::args::{Cli, Commands, ConfigAction};
use crate::commands;

/// Route CLI commands to their respective handlers
pub async fn route(cli: Cli) -> Result<()> {
    let verbose = cli.verbose;

    match cli.command {
        Commands::Evaluate {
            target,
            config,
            output,
            format,
        } => commands::evaluate::run(target, config, output, format, verbose).await,
        Commands::Report { results, format } => commands::report::run(results, format).await,
        Commands::Compare {
            baseline,
            candidate,
            config,
        } => commands::compare::run(baseline, candidate, config, verbose).await,
        Commands::Config { action } => route_config(action).await,
    }
}

async fn route_config(action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Init { path, force } => commands::config::init(&path, force).await,
        ConfigAction::Show { path } => commands::config::show(&path).await,
    }
}
