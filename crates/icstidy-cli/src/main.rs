//! icstidy CLI entry point.

use std::process::ExitCode;

use clap::Parser;

use icstidy_cli::cli::{Cli, Command, ConfigAction};
use icstidy_cli::config::AppConfig;
use icstidy_cli::error::{CliError, CliResult};
use icstidy_cli::update::{self, UpdateOptions};
use icstidy_core::{TracingConfig, init_tracing};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let tracing_config = if cli.debug {
        TracingConfig::debug()
    } else {
        TracingConfig::default()
    }
    .with_format(cli.tracing_format());
    if let Err(e) = init_tracing(tracing_config) {
        eprintln!("error: {}", e);
        return ExitCode::FAILURE;
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> CliResult<()> {
    let config = if let Some(ref path) = cli.config {
        AppConfig::load_from(path).map_err(CliError::Config)?
    } else {
        AppConfig::load().map_err(CliError::Config)?
    };

    match cli.command {
        Some(Command::Config { action }) => match action {
            ConfigAction::Dump => icstidy_cli::commands::config::dump(&config),
            ConfigAction::Validate => icstidy_cli::commands::config::validate(&config),
            ConfigAction::Path => icstidy_cli::commands::config::path(),
        },
        None => {
            let notifier = update::build_notifier(&config, cli.no_notify);
            let options = UpdateOptions::from_cli(&cli);
            update::run(&config, &options, notifier.as_ref()).await
        }
    }
}
