//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use icstidy_core::TracingOutputFormat;

/// icstidy - Fetch a holiday ICS feed, tidy event titles, publish it
#[derive(Debug, Parser)]
#[command(name = "icstidy")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "ICSTIDY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v')]
    pub debug: bool,

    /// Log output format (json is meant for CI log collection)
    #[arg(long, value_enum, default_value = "compact", env = "ICSTIDY_LOG_FORMAT")]
    pub log_format: LogFormat,

    /// Override the feed URL
    #[arg(long)]
    pub url: Option<String>,

    /// Override the output file path
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Print the sanitized feed to stdout instead of writing or notifying
    #[arg(long)]
    pub dry_run: bool,

    /// Skip the push notification even when credentials are configured
    #[arg(long)]
    pub no_notify: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Returns the tracing output format for this invocation.
    pub fn tracing_format(&self) -> TracingOutputFormat {
        match self.log_format {
            LogFormat::Compact => TracingOutputFormat::Compact,
            LogFormat::Json => TracingOutputFormat::Json,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Compact single-line logs
    Compact,
    /// JSON logs
    Json,
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration subcommand actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML
    Dump,
    /// Validate the configuration
    Validate,
    /// Show the configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_update_flags() {
        let cli = Cli::parse_from([
            "icstidy",
            "--url",
            "https://example.com/feed.ics",
            "--output",
            "/tmp/out.ics",
            "--dry-run",
        ]);
        assert_eq!(cli.url.as_deref(), Some("https://example.com/feed.ics"));
        assert_eq!(cli.output, Some(PathBuf::from("/tmp/out.ics")));
        assert!(cli.dry_run);
        assert!(!cli.no_notify);
        assert!(cli.command.is_none());
    }

    #[test]
    fn log_format_defaults_to_compact() {
        let cli = Cli::parse_from(["icstidy"]);
        assert_eq!(cli.log_format, LogFormat::Compact);
        assert_eq!(cli.tracing_format(), TracingOutputFormat::Compact);
    }

    #[test]
    fn parses_json_log_format() {
        let cli = Cli::parse_from(["icstidy", "--log-format", "json"]);
        assert_eq!(cli.log_format, LogFormat::Json);
        assert_eq!(cli.tracing_format(), TracingOutputFormat::Json);
    }

    #[test]
    fn parses_config_subcommand() {
        let cli = Cli::parse_from(["icstidy", "config", "path"]);
        assert!(matches!(
            cli.command,
            Some(Command::Config {
                action: ConfigAction::Path
            })
        ));
    }
}
