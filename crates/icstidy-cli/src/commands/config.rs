//! Configuration commands.

use icstidy_feed::Fetcher;

use crate::config::AppConfig;
use crate::error::{CliError, CliResult};

/// Dump the effective configuration to stdout.
pub fn dump(config: &AppConfig) -> CliResult<()> {
    let toml_str = toml::to_string_pretty(config)
        .map_err(|e| CliError::Config(format!("failed to serialize config: {}", e)))?;
    println!("# config.toml ({})", AppConfig::default_path().display());
    println!("{}", toml_str);

    Ok(())
}

/// Validate the configuration.
pub fn validate(config: &AppConfig) -> CliResult<()> {
    // A fetcher build checks the URL and HTTP client settings.
    Fetcher::new(config.feed.to_fetch_config(None))?;

    match config
        .pushover
        .resolve_credentials()
        .map_err(|e| CliError::Config(format!("invalid Pushover credentials: {}", e)))?
    {
        Some(_) => println!("Pushover credentials are configured."),
        None => println!("Pushover credentials are not configured; notifications will be skipped."),
    }

    println!("Configuration is valid.");
    Ok(())
}

/// Show the configuration file path.
pub fn path() -> CliResult<()> {
    println!("config: {}", AppConfig::default_path().display());
    Ok(())
}
