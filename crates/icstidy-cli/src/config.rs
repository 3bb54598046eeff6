//! Application configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/icstidy/config.toml` by default. Every section is optional;
//! with no config file at all the tool updates the South Australian
//! public-holiday feed into `sa_public_holidays.ics` and sends no
//! notifications.
//!
//! Pushover credential values support secret references (`env::VAR`,
//! `file::path`) resolved at startup via [`crate::secret`].

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use icstidy_feed::FetchConfig;

use crate::secret;

/// The feed updated when no URL is configured.
pub const DEFAULT_FEED_URL: &str =
    "https://www.officeholidays.com/ics-all/australia/south-australia";

/// Configuration for the icstidy CLI.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Feed download settings.
    #[serde(default)]
    pub feed: FeedSettings,

    /// Output settings.
    #[serde(default)]
    pub output: OutputSettings,

    /// Pushover notification settings.
    #[serde(default)]
    pub pushover: PushoverSettings,

    /// Update schedule settings.
    #[serde(default)]
    pub schedule: ScheduleSettings,
}

/// Feed download settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedSettings {
    /// The ICS feed URL.
    pub url: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// Override the User-Agent header.
    pub user_agent: Option<String>,

    /// Whether to verify TLS certificates.
    pub verify_tls: bool,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_FEED_URL.to_string(),
            timeout_secs: 30,
            user_agent: None,
            verify_tls: true,
        }
    }
}

impl FeedSettings {
    /// Builds the fetcher configuration, with an optional URL override
    /// from the command line.
    pub fn to_fetch_config(&self, url_override: Option<&str>) -> FetchConfig {
        let url = url_override.unwrap_or(&self.url);
        let mut config =
            FetchConfig::new(url).with_timeout(Duration::from_secs(self.timeout_secs));
        if let Some(ref agent) = self.user_agent {
            config = config.with_user_agent(agent.clone());
        }
        config.with_verify_tls(self.verify_tls)
    }
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Where the sanitized feed is written.
    pub path: PathBuf,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("sa_public_holidays.ics"),
        }
    }
}

/// Pushover notification settings.
///
/// Both credentials must be present for notifications to be sent;
/// otherwise the run falls back to the no-op notifier. Values support
/// `env::` and `file::` secret references.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PushoverSettings {
    /// Pushover application token.
    pub token: Option<String>,

    /// Pushover user key.
    pub user: Option<String>,
}

impl PushoverSettings {
    /// Resolves the configured credentials.
    ///
    /// Returns `Ok(None)` when either credential is absent or still set
    /// to a sample placeholder value, `Err` when a secret reference
    /// fails to resolve.
    pub fn resolve_credentials(&self) -> Result<Option<(String, String)>, String> {
        let (Some(token), Some(user)) = (&self.token, &self.user) else {
            return Ok(None);
        };

        let token = secret::resolve(token)?;
        let user = secret::resolve(user)?;

        // Sample config placeholders count as unconfigured.
        if token.is_empty()
            || user.is_empty()
            || token == "YOUR_PUSHOVER_APP_TOKEN"
            || user == "YOUR_PUSHOVER_USER_KEY"
        {
            return Ok(None);
        }

        Ok(Some((token, user)))
    }
}

/// Update schedule settings.
///
/// The tool itself runs once per invocation; the schedule only feeds the
/// "next auto-update" line of the success notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleSettings {
    /// Days between scheduled runs.
    pub interval_days: u32,
}

impl Default for ScheduleSettings {
    fn default() -> Self {
        Self { interval_days: 1 }
    }
}

impl AppConfig {
    /// Loads configuration from the default path.
    ///
    /// A missing file yields the default configuration.
    pub fn load() -> Result<Self, String> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &PathBuf) -> Result<Self, String> {
        let content =
            std::fs::read_to_string(path).map_err(|e| format!("failed to read config: {}", e))?;
        toml::from_str(&content).map_err(|e| format!("failed to parse config: {}", e))
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("icstidy")
            .join("config.toml")
    }
}
