//! HTTP client for downloading the calendar feed.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use tracing::{debug, trace, warn};

use crate::error::{FeedError, FeedResult};

/// Configuration for the feed fetcher.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// The feed URL to download.
    pub url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// User-Agent header value.
    pub user_agent: String,
    /// Whether to verify TLS certificates.
    pub verify_tls: bool,
}

impl FetchConfig {
    /// Creates a new fetch configuration for the given URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: Duration::from_secs(30),
            user_agent: format!("icstidy/{}", env!("CARGO_PKG_VERSION")),
            verify_tls: true,
        }
    }

    /// Builder: set request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builder: set User-Agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Builder: set TLS verification.
    pub fn with_verify_tls(mut self, verify: bool) -> Self {
        self.verify_tls = verify;
        self
    }
}

/// HTTP client for downloading the calendar feed.
pub struct Fetcher {
    client: Client,
    config: FetchConfig,
}

impl Fetcher {
    /// Creates a new fetcher with the given configuration.
    pub fn new(config: FetchConfig) -> FeedResult<Self> {
        url::Url::parse(&config.url)
            .map_err(|e| FeedError::Configuration(format!("invalid feed URL: {}", e)))?;

        let client = Client::builder()
            .danger_accept_invalid_certs(!config.verify_tls)
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| FeedError::Network(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Downloads the feed and returns the decoded body text.
    ///
    /// Character decoding is reqwest's job (charset from the
    /// Content-Type header, UTF-8 fallback); callers always receive a
    /// ready-to-use string.
    pub async fn fetch(&self) -> FeedResult<String> {
        trace!(url = %self.config.url, "Sending GET request");

        let response = self
            .client
            .get(&self.config.url)
            .send()
            .await
            .map_err(|e| FeedError::Network(format!("request failed: {}", e)))?;

        let status = response.status();
        trace!(status = %status, "Received response");

        match status {
            StatusCode::OK => {
                let body = response
                    .text()
                    .await
                    .map_err(|e| FeedError::Network(format!("failed to read response: {}", e)))?;
                debug!(bytes = body.len(), "Feed downloaded");
                Ok(body)
            }
            StatusCode::NOT_FOUND => Err(FeedError::NotFound(self.config.url.clone())),
            s if s.is_server_error() => {
                let body = response.text().await.unwrap_or_default();
                Err(FeedError::Server {
                    status: s.as_u16(),
                    body: excerpt(&body),
                })
            }
            s => {
                let body = response.text().await.unwrap_or_default();
                warn!(status = %s, "Unexpected response status");
                Err(FeedError::UnexpectedStatus {
                    status: s.as_u16(),
                    body: excerpt(&body),
                })
            }
        }
    }

    /// Returns the feed URL from the configuration.
    pub fn url(&self) -> &str {
        &self.config.url
    }
}

/// Truncates an error body to a readable excerpt for messages and logs.
pub(crate) fn excerpt(body: &str) -> String {
    const MAX: usize = 200;
    let trimmed = body.trim();
    if trimmed.chars().count() <= MAX {
        trimmed.to_string()
    } else {
        let cut: String = trimmed.chars().take(MAX).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = FetchConfig::new("https://example.com/feed.ics");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.verify_tls);
        assert!(config.user_agent.starts_with("icstidy/"));
    }

    #[test]
    fn config_builders() {
        let config = FetchConfig::new("https://example.com/feed.ics")
            .with_timeout(Duration::from_secs(5))
            .with_user_agent("test-agent")
            .with_verify_tls(false);
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.user_agent, "test-agent");
        assert!(!config.verify_tls);
    }

    #[test]
    fn fetcher_rejects_invalid_url() {
        let result = Fetcher::new(FetchConfig::new("not a url"));
        assert!(matches!(result, Err(FeedError::Configuration(_))));
    }

    #[test]
    fn fetcher_exposes_url() {
        let fetcher = Fetcher::new(FetchConfig::new("https://example.com/feed.ics")).unwrap();
        assert_eq!(fetcher.url(), "https://example.com/feed.ics");
    }

    #[test]
    fn excerpt_truncates_long_bodies() {
        let long = "x".repeat(500);
        let cut = excerpt(&long);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), 203);

        assert_eq!(excerpt("  short  "), "short");
    }
}
