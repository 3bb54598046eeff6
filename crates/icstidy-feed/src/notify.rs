//! Push notifications for update outcomes.
//!
//! The orchestrator reports exactly once per run, success or failure,
//! through a [`Notifier`]. The real implementation posts to the Pushover
//! API; [`NoopNotifier`] covers the credentials-absent case so callers
//! never have to branch on configuration themselves.

use std::future::Future;
use std::pin::Pin;

use chrono::NaiveDate;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{FeedError, FeedResult};
use crate::fetch::excerpt;

/// Pushover message endpoint.
const PUSHOVER_API_URL: &str = "https://api.pushover.net/1/messages.json";

/// A boxed future for async trait methods, keeping [`Notifier`]
/// object-safe.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Context for notification messages.
///
/// Built once by the orchestrator so message formatting stays pure.
#[derive(Debug, Clone)]
pub struct UpdateReport {
    /// The feed URL that was (or failed to be) updated.
    pub source_url: String,
    /// When the next automatic update is scheduled, if known.
    pub next_update: Option<NaiveDate>,
}

impl UpdateReport {
    /// Creates a report for the given feed URL.
    pub fn new(source_url: impl Into<String>) -> Self {
        Self {
            source_url: source_url.into(),
            next_update: None,
        }
    }

    /// Builder: set the next scheduled update date.
    pub fn with_next_update(mut self, date: NaiveDate) -> Self {
        self.next_update = Some(date);
        self
    }
}

/// Reports the outcome of an update run.
pub trait Notifier: Send + Sync {
    /// Reports a successful update.
    fn notify_success<'a>(&'a self, report: &'a UpdateReport) -> BoxFuture<'a, FeedResult<()>>;

    /// Reports a failed update with an excerpt of the error.
    fn notify_failure<'a>(
        &'a self,
        report: &'a UpdateReport,
        reason: &'a str,
    ) -> BoxFuture<'a, FeedResult<()>>;
}

/// Form payload for the Pushover message API.
#[derive(Serialize)]
struct PushoverMessage<'a> {
    token: &'a str,
    user: &'a str,
    message: &'a str,
}

/// Notifier that posts to the Pushover message API.
pub struct PushoverNotifier {
    token: String,
    user: String,
    client: Client,
}

impl PushoverNotifier {
    /// Creates a new Pushover notifier with the given credentials.
    pub fn new(token: impl Into<String>, user: impl Into<String>) -> FeedResult<Self> {
        let token = token.into();
        let user = user.into();
        if token.is_empty() || user.is_empty() {
            return Err(FeedError::Configuration(
                "pushover token and user must be non-empty".into(),
            ));
        }

        let client = Client::builder()
            .build()
            .map_err(|e| FeedError::Network(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            token,
            user,
            client,
        })
    }

    async fn post(&self, message: &str) -> FeedResult<()> {
        let payload = PushoverMessage {
            token: &self.token,
            user: &self.user,
            message,
        };

        let response = self
            .client
            .post(PUSHOVER_API_URL)
            .form(&payload)
            .send()
            .await
            .map_err(|e| FeedError::Network(format!("notification request failed: {}", e)))?;

        let status = response.status();
        if status.is_success() {
            info!("Notification sent");
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(FeedError::Notification(format!(
                "pushover returned {}: {}",
                status,
                excerpt(&body)
            )))
        }
    }
}

impl Notifier for PushoverNotifier {
    fn notify_success<'a>(&'a self, report: &'a UpdateReport) -> BoxFuture<'a, FeedResult<()>> {
        Box::pin(async move {
            debug!("Sending success notification");
            self.post(&success_message(report)).await
        })
    }

    fn notify_failure<'a>(
        &'a self,
        report: &'a UpdateReport,
        reason: &'a str,
    ) -> BoxFuture<'a, FeedResult<()>> {
        Box::pin(async move {
            debug!("Sending failure notification");
            self.post(&failure_message(report, reason)).await
        })
    }
}

/// Notifier used when push credentials are not configured.
///
/// Logs the outcome locally and always succeeds.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify_success<'a>(&'a self, _report: &'a UpdateReport) -> BoxFuture<'a, FeedResult<()>> {
        Box::pin(async {
            warn!("Pushover credentials not configured, skipping success notification");
            Ok(())
        })
    }

    fn notify_failure<'a>(
        &'a self,
        _report: &'a UpdateReport,
        reason: &'a str,
    ) -> BoxFuture<'a, FeedResult<()>> {
        Box::pin(async move {
            warn!(reason = %reason, "Pushover credentials not configured, skipping failure notification");
            Ok(())
        })
    }
}

/// Formats the success message.
fn success_message(report: &UpdateReport) -> String {
    let next_update = match report.next_update {
        Some(date) => date.format("%A %d %B %Y").to_string(),
        None => "on the next scheduled run".to_string(),
    };

    format!(
        "✅ SA Public Holidays Updated ✅\n\n\
         SA Public Holiday calendar was successfully updated!\n\n\
         🕒 Next auto-update:\n{}\n\n\
         🌞 Have a nice day! 🌞",
        next_update
    )
}

/// Formats the failure message with an error excerpt.
fn failure_message(report: &UpdateReport, reason: &str) -> String {
    format!(
        "‼️ SA Calendar Update Failed ‼️\n\n\
         Your SA Public Holiday calendar could not be updated. \
         Check the workflow logs to see which step failed. 🔎\n\n\
         🌐 Calendar source: {}\n\n\
         📝 Error Log:\n{}",
        report.source_url, reason
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_message_includes_next_update_date() {
        let report = UpdateReport::new("https://example.com/feed.ics")
            .with_next_update(NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());
        let message = success_message(&report);
        assert!(message.contains("Monday 10 March 2025"));
        assert!(message.contains("successfully updated"));
    }

    #[test]
    fn success_message_without_date_falls_back() {
        let report = UpdateReport::new("https://example.com/feed.ics");
        let message = success_message(&report);
        assert!(message.contains("on the next scheduled run"));
    }

    #[test]
    fn failure_message_includes_source_and_reason() {
        let report = UpdateReport::new("https://example.com/feed.ics");
        let message = failure_message(&report, "server error (503): unavailable");
        assert!(message.contains("https://example.com/feed.ics"));
        assert!(message.contains("server error (503): unavailable"));
    }

    #[test]
    fn pushover_rejects_empty_credentials() {
        assert!(matches!(
            PushoverNotifier::new("", "user"),
            Err(FeedError::Configuration(_))
        ));
        assert!(matches!(
            PushoverNotifier::new("token", ""),
            Err(FeedError::Configuration(_))
        ));
    }

    #[tokio::test]
    async fn noop_notifier_always_succeeds() {
        let report = UpdateReport::new("https://example.com/feed.ics");
        assert!(NoopNotifier.notify_success(&report).await.is_ok());
        assert!(NoopNotifier.notify_failure(&report, "boom").await.is_ok());
    }
}
