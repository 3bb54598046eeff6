//! Update orchestration: fetch, sanitize, write, notify.
//!
//! One invocation performs one update. Failure at any step funnels into
//! a single failure notification; nothing is retried automatically.

use std::path::{Path, PathBuf};

use chrono::{Days, Local, NaiveDate};
use tracing::{error, info, warn};

use icstidy_core::sanitize_document;
use icstidy_feed::{FetchConfig, Fetcher, NoopNotifier, Notifier, PushoverNotifier, UpdateReport};

use crate::cli::Cli;
use crate::config::AppConfig;
use crate::error::CliResult;

/// Per-run options taken from the command line.
#[derive(Debug, Clone, Default)]
pub struct UpdateOptions {
    /// Feed URL override.
    pub url: Option<String>,
    /// Output path override.
    pub output: Option<PathBuf>,
    /// Print to stdout, skip write and notification.
    pub dry_run: bool,
}

impl UpdateOptions {
    /// Extracts the update options from parsed CLI arguments.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            url: cli.url.clone(),
            output: cli.output.clone(),
            dry_run: cli.dry_run,
        }
    }
}

/// Builds the notifier for this run.
///
/// Pushover when credentials resolve, the no-op notifier otherwise. A
/// credential reference that fails to resolve disables notifications for
/// the run rather than aborting it; the update itself is the primary job.
pub fn build_notifier(config: &AppConfig, no_notify: bool) -> Box<dyn Notifier> {
    if no_notify {
        return Box::new(NoopNotifier);
    }

    match config.pushover.resolve_credentials() {
        Ok(Some((token, user))) => match PushoverNotifier::new(token, user) {
            Ok(notifier) => Box::new(notifier),
            Err(e) => {
                warn!(error = %e, "Failed to build Pushover notifier, notifications disabled");
                Box::new(NoopNotifier)
            }
        },
        Ok(None) => Box::new(NoopNotifier),
        Err(e) => {
            warn!(error = %e, "Pushover credentials could not be resolved, notifications disabled");
            Box::new(NoopNotifier)
        }
    }
}

/// Runs one update and reports the outcome through the notifier.
///
/// Dry runs print the sanitized document and touch neither the output
/// file nor the notifier.
pub async fn run(
    config: &AppConfig,
    options: &UpdateOptions,
    notifier: &dyn Notifier,
) -> CliResult<()> {
    let fetch_config = config.feed.to_fetch_config(options.url.as_deref());
    let output = options
        .output
        .clone()
        .unwrap_or_else(|| config.output.path.clone());

    let report = UpdateReport::new(&fetch_config.url).with_next_update(next_update_date(
        Local::now().date_naive(),
        config.schedule.interval_days,
    ));

    match update(fetch_config, &output, options.dry_run).await {
        Ok(()) => {
            if !options.dry_run
                && let Err(e) = notifier.notify_success(&report).await
            {
                error!(error = %e, "Failed to send success notification");
            }
            Ok(())
        }
        Err(e) => {
            if !options.dry_run
                && let Err(notify_err) = notifier.notify_failure(&report, &e.to_string()).await
            {
                error!(error = %notify_err, "Failed to send failure notification");
            }
            Err(e)
        }
    }
}

/// The update pipeline itself: fetch, sanitize, publish.
async fn update(fetch_config: FetchConfig, output: &Path, dry_run: bool) -> CliResult<()> {
    info!(url = %fetch_config.url, "Downloading calendar feed");
    let fetcher = Fetcher::new(fetch_config)?;
    let raw = fetcher.fetch().await?;

    info!("Cleaning event titles");
    let cleaned = sanitize_document(&raw);

    if dry_run {
        println!("{}", cleaned);
        return Ok(());
    }

    publish(&cleaned, output).await?;
    info!("Calendar updated");
    Ok(())
}

/// Writes the sanitized document to the output path.
async fn publish(document: &str, output: &Path) -> CliResult<()> {
    info!(path = %output.display(), "Saving calendar");
    tokio::fs::write(output, document).await?;
    Ok(())
}

/// Computes the next scheduled update date for the success message.
fn next_update_date(today: NaiveDate, interval_days: u32) -> NaiveDate {
    today
        .checked_add_days(Days::new(interval_days as u64))
        .unwrap_or(today)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use icstidy_feed::{BoxFuture, FeedResult};

    /// Notifier that records its calls for assertions.
    #[derive(Default)]
    struct RecordingNotifier {
        calls: Mutex<Vec<String>>,
    }

    impl RecordingNotifier {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl Notifier for RecordingNotifier {
        fn notify_success<'a>(&'a self, _report: &'a UpdateReport) -> BoxFuture<'a, FeedResult<()>> {
            Box::pin(async move {
                self.calls.lock().unwrap().push("success".to_string());
                Ok(())
            })
        }

        fn notify_failure<'a>(
            &'a self,
            _report: &'a UpdateReport,
            reason: &'a str,
        ) -> BoxFuture<'a, FeedResult<()>> {
            Box::pin(async move {
                self.calls
                    .lock()
                    .unwrap()
                    .push(format!("failure: {}", reason));
                Ok(())
            })
        }
    }

    fn config_with_url(url: &str) -> AppConfig {
        let mut config = AppConfig::default();
        config.feed.url = url.to_string();
        config
    }

    #[test]
    fn next_update_is_interval_days_ahead() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
        assert_eq!(
            next_update_date(today, 1),
            NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
        );
        assert_eq!(
            next_update_date(today, 7),
            NaiveDate::from_ymd_opt(2025, 3, 16).unwrap()
        );
    }

    #[tokio::test]
    async fn publish_writes_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.ics");

        publish("BEGIN:VCALENDAR\nEND:VCALENDAR", &path).await.unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "BEGIN:VCALENDAR\nEND:VCALENDAR");
    }

    #[tokio::test]
    async fn failed_update_sends_one_failure_notification() {
        // An unparseable URL fails before any network traffic.
        let config = config_with_url("not a url");
        let notifier = RecordingNotifier::default();

        let result = run(&config, &UpdateOptions::default(), &notifier).await;

        assert!(result.is_err());
        let calls = notifier.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].starts_with("failure: configuration error"));
    }

    #[tokio::test]
    async fn dry_run_failure_skips_notification() {
        let config = config_with_url("not a url");
        let notifier = RecordingNotifier::default();
        let options = UpdateOptions {
            dry_run: true,
            ..Default::default()
        };

        let result = run(&config, &options, &notifier).await;

        assert!(result.is_err());
        assert!(notifier.calls().is_empty());
    }
}
