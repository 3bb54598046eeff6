//! Feed I/O for icstidy: HTTP fetching and push notifications.
//!
//! The core transform in `icstidy-core` is pure; everything that touches
//! the network lives here. [`Fetcher`] downloads the raw ICS text,
//! [`Notifier`] implementations report the outcome of an update run.

pub mod error;
pub mod fetch;
pub mod notify;

pub use error::{FeedError, FeedResult};
pub use fetch::{FetchConfig, Fetcher};
pub use notify::{BoxFuture, NoopNotifier, Notifier, PushoverNotifier, UpdateReport};
