//! Core transform: ICS summary sanitization, plus shared tracing setup.

pub mod sanitize;
pub mod tracing;

pub use sanitize::{clean_title, is_summary_line, sanitize_document};
pub use tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
