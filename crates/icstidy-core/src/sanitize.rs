//! Line-oriented ICS summary sanitization.
//!
//! This module implements the one transform this project exists for:
//! walking an iCalendar document line by line, finding `SUMMARY` property
//! lines, and stripping parenthetical annotations from the event title
//! (e.g. `"Adelaide Cup (Regional Holiday)"` becomes `"Adelaide Cup"`).
//!
//! The document is treated as opaque text, not as parsed iCalendar:
//! no line unfolding, no date validation, no timezone handling. Every
//! non-`SUMMARY` line passes through byte-for-byte.
//!
//! Line-ending policy: the document is split on `\n` and rejoined with
//! `\n`. A carriage return left at the end of a line by CRLF input stays
//! on pass-through lines; on sanitized summary lines it is trimmed along
//! with other trailing whitespace, so CRLF feeds come out with their
//! summary lines LF-terminated. Trailing-newline presence is preserved.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

/// Regex matching a parenthetical annotation and the whitespace run
/// immediately before it.
///
/// `[^)]*` makes the group non-nesting: in `"Event (A (B))"` the match
/// stops at the first `)`, leaving a dangling paren behind. That is the
/// historical behavior of this feed cleaner and is kept as-is; holiday
/// titles do not nest parentheses in practice.
static PAREN_ANNOTATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\([^)]*\)").expect("Invalid annotation regex"));

/// Removes every parenthetical annotation from an event title and trims
/// surrounding whitespace.
///
/// Pure and total: any input string, including the empty string, yields
/// a result. Idempotent.
///
/// # Example
///
/// ```
/// use icstidy_core::clean_title;
///
/// assert_eq!(clean_title("Easter Saturday (Regional Holiday)"), "Easter Saturday");
/// assert_eq!(clean_title("A (x) B (y)"), "A B");
/// ```
pub fn clean_title(title: &str) -> String {
    PAREN_ANNOTATION.replace_all(title, "").trim().to_string()
}

/// Returns true if `line` is a `SUMMARY` property line.
///
/// The property name token must be exactly `SUMMARY`, immediately
/// followed by `:` (bare) or `;` (parameterized). `SUMMARY2:` or
/// `SUMMARYONLY:` are different properties and do not qualify.
pub fn is_summary_line(line: &str) -> bool {
    line.strip_prefix("SUMMARY")
        .is_some_and(|rest| rest.starts_with(':') || rest.starts_with(';'))
}

/// Sanitizes a single line.
///
/// Summary lines are split at the first colon into the structural prefix
/// (property name plus parameters, colon inclusive) and the title value;
/// the value is cleaned and the line reassembled. A summary line with no
/// colon at all is malformed and passes through untouched, as does every
/// non-summary line.
fn sanitize_line(line: &str) -> Cow<'_, str> {
    if !is_summary_line(line) {
        return Cow::Borrowed(line);
    }

    // First colon only: titles may legally contain colons of their own.
    let Some(colon) = line.find(':') else {
        debug!(line = %line, "Summary line without colon, passing through");
        return Cow::Borrowed(line);
    };

    let (prefix, value) = line.split_at(colon + 1);
    let cleaned = clean_title(value);
    if cleaned == value {
        Cow::Borrowed(line)
    } else {
        Cow::Owned(format!("{prefix}{cleaned}"))
    }
}

/// Sanitizes a whole calendar document.
///
/// Applies [`sanitize_line`] to every line and rejoins with `\n`. Line
/// count and order are preserved exactly; no lines are added, removed,
/// or reordered. Total over any input text.
pub fn sanitize_document(document: &str) -> String {
    document
        .split('\n')
        .map(sanitize_line)
        .collect::<Vec<_>>()
        .join("\n")
}
