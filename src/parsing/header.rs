//! Header line grammar.
//!
//! A header line opens a new message:
//!
//! ```text
//! [24/05/2025, 1:39:50 AM] محمد فرج: للبيع في حي 19
//!  ^date       ^time       ^sender   ^body start
//! ```
//!
//! The sender is everything up to the first colon. The body start is the
//! remainder of the line, with at most one separating space removed.

use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;

/// Regex for `[DD/MM/YYYY, H:MM:SS AM|PM] Sender: body`.
pub const HEADER_PATTERN: &str =
    r"^\[(\d{2}/\d{2}/\d{4}),\s(\d{1,2}:\d{2}:\d{2})\s?([AP]M)\]\s([^:]+):\s?(.*)$";

/// chrono format for a canonical date + time pair.
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %I:%M:%S %p";

static HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(HEADER_PATTERN).expect("header pattern is valid regex"));

/// Fields captured from a header line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header<'a> {
    /// `DD/MM/YYYY`
    pub date: &'a str,
    /// Canonical `H:MM:SS AM|PM`, one ASCII space before the meridiem.
    pub time: String,
    /// Sender field, surrounding whitespace trimmed.
    pub sender: &'a str,
    /// Remainder of the line after `: `.
    pub body: &'a str,
}

/// Matches `line` against the header grammar.
///
/// `line` is expected to be normalized already. Returns `None` for anything
/// that is not a header, which makes it a continuation candidate.
///
/// # Example
///
/// ```rust
/// use propchat::parsing::parse_header;
///
/// let header = parse_header("[10/06/2025, 5:22:03 AM] Ahmed: Hello everyone").unwrap();
/// assert_eq!(header.date, "10/06/2025");
/// assert_eq!(header.time, "5:22:03 AM");
/// assert_eq!(header.sender, "Ahmed");
/// assert_eq!(header.body, "Hello everyone");
///
/// assert!(parse_header("just some text").is_none());
/// ```
pub fn parse_header(line: &str) -> Option<Header<'_>> {
    let caps = HEADER.captures(line)?;

    let date = caps.get(1)?.as_str();
    let clock = caps.get(2)?.as_str();
    let meridiem = caps.get(3)?.as_str();
    let sender = caps.get(4)?.as_str().trim();
    let body = caps.get(5).map_or("", |m| m.as_str());

    if sender.is_empty() {
        return None;
    }

    Some(Header {
        date,
        time: format!("{clock} {meridiem}"),
        sender,
        body,
    })
}

/// Returns `true` if `line` matches the header grammar.
pub fn is_header(line: &str) -> bool {
    parse_header(line).is_some()
}

/// Parses a header date and canonical time into a timestamp.
pub fn parse_timestamp(date: &str, time: &str) -> Option<NaiveDateTime> {
    let datetime = format!("{date} {time}");
    NaiveDateTime::parse_from_str(&datetime, TIMESTAMP_FORMAT).ok()
}
