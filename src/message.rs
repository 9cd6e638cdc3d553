//! Transcript lines and segmented messages.
//!
//! A transcript enters the pipeline as a sequence of [`RawLine`]s and leaves
//! the segmenter as a sequence of [`Message`]s. A message is the raw material
//! for a [`Record`](crate::Record): it still carries the sender exactly as
//! written and the body exactly as segmented.
//!
//! # Examples
//!
//! ```
//! use propchat::message::{Message, RawLine};
//!
//! let line = RawLine::new(1, "[24/05/2025, 1:39:50 AM] محمد فرج: للبيع");
//! assert_eq!(line.number, 1);
//!
//! let mut msg = Message::new("_chat.txt", "24/05/2025", "1:39:50 AM", "محمد فرج", "للبيع", 1);
//! msg.append_line("شقة 120م");
//! assert_eq!(msg.body(), "للبيع\nشقة 120م");
//! assert!(msg.timestamp().is_some());
//! ```

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::parsing::header::parse_timestamp;

/// One line of transcript text with its 1-based position in the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawLine {
    /// 1-based line number within the source.
    pub number: usize,
    /// Line text without the line terminator.
    pub text: String,
}

impl RawLine {
    /// Creates a new raw line.
    pub fn new(number: usize, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
        }
    }
}

/// Numbers the lines of `content` starting at 1.
///
/// Both `\n` and `\r\n` terminators are accepted.
///
/// ```
/// use propchat::message::numbered_lines;
///
/// let lines: Vec<_> = numbered_lines("a\r\nb").collect();
/// assert_eq!(lines[1].number, 2);
/// assert_eq!(lines[1].text, "b");
/// ```
pub fn numbered_lines(content: &str) -> impl Iterator<Item = RawLine> + '_ {
    content
        .lines()
        .enumerate()
        .map(|(i, text)| RawLine::new(i + 1, text))
}

/// A message recovered from a transcript, before any cleaning.
///
/// The header fields (`date`, `time`, `sender`) never appear in `body`.
/// Continuation lines are appended to `body` with a line break.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Identifier of the transcript this message came from.
    pub source: String,

    /// Date as written in the header, `DD/MM/YYYY`.
    pub date: String,

    /// Time as written in the header, `H:MM:SS AM|PM`.
    pub time: String,

    /// Sender field exactly as captured from the header.
    pub sender: String,

    /// Message text, header excluded.
    pub body: String,

    /// Line number of the header line.
    pub line_number: usize,
}

impl Message {
    /// Creates a message from header fields and the start of its body.
    pub fn new(
        source: impl Into<String>,
        date: impl Into<String>,
        time: impl Into<String>,
        sender: impl Into<String>,
        body: impl Into<String>,
        line_number: usize,
    ) -> Self {
        Self {
            source: source.into(),
            date: date.into(),
            time: time.into(),
            sender: sender.into(),
            body: body.into(),
            line_number,
        }
    }

    /// Appends a continuation line to the body.
    pub fn append_line(&mut self, line: &str) {
        self.body.push('\n');
        self.body.push_str(line);
    }

    /// Returns the message body.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns the raw sender field.
    pub fn sender(&self) -> &str {
        &self.sender
    }

    /// Parses `date` and `time` into a timestamp.
    ///
    /// Returns `None` for header dates that match the grammar but are not
    /// real calendar dates (`31/02/2025`).
    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        parse_timestamp(&self.date, &self.time)
    }

    /// Returns `true` if the body is empty or whitespace-only.
    pub fn is_empty(&self) -> bool {
        self.body.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn sample() -> Message {
        Message::new("_chat.txt", "24/05/2025", "1:39:50 AM", "محمد فرج", "للبيع", 7)
    }

    #[test]
    fn test_message_new() {
        let msg = sample();
        assert_eq!(msg.sender(), "محمد فرج");
        assert_eq!(msg.body(), "للبيع");
        assert_eq!(msg.line_number, 7);
        assert_eq!(msg.source, "_chat.txt");
    }

    #[test]
    fn test_append_line() {
        let mut msg = sample();
        msg.append_line("في حي 19");
        msg.append_line("مساحة 276");
        assert_eq!(msg.body(), "للبيع\nفي حي 19\nمساحة 276");
    }

    #[test]
    fn test_timestamp() {
        let expected = NaiveDate::from_ymd_opt(2025, 5, 24)
            .unwrap()
            .and_time(NaiveTime::from_hms_opt(1, 39, 50).unwrap());
        assert_eq!(sample().timestamp(), Some(expected));

        let pm = Message::new("s", "10/06/2025", "5:22:03 PM", "a", "b", 1);
        assert_eq!(pm.timestamp().unwrap().format("%H:%M").to_string(), "17:22");
    }

    #[test]
    fn test_timestamp_invalid_date() {
        let msg = Message::new("s", "31/02/2025", "1:00:00 AM", "a", "b", 1);
        assert!(msg.timestamp().is_none());
    }

    #[test]
    fn test_is_empty() {
        let mut msg = sample();
        assert!(!msg.is_empty());
        msg.body = "  ".into();
        assert!(msg.is_empty());
    }

    #[test]
    fn test_numbered_lines() {
        let lines: Vec<RawLine> = numbered_lines("first\nsecond\n\nfourth").collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], RawLine::new(1, "first"));
        assert_eq!(lines[3], RawLine::new(4, "fourth"));
    }

    #[test]
    fn test_message_serialization() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert!(json.contains("24/05/2025"));
        let parsed: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, sample());
    }
}
