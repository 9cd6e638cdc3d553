//! Splitting a transcript into messages.
//!
//! The segmenter is a two-state machine driven one line at a time:
//!
//! | State | Header line | Other line |
//! |-------|-------------|------------|
//! | awaiting header | start a message | drop (orphan) |
//! | accumulating body | emit current, start a new one | append to body |
//!
//! At end of input the message in progress, if any, is emitted.
//!
//! A header match always wins. A body line that happens to look like
//! `[DD/MM/YYYY, H:MM:SS AM] x: y` therefore starts a bogus message; this is
//! a known accuracy limitation kept for compatibility with existing exports.

use std::mem;

use tracing::trace;

use crate::message::{Message, RawLine, numbered_lines};
use crate::text::normalize_line;

use super::header::parse_header;

/// Line counters for one segmented source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SegmentStats {
    /// Lines fed to the segmenter.
    pub lines: usize,
    /// Lines that opened a message.
    pub headers: usize,
    /// Lines appended to a message body.
    pub continuations: usize,
    /// Non-blank lines dropped because no message was open.
    pub orphans: usize,
    /// Whitespace-only lines.
    pub blank: usize,
}

#[derive(Debug, Default)]
enum State {
    #[default]
    AwaitingHeader,
    AccumulatingBody(Message),
}

/// Streaming segmenter over numbered lines of one source.
///
/// Implements [`Iterator`], yielding each [`Message`] as soon as the next
/// header (or end of input) closes it.
///
/// # Example
///
/// ```rust
/// use propchat::message::numbered_lines;
/// use propchat::parsing::Segmenter;
///
/// let transcript = "\
/// stray line before any header
/// [24/05/2025, 1:39:50 AM] Ali: للبيع
/// شقة 120م
/// [24/05/2025, 1:40:02 AM] Omar: مطلوب فيلا";
///
/// let messages: Vec<_> = Segmenter::new("_chat.txt", numbered_lines(transcript)).collect();
/// assert_eq!(messages.len(), 2);
/// assert_eq!(messages[0].body, "للبيع\nشقة 120م");
/// assert_eq!(messages[1].line_number, 4);
/// ```
pub struct Segmenter<I> {
    lines: I,
    source: String,
    state: State,
    stats: SegmentStats,
}

impl<I> Segmenter<I>
where
    I: Iterator<Item = RawLine>,
{
    /// Creates a segmenter for `source` over `lines`.
    pub fn new(source: impl Into<String>, lines: I) -> Self {
        Self {
            lines,
            source: source.into(),
            state: State::AwaitingHeader,
            stats: SegmentStats::default(),
        }
    }

    /// Returns the counters gathered so far.
    pub fn stats(&self) -> SegmentStats {
        self.stats
    }

    /// Advances the state machine by one line.
    ///
    /// Returns the message closed by this line, if any.
    fn feed(&mut self, raw: &RawLine) -> Option<Message> {
        self.stats.lines += 1;

        let normalized = normalize_line(&raw.text);
        let line = normalized.trim();

        if line.is_empty() {
            self.stats.blank += 1;
            return None;
        }

        if let Some(header) = parse_header(line) {
            self.stats.headers += 1;
            let next = Message::new(
                self.source.as_str(),
                header.date,
                header.time,
                header.sender,
                header.body,
                raw.number,
            );
            return match mem::replace(&mut self.state, State::AccumulatingBody(next)) {
                State::AccumulatingBody(done) => Some(done),
                State::AwaitingHeader => None,
            };
        }

        match &mut self.state {
            State::AccumulatingBody(current) => {
                self.stats.continuations += 1;
                current.append_line(line);
            }
            State::AwaitingHeader => {
                self.stats.orphans += 1;
                trace!(source = %self.source, line = raw.number, "dropping line before first header");
            }
        }
        None
    }

    /// Emits the message in progress, if any.
    fn flush(&mut self) -> Option<Message> {
        match mem::take(&mut self.state) {
            State::AccumulatingBody(done) => Some(done),
            State::AwaitingHeader => None,
        }
    }
}

impl<I> Iterator for Segmenter<I>
where
    I: Iterator<Item = RawLine>,
{
    type Item = Message;

    fn next(&mut self) -> Option<Message> {
        while let Some(raw) = self.lines.next() {
            if let Some(done) = self.feed(&raw) {
                return Some(done);
            }
        }
        self.flush()
    }
}

/// Segments a whole transcript held in memory.
pub fn segment_str(source: &str, content: &str) -> Vec<Message> {
    Segmenter::new(source, numbered_lines(content)).collect()
}
