//! Transcript parsing.
//!
//! - [`header`] - the `[date, time] sender: body` grammar
//! - [`segmenter`] - folding lines into messages

pub mod header;
pub mod segmenter;

pub use header::{Header, is_header, parse_header, parse_timestamp};
pub use segmenter::{SegmentStats, Segmenter, segment_str};
