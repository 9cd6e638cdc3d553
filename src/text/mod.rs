//! Text cleaning applied before any extraction.
//!
//! - [`normalize`] - invisible control characters, run on every raw line
//! - [`strip`] - emoji and media placeholders, run on each message body

pub mod normalize;
pub mod strip;

pub use normalize::normalize_line;
pub use strip::{strip_boilerplate, strip_emoji, strip_message};
