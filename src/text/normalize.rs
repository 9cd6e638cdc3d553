//! Removal of invisible Unicode control characters.
//!
//! Chat exports are littered with characters that render as nothing:
//! left-to-right / right-to-left marks around phone numbers, embedding and
//! isolate controls around mixed Arabic/English names, zero-width joiners
//! inside emoji sequences, and a byte order mark on the first line.
//! They break every pattern that follows, so they go before anything else
//! looks at a line.
//!
//! The non-breaking space family is not deleted but turned into an ordinary
//! space: newer exports put U+202F between the clock and `AM`/`PM`, and
//! deleting it would glue the two together.

use std::borrow::Cow;

/// Returns `true` for characters that are dropped entirely.
pub fn is_invisible(c: char) -> bool {
    matches!(
        c,
        '\u{00AD}'                  // soft hyphen
            | '\u{061C}'            // arabic letter mark
            | '\u{200B}'..='\u{200F}' // zero-width space/joiners, LRM, RLM
            | '\u{202A}'..='\u{202E}' // bidi embeddings and overrides
            | '\u{2060}'..='\u{2064}' // word joiner, invisible operators
            | '\u{2066}'..='\u{2069}' // bidi isolates
            | '\u{FEFF}' // byte order mark
    )
}

/// Returns `true` for space characters that are replaced by `' '`.
pub fn is_nonbreaking_space(c: char) -> bool {
    matches!(c, '\u{00A0}' | '\u{2007}' | '\u{202F}')
}

/// Normalizes one raw transcript line.
///
/// Invisible control characters are removed and non-breaking spaces become
/// plain spaces. Everything else, including emoji, passes through untouched.
/// Normalizing already normalized text returns it unchanged.
///
/// # Example
///
/// ```rust
/// use propchat::text::normalize_line;
///
/// let raw = "\u{202A}+20 103 011 4411\u{202C}: Hello";
/// assert_eq!(normalize_line(raw), "+20 103 011 4411: Hello");
///
/// let time = "5:22:03\u{202F}AM";
/// assert_eq!(normalize_line(time), "5:22:03 AM");
/// ```
pub fn normalize_line(line: &str) -> Cow<'_, str> {
    if !line
        .chars()
        .any(|c| is_invisible(c) || is_nonbreaking_space(c))
    {
        return Cow::Borrowed(line);
    }

    let normalized = line
        .chars()
        .filter(|&c| !is_invisible(c))
        .map(|c| if is_nonbreaking_space(c) { ' ' } else { c })
        .collect();
    Cow::Owned(normalized)
}
