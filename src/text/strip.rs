//! Emoji and media-placeholder removal.
//!
//! Listings in property groups are decorated heavily (`✍️🔵**شمال المدينة`)
//! and exports replace attachments with canned placeholders such as
//! `image omitted`. Neither carries information for the extractors, and the
//! decorations routinely sit between a keyword and a number.
//!
//! Stripping only ever deletes: spaces around a removed emoji stay where
//! they were, so `"Hello 😊 World 🌍"` becomes `"Hello  World "`. The one
//! exception is a message with nothing left but whitespace, which becomes
//! the empty string.

use std::sync::LazyLock;

use regex::Regex;

/// Canned placeholders written by WhatsApp exports in place of content.
///
/// English entries match case-insensitively.
pub const MEDIA_BOILERPLATE: &[&str] = &[
    "<Media omitted>",
    "image omitted",
    "video omitted",
    "audio omitted",
    "sticker omitted",
    "GIF omitted",
    "document omitted",
    "Contact card omitted",
    "This message was deleted",
    "You deleted this message",
    "<This message was edited>",
    "This message was edited",
    "<الوسائط محذوفة>",
    "تم استبعاد الصورة",
    "تم استبعاد الفيديو",
    "تم استبعاد الصوت",
    "تم استبعاد الملصق",
    "تم استبعاد صورة GIF",
    "تم استبعاد المستند",
    "الصورة محذوفة",
    "الفيديو محذوف",
    "الصوت محذوف",
    "الملصق محذوف",
    "تم حذف هذه الرسالة",
    "حذفت هذه الرسالة",
    "<تم تعديل هذه الرسالة>",
];

static BOILERPLATE: LazyLock<Regex> = LazyLock::new(|| {
    // Longest first so "<Media omitted>" is consumed whole, brackets included.
    let mut phrases: Vec<&str> = MEDIA_BOILERPLATE.to_vec();
    phrases.sort_by_key(|p| std::cmp::Reverse(p.chars().count()));
    let alternation = phrases
        .iter()
        .map(|p| regex::escape(p))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!("(?i)(?:{alternation})")).expect("boilerplate table is valid regex")
});

/// Returns `true` if `c` lies in one of the emoji / pictograph blocks.
///
/// Variation selectors, the keycap combiner and tag characters are included
/// so that no orphaned modifier survives its base emoji.
pub fn is_emoji(c: char) -> bool {
    matches!(
        c as u32,
        0x1F000..=0x1FAFF   // pictographs, emoticons, transport, flags, skin tones
            | 0x2300..=0x23FF // misc technical (⌚ ⏰ ⏳)
            | 0x25A0..=0x25FF // geometric shapes (▶ ◀ ▪)
            | 0x2600..=0x27BF // misc symbols and dingbats (☎ ✍ ✨)
            | 0x2B00..=0x2BFF // arrows and stars (⬅ ⭐ ⭕)
            | 0x3030 | 0x303D | 0x3297 | 0x3299
            | 0x200D          // zero-width joiner
            | 0x20E3          // combining keycap
            | 0xFE00..=0xFE0F // variation selectors
            | 0xE0020..=0xE007F // tags
    )
}

/// Removes every emoji character from `text`.
pub fn strip_emoji(text: &str) -> String {
    text.chars().filter(|&c| !is_emoji(c)).collect()
}

/// Removes media/deletion placeholders until none are left.
///
/// Repeating until nothing matches keeps the function a fixed point even
/// when a removal splices two fragments into a new placeholder.
pub fn strip_boilerplate(text: &str) -> String {
    let mut current = text.to_string();
    while BOILERPLATE.is_match(&current) {
        current = BOILERPLATE.replace_all(&current, "").into_owned();
    }
    current
}

/// Produces the cleaned message for a body.
///
/// Emoji go first, then placeholders. A result that is only whitespace
/// collapses to the empty string; any other spacing is left as found.
///
/// # Example
///
/// ```rust
/// use propchat::text::strip_message;
///
/// assert_eq!(strip_message("Hello 😊 World 🌍"), "Hello  World ");
/// assert_eq!(strip_message("image omitted"), "");
/// assert_eq!(strip_message("🔥 🔥"), "");
/// ```
pub fn strip_message(text: &str) -> String {
    let stripped = strip_boilerplate(&strip_emoji(text));
    if stripped.trim().is_empty() {
        String::new()
    } else {
        stripped
    }
}
