//! Phone number extraction.
//!
//! An ordered list of patterns is applied to the cleaned message. Every
//! candidate is validated after separators are stripped and native digits
//! converted, and rejected silently if its digit count or prefix is wrong.
//! Candidates must stand alone: a match touching another digit is part of a
//! longer number and is ignored.
//!
//! Default pattern order:
//!
//! 1. local mobile, 11 digits: `01092400709`
//! 2. international, one pattern per country code: `+20 103 011 4411`,
//!    `00201092400709`
//! 3. Arabic-Indic or Persian digits: `٠١٠٩٢٤٠٠٧٠٩`
//! 4. local mobile with separators: `010 9240 0709`, `0109-240-0709`
//!
//! Patterns 1, 3 and 4 are built from the local numbering plan
//! (`local_digits`, `local_prefixes`) when the extractor is compiled, so
//! prefixes appended later are matched too.
//!
//! Two numbers are the same when their national significant numbers agree,
//! so `+201092400709` and `01092400709` count once.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{PropchatError, Result};

/// Maximum number of phones reported per record.
pub const MAX_PHONES: usize = 2;

const SEPARATOR: &str = r"[ .\-\x{A0}]";
const LOOSE_SEPARATOR: &str = r"[ .\-\x{A0}\t]{0,2}";
const NATIVE_DIGIT: &str = "[٠-٩۰-۹]";
const NEVER: &str = r"[^\s\S]";

/// Validation applied to a pattern's candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhoneFormat {
    /// Contiguous local mobile number.
    LocalMobile,
    /// `+` or `00` and a known country code.
    International,
    /// Local mobile written in non-Latin digits.
    NativeDigits,
    /// Local mobile with separators between digit groups.
    LooseLocal,
}

/// A named phone pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhonePattern {
    /// Short name used in logs
    pub name: String,
    /// How candidates are validated
    pub format: PhoneFormat,
    /// Regular expression, empty to build it from the numbering plan
    #[serde(default)]
    pub pattern: String,
}

impl PhonePattern {
    /// Creates a pattern.
    pub fn new(name: impl Into<String>, format: PhoneFormat, pattern: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            format,
            pattern: pattern.into(),
        }
    }

    /// Creates a pattern whose regex is built from the numbering plan.
    pub fn from_plan(name: impl Into<String>, format: PhoneFormat) -> Self {
        Self::new(name, format, String::new())
    }

    /// Builds the international pattern for a country code.
    ///
    /// Accepts `+` or `00`, an optional space after the code and a single
    /// separator between any two national digits.
    pub fn international(country: &CountryCode) -> Self {
        Self::new(
            format!("international +{}", country.code),
            PhoneFormat::International,
            format!(
                r"(?:\+|00)\s?{}(?:{SEPARATOR}?[0-9]){{{}}}",
                regex::escape(&country.code),
                country.national_digits
            ),
        )
    }
}

/// Country calling code with its mobile numbering plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryCode {
    /// Calling code without `+`
    pub code: String,
    /// Digits after the calling code
    pub national_digits: usize,
    /// Accepted leading digits of the national number
    pub mobile_prefixes: Vec<String>,
}

impl CountryCode {
    /// Creates a country code entry.
    pub fn new(code: &str, national_digits: usize, mobile_prefixes: &[&str]) -> Self {
        Self {
            code: code.to_string(),
            national_digits,
            mobile_prefixes: mobile_prefixes.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Phone extraction settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneConfig {
    /// Accepted local mobile prefixes (default: 010, 011, 012, 015)
    pub local_prefixes: Vec<String>,

    /// Digit count of a local mobile number (default: 11)
    pub local_digits: usize,

    /// Known country codes
    pub country_codes: Vec<CountryCode>,

    /// Patterns in the order they are applied
    pub patterns: Vec<PhonePattern>,
}

impl Default for PhoneConfig {
    fn default() -> Self {
        let country_codes = vec![
            CountryCode::new("20", 10, &["10", "11", "12", "15"]),
            CountryCode::new("966", 9, &["5"]),
            CountryCode::new("971", 9, &["5"]),
            CountryCode::new("965", 8, &["5", "6", "9"]),
        ];

        let mut patterns = vec![PhonePattern::from_plan("local", PhoneFormat::LocalMobile)];
        patterns.extend(country_codes.iter().map(PhonePattern::international));
        patterns.push(PhonePattern::from_plan("native digits", PhoneFormat::NativeDigits));
        patterns.push(PhonePattern::from_plan("loose local", PhoneFormat::LooseLocal));

        Self {
            local_prefixes: ["010", "011", "012", "015"]
                .iter()
                .map(ToString::to_string)
                .collect(),
            local_digits: 11,
            country_codes,
            patterns,
        }
    }
}

impl PhoneConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a country code and its international pattern.
    #[must_use]
    pub fn with_country_code(mut self, country: CountryCode) -> Self {
        self.patterns.push(PhonePattern::international(&country));
        self.country_codes.push(country);
        self
    }

    /// Regex for a pattern of `format` built from the numbering plan.
    ///
    /// Local formats expand every prefix, with separators allowed between
    /// digits for [`PhoneFormat::LooseLocal`]. Native digits are matched by
    /// count and validated afterwards.
    pub fn plan_pattern(&self, format: PhoneFormat) -> String {
        let rest = self.local_digits.saturating_sub(1);
        match format {
            PhoneFormat::LocalMobile => self.prefixed_pattern(""),
            PhoneFormat::LooseLocal => self.prefixed_pattern(LOOSE_SEPARATOR),
            PhoneFormat::NativeDigits => {
                format!("{NATIVE_DIGIT}(?:{SEPARATOR}?{NATIVE_DIGIT}){{{rest}}}")
            }
            PhoneFormat::International if self.country_codes.is_empty() => NEVER.to_string(),
            PhoneFormat::International => self
                .country_codes
                .iter()
                .map(|c| PhonePattern::international(c).pattern)
                .collect::<Vec<_>>()
                .join("|"),
        }
    }

    fn prefixed_pattern(&self, separator: &str) -> String {
        if self.local_prefixes.is_empty() {
            let rest = self.local_digits.saturating_sub(1);
            return format!("[0-9](?:{separator}[0-9]){{{rest}}}");
        }
        let alternatives: Vec<String> = self
            .local_prefixes
            .iter()
            .map(|prefix| {
                let head = prefix
                    .chars()
                    .map(|c| regex::escape(&c.to_string()))
                    .collect::<Vec<_>>()
                    .join(separator);
                let rest = self.local_digits.saturating_sub(prefix.chars().count());
                format!("{head}(?:{separator}[0-9]){{{rest}}}")
            })
            .collect();
        format!("(?:{})", alternatives.join("|"))
    }
}

/// A validated phone number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhoneNumber {
    /// Number as reported: local digits, or `+` and digits
    pub number: String,
    /// National significant number, used for de-duplication
    pub national: String,
    /// Format that produced it
    pub format: PhoneFormat,
}

impl PhoneNumber {
    /// Returns `true` if both values denote the same subscriber.
    pub fn same_as(&self, other: &PhoneNumber) -> bool {
        self.national == other.national
    }
}

/// A validated candidate and where it was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneMatch {
    /// Validated number
    pub phone: PhoneNumber,
    /// Byte offset of the match start
    pub start: usize,
    /// Byte offset one past the match end
    pub end: usize,
}

/// Converts an ASCII, Arabic-Indic or Persian digit to ASCII.
pub fn ascii_digit(c: char) -> Option<char> {
    match c {
        '0'..='9' => Some(c),
        '\u{0660}'..='\u{0669}' => char::from_digit(c as u32 - 0x0660, 10),
        '\u{06F0}'..='\u{06F9}' => char::from_digit(c as u32 - 0x06F0, 10),
        _ => None,
    }
}

/// Keeps only the digits of `raw`, converted to ASCII.
pub fn digits_of(raw: &str) -> String {
    raw.chars().filter_map(ascii_digit).collect()
}

#[derive(Debug, Clone)]
struct CompiledPattern {
    name: String,
    format: PhoneFormat,
    regex: Regex,
}

/// Compiled phone extractor.
///
/// # Example
///
/// ```rust
/// use propchat::extract::phone::{PhoneConfig, PhoneExtractor};
///
/// let extractor = PhoneExtractor::new(&PhoneConfig::default()).unwrap();
/// let phones = extractor.extract("call 01092400709 or +20 109 240 0709 or 0122 333 4444");
///
/// let numbers: Vec<_> = phones.iter().map(|p| p.number.as_str()).collect();
/// assert_eq!(numbers, ["01092400709", "01223334444"]);
/// ```
#[derive(Debug, Clone)]
pub struct PhoneExtractor {
    patterns: Vec<CompiledPattern>,
    local_prefixes: Vec<String>,
    local_digits: usize,
    country_codes: Vec<CountryCode>,
}

impl PhoneExtractor {
    /// Compiles the configured patterns.
    ///
    /// # Errors
    ///
    /// Returns [`PropchatError::InvalidRule`] for a pattern that does not
    /// compile.
    pub fn new(config: &PhoneConfig) -> Result<Self> {
        let patterns = config
            .patterns
            .iter()
            .map(|p| {
                let source = if p.pattern.is_empty() {
                    config.plan_pattern(p.format)
                } else {
                    p.pattern.clone()
                };
                Ok(CompiledPattern {
                    name: p.name.clone(),
                    format: p.format,
                    regex: Regex::new(&source).map_err(|e| PropchatError::invalid_rule(&source, e))?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            patterns,
            local_prefixes: config.local_prefixes.clone(),
            local_digits: config.local_digits,
            country_codes: config.country_codes.clone(),
        })
    }

    /// Returns every valid candidate, in pattern order then text order.
    ///
    /// Duplicates are kept; use [`extract`](Self::extract) for the reported
    /// list.
    pub fn find_candidates(&self, text: &str) -> Vec<PhoneMatch> {
        let mut found = Vec::new();
        for pattern in &self.patterns {
            for m in pattern.regex.find_iter(text) {
                if !is_isolated(text, m.start(), m.end()) {
                    continue;
                }
                if let Some(phone) = self.validate(pattern.format, m.as_str()) {
                    tracing::trace!(pattern = %pattern.name, number = %phone.number, "phone candidate");
                    found.push(PhoneMatch {
                        phone,
                        start: m.start(),
                        end: m.end(),
                    });
                }
            }
        }
        found
    }

    /// Returns up to [`MAX_PHONES`] distinct numbers found in `text`.
    pub fn extract(&self, text: &str) -> Vec<PhoneNumber> {
        let mut phones = Vec::new();
        for candidate in self.find_candidates(text) {
            push_distinct(&mut phones, candidate.phone);
            if phones.len() == MAX_PHONES {
                break;
            }
        }
        phones
    }

    /// Interprets a sender field that is itself a phone number.
    ///
    /// The field may only contain digits, `+` and the separators people
    /// type between digit groups. International senders with a calling code
    /// missing from the table are still accepted when they have 8 to 15
    /// digits. A leading `00` is read as `+`.
    pub fn parse_sender(&self, sender: &str) -> Option<PhoneNumber> {
        let sender = sender.trim();
        let phone_like = sender.chars().all(|c| {
            ascii_digit(c).is_some() || matches!(c, '+' | ' ' | '-' | '.' | '(' | ')' | '\u{A0}')
        });
        if !phone_like {
            return None;
        }

        if sender.starts_with('+') || sender.starts_with("00") {
            if let Some(phone) = self.validate(PhoneFormat::International, sender) {
                return Some(phone);
            }
            let digits = international_digits(&digits_of(sender)).to_string();
            return (8..=15).contains(&digits.len()).then(|| PhoneNumber {
                number: format!("+{digits}"),
                national: digits,
                format: PhoneFormat::International,
            });
        }

        self.validate(PhoneFormat::LooseLocal, sender)
    }

    fn validate(&self, format: PhoneFormat, raw: &str) -> Option<PhoneNumber> {
        let digits = digits_of(raw);
        match format {
            PhoneFormat::International => self.validate_international(&digits),
            PhoneFormat::LocalMobile | PhoneFormat::NativeDigits | PhoneFormat::LooseLocal => {
                self.validate_local(digits, format)
            }
        }
    }

    fn validate_local(&self, digits: String, format: PhoneFormat) -> Option<PhoneNumber> {
        if digits.len() != self.local_digits
            || !self.local_prefixes.iter().any(|p| digits.starts_with(p.as_str()))
        {
            return None;
        }
        let national = digits.strip_prefix('0').unwrap_or(&digits).to_string();
        Some(PhoneNumber {
            number: digits,
            national,
            format,
        })
    }

    fn validate_international(&self, digits: &str) -> Option<PhoneNumber> {
        let digits = international_digits(digits);
        let country = self.country_codes.iter().find(|c| {
            digits.starts_with(c.code.as_str()) && digits.len() == c.code.len() + c.national_digits
        })?;
        let national = &digits[country.code.len()..];
        if !country
            .mobile_prefixes
            .iter()
            .any(|p| national.starts_with(p.as_str()))
        {
            return None;
        }
        Some(PhoneNumber {
            national: national.to_string(),
            number: format!("+{digits}"),
            format: PhoneFormat::International,
        })
    }
}

/// Appends `phone` unless an equal number is already present.
///
/// Returns `true` if it was appended.
pub fn push_distinct(phones: &mut Vec<PhoneNumber>, phone: PhoneNumber) -> bool {
    if phones.iter().any(|p| p.same_as(&phone)) {
        return false;
    }
    phones.push(phone);
    true
}

/// Digits of an international number without the `00` dialling prefix.
fn international_digits(digits: &str) -> &str {
    digits.strip_prefix("00").unwrap_or(digits)
}

fn is_isolated(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(|c| ascii_digit(c).is_some())
        && !after.is_some_and(|c| ascii_digit(c).is_some())
}
