//! Field extraction from message text.
//!
//! - [`rules`] - rule tables and match selection shared by the classifiers
//! - [`phone`] - phone numbers
//! - [`status`] - business-intent keywords
//! - [`region`] - cities, numbered districts, directional phrases
//! - [`property`] - property type cascade
//!
//! [`Analyzer`] bundles the compiled extractors and runs them over one
//! [`Message`]. The extractors are independent of each other; all of them
//! see the same stripped text.
//!
//! # Example
//!
//! ```rust
//! use propchat::config::ExtractionConfig;
//! use propchat::extract::Analyzer;
//! use propchat::extract::property::PropertyType;
//! use propchat::Message;
//!
//! let analyzer = Analyzer::new(&ExtractionConfig::default()).unwrap();
//! let msg = Message::new("_chat.txt", "24/05/2025", "1:39:50 AM", "Ali", "فيلا للبيع 📱01092400709", 1);
//!
//! let analysis = analyzer.analyze(&msg);
//! assert_eq!(analysis.cleaned, "فيلا للبيع 01092400709");
//! assert_eq!(analysis.phones[0].number, "01092400709");
//! assert_eq!(analysis.status, ["للبيع"]);
//! assert_eq!(analysis.property_type, Some(PropertyType::Villa));
//! ```

pub mod phone;
pub mod property;
pub mod region;
pub mod rules;
pub mod status;

use crate::config::ExtractionConfig;
use crate::error::Result;
use crate::message::Message;
use crate::text::strip_message;

pub use phone::{PhoneExtractor, PhoneNumber};
pub use property::{PropertyClassifier, PropertyType};
pub use region::{RegionExtractor, RegionKind};
pub use rules::{ClassificationRule, Language, RuleSet};
pub use status::{StatusCategory, StatusClassifier};

/// Everything extracted from one message.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Analysis {
    /// Body after emoji and placeholder removal
    pub cleaned: String,
    /// The sender field read as a phone number, if it is one
    pub sender_phone: Option<PhoneNumber>,
    /// Distinct phones found in the cleaned body, at most two
    pub phones: Vec<PhoneNumber>,
    /// Status keywords in order of first occurrence
    pub status: Vec<String>,
    /// Region phrases in order of first occurrence
    pub region: Vec<String>,
    /// Highest-priority property type
    pub property_type: Option<PropertyType>,
}

/// Compiled extractors for one configuration.
#[derive(Debug, Clone)]
pub struct Analyzer {
    phone: PhoneExtractor,
    status: StatusClassifier,
    region: RegionExtractor,
    property: PropertyClassifier,
    redact_phones: bool,
}

impl Analyzer {
    /// Compiles every table in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`PropchatError::InvalidRule`](crate::PropchatError::InvalidRule)
    /// if any configured pattern does not compile.
    pub fn new(config: &ExtractionConfig) -> Result<Self> {
        Ok(Self {
            phone: PhoneExtractor::new(&config.phone)?,
            status: StatusClassifier::new(&config.status_rules)?,
            region: RegionExtractor::new(&config.region_rules, config.min_region_chars)?,
            property: PropertyClassifier::new(&config.property_rules)?,
            redact_phones: config.redact_phones,
        })
    }

    /// Runs the stripper and every extractor over `message`.
    ///
    /// Never fails: absent fields are empty.
    pub fn analyze(&self, message: &Message) -> Analysis {
        let stripped = strip_message(message.body());

        let phones = self.phone.extract(&stripped);
        let status = self.status.keywords(&stripped);
        let region = self.region.extract(&stripped);
        let property_type = self.property.classify(&stripped);

        let cleaned = if self.redact_phones {
            self.redact(&stripped)
        } else {
            stripped
        };

        Analysis {
            cleaned,
            sender_phone: self.phone.parse_sender(message.sender()),
            phones,
            status,
            region,
            property_type,
        }
    }

    /// Returns the phone extractor.
    pub fn phone(&self) -> &PhoneExtractor {
        &self.phone
    }

    /// Removes every phone candidate from `text`.
    fn redact(&self, text: &str) -> String {
        let mut spans: Vec<(usize, usize)> = self
            .phone
            .find_candidates(text)
            .into_iter()
            .map(|m| (m.start, m.end))
            .collect();
        spans.sort_unstable();

        let mut out = String::with_capacity(text.len());
        let mut cursor = 0;
        for (start, end) in spans {
            if start > cursor {
                out.push_str(&text[cursor..start]);
            }
            cursor = cursor.max(end);
        }
        out.push_str(&text[cursor..]);
        out.trim().to_string()
    }
}
