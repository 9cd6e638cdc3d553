//! Extraction configuration.
//!
//! The rule tables are static configuration: they are compiled once when an
//! [`Analyzer`](crate::extract::Analyzer) or [`Pipeline`](crate::Pipeline)
//! is built and never change afterwards. The only supported way to change
//! them is to append entries before that point, through
//! [`RuleExtensions`].
//!
//! # Example
//!
//! ```rust
//! use propchat::config::{ExtractionConfig, RuleExtensions};
//!
//! let extensions = RuleExtensions::from_json_str(r#"{
//!     "status_rules": [
//!         { "keyword": "للتمليك", "category": "sale", "language": "arabic" }
//!     ],
//!     "local_prefixes": ["019"]
//! }"#).unwrap();
//!
//! let config = ExtractionConfig::new()
//!     .with_min_region_chars(4)
//!     .with_extensions(extensions);
//!
//! assert_eq!(config.min_region_chars, 4);
//! assert!(config.phone.local_prefixes.contains(&"019".to_string()));
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::extract::phone::{CountryCode, PhoneConfig, PhonePattern};
use crate::extract::property::{self, PropertyType};
use crate::extract::region::{self, DEFAULT_MIN_REGION_CHARS, RegionKind};
use crate::extract::rules::ClassificationRule;
use crate::extract::status::{self, StatusCategory};

/// Configuration for the extraction stage.
///
/// `Default` yields the built-in tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Phone patterns and numbering plans
    pub phone: PhoneConfig,

    /// Business-intent keyword table
    pub status_rules: Vec<ClassificationRule<StatusCategory>>,

    /// Gazetteer, district and direction rules
    pub region_rules: Vec<ClassificationRule<RegionKind>>,

    /// Property-type cascade
    pub property_rules: Vec<ClassificationRule<PropertyType>>,

    /// Shortest region phrase kept, in characters (default: 3)
    pub min_region_chars: usize,

    /// Remove phone numbers from the cleaned message (default: false)
    pub redact_phones: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            phone: PhoneConfig::default(),
            status_rules: status::default_rules(),
            region_rules: region::default_rules(),
            property_rules: property::default_rules(),
            min_region_chars: DEFAULT_MIN_REGION_CHARS,
            redact_phones: false,
        }
    }
}

impl ExtractionConfig {
    /// Creates a configuration with the built-in tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the minimum region length.
    #[must_use]
    pub fn with_min_region_chars(mut self, chars: usize) -> Self {
        self.min_region_chars = chars;
        self
    }

    /// Enables or disables phone redaction in the cleaned message.
    #[must_use]
    pub fn with_redact_phones(mut self, redact: bool) -> Self {
        self.redact_phones = redact;
        self
    }

    /// Appends every entry of `extensions` to the tables.
    ///
    /// Country codes also get their international phone pattern.
    pub fn extend(&mut self, extensions: RuleExtensions) {
        self.status_rules.extend(extensions.status_rules);
        self.region_rules.extend(extensions.region_rules);
        self.property_rules.extend(extensions.property_rules);
        self.phone.patterns.extend(extensions.phone_patterns);
        self.phone.local_prefixes.extend(extensions.local_prefixes);
        for country in extensions.country_codes {
            self.phone.patterns.push(PhonePattern::international(&country));
            self.phone.country_codes.push(country);
        }
    }

    /// Builder form of [`extend`](Self::extend).
    #[must_use]
    pub fn with_extensions(mut self, extensions: RuleExtensions) -> Self {
        self.extend(extensions);
        self
    }
}

/// Table entries to append to the built-in configuration.
///
/// Every field is optional in JSON and defaults to empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleExtensions {
    /// Extra status keywords
    pub status_rules: Vec<ClassificationRule<StatusCategory>>,
    /// Extra cities, districts and direction phrases
    pub region_rules: Vec<ClassificationRule<RegionKind>>,
    /// Extra property rules, placed by their priority
    pub property_rules: Vec<ClassificationRule<PropertyType>>,
    /// Extra phone patterns, tried after the built-in ones
    pub phone_patterns: Vec<PhonePattern>,
    /// Extra local mobile prefixes
    pub local_prefixes: Vec<String>,
    /// Extra country codes, each with its international pattern
    pub country_codes: Vec<CountryCode>,
}

impl RuleExtensions {
    /// Parses extensions from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`PropchatError::Json`](crate::PropchatError::Json) if the
    /// document is malformed.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads extensions from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Total number of entries.
    pub fn len(&self) -> usize {
        self.status_rules.len()
            + self.region_rules.len()
            + self.property_rules.len()
            + self.phone_patterns.len()
            + self.local_prefixes.len()
            + self.country_codes.len()
    }

    /// Returns `true` if there is nothing to append.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::rules::{Language, RulePattern};

    #[test]
    fn test_extraction_config_default() {
        let config = ExtractionConfig::default();
        assert_eq!(config.min_region_chars, 3);
        assert!(!config.redact_phones);
        assert!(!config.status_rules.is_empty());
        assert!(!config.region_rules.is_empty());
        assert!(!config.property_rules.is_empty());
        assert_eq!(config.phone.local_digits, 11);
    }

    #[test]
    fn test_extraction_config_builder() {
        let config = ExtractionConfig::new()
            .with_min_region_chars(5)
            .with_redact_phones(true);
        assert_eq!(config.min_region_chars, 5);
        assert!(config.redact_phones);
    }

    #[test]
    fn test_extensions_default_empty() {
        let ext = RuleExtensions::from_json_str("{}").unwrap();
        assert!(ext.is_empty());
    }

    #[test]
    fn test_extend_appends() {
        let mut config = ExtractionConfig::default();
        let before = config.property_rules.len();
        let patterns_before = config.phone.patterns.len();

        let ext = RuleExtensions::from_json_str(
            r#"{
                "property_rules": [
                    { "keyword": "شاليه", "category": "villa", "language": "arabic", "priority": 10 }
                ],
                "country_codes": [
                    { "code": "974", "national_digits": 8, "mobile_prefixes": ["3", "5"] }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(ext.len(), 2);
        config.extend(ext);

        assert_eq!(config.property_rules.len(), before + 1);
        let last = config.property_rules.last().unwrap();
        assert_eq!(last.pattern, RulePattern::Keyword("شاليه".into()));
        assert_eq!(last.language, Language::Arabic);
        assert_eq!(config.phone.patterns.len(), patterns_before + 1);
        assert_eq!(config.phone.country_codes.last().unwrap().code, "974");
    }

    #[test]
    fn test_extensions_reject_bad_json() {
        let err = RuleExtensions::from_json_str(r#"{"status_rules": 3}"#).unwrap_err();
        assert!(err.to_string().contains("JSON"));
    }

    #[test]
    fn test_extensions_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.json");
        fs::write(&path, r#"{"local_prefixes": ["019"]}"#).unwrap();
        let ext = RuleExtensions::from_path(&path).unwrap();
        assert_eq!(ext.local_prefixes, ["019"]);

        assert!(RuleExtensions::from_path(dir.path().join("missing.json")).unwrap_err().is_io());
    }

    #[test]
    fn test_config_roundtrips_through_json() {
        let config = ExtractionConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: ExtractionConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
