//! Business-intent keywords.
//!
//! Reports every distinct keyword found, not just its category: a listing
//! saying both `للبيع` and `للإيجار` gets both.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::rules::{ClassificationRule, Language, RuleSet, select_matches};
use crate::error::Result;

/// Intent a status keyword signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusCategory {
    Sale,
    Wanted,
    Offered,
    Rent,
    Investment,
}

impl StatusCategory {
    /// Lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            StatusCategory::Sale => "sale",
            StatusCategory::Wanted => "wanted",
            StatusCategory::Offered => "offered",
            StatusCategory::Rent => "rent",
            StatusCategory::Investment => "investment",
        }
    }
}

impl fmt::Display for StatusCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Built-in bilingual status table.
pub fn default_rules() -> Vec<ClassificationRule<StatusCategory>> {
    use Language::{Arabic, English};
    use StatusCategory::{Investment, Offered, Rent, Sale, Wanted};

    let table: &[(&str, StatusCategory, Language)] = &[
        ("للبيع", Sale, Arabic),
        ("بيع", Sale, Arabic),
        ("for sale", Sale, English),
        ("sale", Sale, English),
        ("selling", Sale, English),
        ("مطلوب", Wanted, Arabic),
        ("مطلوبة", Wanted, Arabic),
        ("wanted", Wanted, English),
        ("looking for", Wanted, English),
        ("required", Wanted, English),
        ("معروض", Offered, Arabic),
        ("متاح", Offered, Arabic),
        ("متاحة", Offered, Arabic),
        ("available", Offered, English),
        ("offer", Offered, English),
        ("للإيجار", Rent, Arabic),
        ("للايجار", Rent, Arabic),
        ("إيجار", Rent, Arabic),
        ("ايجار", Rent, Arabic),
        ("for rent", Rent, English),
        ("rent", Rent, English),
        ("للاستثمار", Investment, Arabic),
        ("استثماري", Investment, Arabic),
        ("استثمار", Investment, Arabic),
        ("investment", Investment, English),
        ("invest", Investment, English),
    ];

    table
        .iter()
        .map(|&(keyword, category, language)| ClassificationRule::keyword(keyword, category, language))
        .collect()
}

/// A status keyword found in a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusHit {
    /// Table keyword that matched
    pub keyword: String,
    /// Intent it signals
    pub category: StatusCategory,
}

/// Keyword classifier for business intent.
#[derive(Debug, Clone)]
pub struct StatusClassifier {
    rules: RuleSet<StatusCategory>,
}

impl StatusClassifier {
    /// Compiles a status table.
    ///
    /// # Errors
    ///
    /// Fails if a rule does not compile.
    pub fn new(rules: &[ClassificationRule<StatusCategory>]) -> Result<Self> {
        Ok(Self {
            rules: RuleSet::compile(rules)?,
        })
    }

    /// Returns the distinct keywords in `text`, in order of first occurrence.
    ///
    /// # Example
    ///
    /// ```rust
    /// use propchat::extract::status::{StatusCategory, StatusClassifier, default_rules};
    ///
    /// let classifier = StatusClassifier::new(&default_rules()).unwrap();
    /// let hits = classifier.classify("شقة للبيع او للايجار");
    ///
    /// assert_eq!(hits[0].keyword, "للبيع");
    /// assert_eq!(hits[1].category, StatusCategory::Rent);
    /// ```
    pub fn classify(&self, text: &str) -> Vec<StatusHit> {
        select_matches(self.rules.find_all(text), 0)
            .into_iter()
            .map(|m| StatusHit {
                keyword: m.label,
                category: m.category,
            })
            .collect()
    }

    /// Returns only the matched keywords.
    pub fn keywords(&self, text: &str) -> Vec<String> {
        self.classify(text).into_iter().map(|h| h.keyword).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keywords(text: &str) -> Vec<String> {
        StatusClassifier::new(&default_rules()).unwrap().keywords(text)
    }

    #[test]
    fn test_arabic_sale() {
        assert_eq!(keywords("للبيع في حي 19 مجاورة 1"), ["للبيع"]);
    }

    #[test]
    fn test_multiple_categories() {
        let hits = StatusClassifier::new(&default_rules())
            .unwrap()
            .classify("مطلوب شقة للإيجار");
        let categories: Vec<_> = hits.iter().map(|h| h.category).collect();
        assert_eq!(categories, [StatusCategory::Wanted, StatusCategory::Rent]);
    }

    #[test]
    fn test_english_case_insensitive_reports_table_keyword() {
        assert_eq!(keywords("Villa FOR SALE in Zayed"), ["for sale"]);
        assert_eq!(keywords("Looking For a flat, RENT"), ["looking for", "rent"]);
    }

    #[test]
    fn test_english_whole_words() {
        assert!(keywords("salesman parents offering").is_empty());
    }

    #[test]
    fn test_longer_keyword_hides_shorter() {
        assert_eq!(keywords("فرصة للاستثمار"), ["للاستثمار"]);
        assert_eq!(keywords("متاحة الان"), ["متاحة"]);
    }

    #[test]
    fn test_keyword_inside_place_name_ignored() {
        assert_eq!(keywords("مطلوب في حي الربيع"), ["مطلوب"]);
        assert_eq!(keywords("شقة بيع فوري"), ["بيع"]);
    }

    #[test]
    fn test_repeated_keyword_once() {
        assert_eq!(keywords("للبيع للبيع للبيع"), ["للبيع"]);
    }

    #[test]
    fn test_no_match_is_empty() {
        assert!(keywords("صباح الخير").is_empty());
        assert!(keywords("").is_empty());
    }

    #[test]
    fn test_category_serde() {
        assert_eq!(serde_json::to_string(&StatusCategory::Investment).unwrap(), "\"investment\"");
        assert_eq!(StatusCategory::Offered.to_string(), "offered");
    }
}
