//! Property-type classification.
//!
//! A first-match-wins cascade over priority tiers:
//!
//! | Priority | Evidence | Type |
//! |----------|----------|------|
//! | 10 | villa keywords | villa |
//! | 20 | apartment keywords | apartment |
//! | 30 | commercial keywords | commercial |
//! | 40 | land keywords | land |
//! | 50 | rooms and amenities | apartment |
//! | 60 | plot area or building licence | land |
//!
//! A message mentioning both `شقة` and `فيلا` is a villa. The cascade does
//! not try to find the dominant type, only the highest-ranked one.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::rules::{ClassificationRule, Language, RuleSet};
use crate::error::{PropchatError, Result};

/// Property category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    Apartment,
    Villa,
    Land,
    Commercial,
}

impl PropertyType {
    /// All variants.
    pub const ALL: [PropertyType; 4] = [
        PropertyType::Apartment,
        PropertyType::Villa,
        PropertyType::Land,
        PropertyType::Commercial,
    ];

    /// Output label.
    pub fn as_str(self) -> &'static str {
        match self {
            PropertyType::Apartment => "apartment",
            PropertyType::Villa => "villa",
            PropertyType::Land => "land",
            PropertyType::Commercial => "commercial",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyType {
    type Err = PropchatError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "apartment" => Ok(PropertyType::Apartment),
            "villa" => Ok(PropertyType::Villa),
            "land" => Ok(PropertyType::Land),
            "commercial" => Ok(PropertyType::Commercial),
            other => Err(PropchatError::invalid_format(
                "property type",
                format!("unknown property type '{other}'"),
            )),
        }
    }
}

/// Priority tier of villa keywords.
pub const VILLA_PRIORITY: u32 = 10;
/// Priority tier of apartment keywords.
pub const APARTMENT_PRIORITY: u32 = 20;
/// Priority tier of commercial keywords.
pub const COMMERCIAL_PRIORITY: u32 = 30;
/// Priority tier of land keywords.
pub const LAND_PRIORITY: u32 = 40;
/// Priority tier of the room/amenity fallback.
pub const APARTMENT_CONTEXT_PRIORITY: u32 = 50;
/// Priority tier of the area/licence fallback.
pub const LAND_CONTEXT_PRIORITY: u32 = 60;

type Tier = (PropertyType, u32, &'static [&'static str], &'static [&'static str]);

const TIERS: &[Tier] = &[
    (
        PropertyType::Villa,
        VILLA_PRIORITY,
        &["فيلا", "فيله", "فلل", "فيلات", "تاون هاوس", "توين هاوس", "قصر"],
        &["villa", "villas", "townhouse", "town house", "twin house"],
    ),
    (
        PropertyType::Apartment,
        APARTMENT_PRIORITY,
        &["شقة", "شقه", "شقق", "دوبلكس", "بنتهاوس", "بنت هاوس", "ستوديو", "روف"],
        &["apartment", "apartments", "flat", "duplex", "penthouse", "studio", "roof"],
    ),
    (
        PropertyType::Commercial,
        COMMERCIAL_PRIORITY,
        &[
            "محل", "محلات", "مكتب", "مقر اداري", "مقر إداري", "وحدة ادارية", "وحدة إدارية",
            "تجاري", "عيادة", "عياده", "مخزن",
        ],
        &["shop", "store", "office", "commercial", "clinic", "warehouse", "retail"],
    ),
    (
        PropertyType::Land,
        LAND_PRIORITY,
        &["أرض", "ارض", "قطعة", "قطعه", "فدان"],
        &["land", "plot", "feddan"],
    ),
    (
        PropertyType::Apartment,
        APARTMENT_CONTEXT_PRIORITY,
        &["غرف", "غرفة", "غرفه", "اوضة", "اوضه", "اوض", "حمام", "ريسبشن", "مطبخ"],
        &["rooms", "room", "bedroom", "bedrooms", "bathroom", "bathrooms", "reception", "kitchen"],
    ),
    (
        PropertyType::Land,
        LAND_CONTEXT_PRIORITY,
        &["مساحة", "مساحه", "رخصة", "رخصه", "ترخيص", "مباني"],
        &["area", "sqm", "license", "licence"],
    ),
];

/// Built-in property table, every tier in cascade order.
pub fn default_rules() -> Vec<ClassificationRule<PropertyType>> {
    let mut rules = Vec::new();
    for &(property, priority, arabic, english) in TIERS {
        let keywords = arabic
            .iter()
            .map(|k| (*k, Language::Arabic))
            .chain(english.iter().map(|k| (*k, Language::English)));
        rules.extend(keywords.map(|(keyword, language)| {
            ClassificationRule::keyword(keyword, property, language).with_priority(priority)
        }));
        if priority == LAND_CONTEXT_PRIORITY {
            // metres, not "metro"
            rules.push(
                ClassificationRule::pattern(r"متر\b", property, Language::Arabic)
                    .with_priority(priority),
            );
        }
    }
    rules
}

/// Priority-cascade property classifier.
///
/// # Example
///
/// ```rust
/// use propchat::extract::property::{PropertyClassifier, PropertyType, default_rules};
///
/// let classifier = PropertyClassifier::new(&default_rules()).unwrap();
///
/// assert_eq!(classifier.classify("شقة او فيلا"), Some(PropertyType::Villa));
/// assert_eq!(classifier.classify("3 غرف و 2 حمام"), Some(PropertyType::Apartment));
/// assert_eq!(classifier.classify("مرحبا"), None);
/// ```
#[derive(Debug, Clone)]
pub struct PropertyClassifier {
    rules: RuleSet<PropertyType>,
}

impl PropertyClassifier {
    /// Compiles a property table.
    ///
    /// # Errors
    ///
    /// Fails if a rule does not compile.
    pub fn new(rules: &[ClassificationRule<PropertyType>]) -> Result<Self> {
        Ok(Self {
            rules: RuleSet::compile(rules)?,
        })
    }

    /// Returns the type of the highest-priority rule matching `text`.
    pub fn classify(&self, text: &str) -> Option<PropertyType> {
        self.rules.first_match(text).map(|rule| rule.category)
    }

    /// Returns the matching rule itself.
    pub fn explain(&self, text: &str) -> Option<&ClassificationRule<PropertyType>> {
        self.rules.first_match(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(text: &str) -> Option<PropertyType> {
        PropertyClassifier::new(&default_rules()).unwrap().classify(text)
    }

    #[test]
    fn test_villa_beats_apartment() {
        assert_eq!(classify("للبيع شقة و فيلا"), Some(PropertyType::Villa));
        assert_eq!(classify("Apartment or villa"), Some(PropertyType::Villa));
    }

    #[test]
    fn test_apartment_beats_commercial_and_land() {
        assert_eq!(classify("شقة فوق محل على ارض"), Some(PropertyType::Apartment));
    }

    #[test]
    fn test_commercial_beats_land() {
        assert_eq!(classify("محل تجاري على ارض"), Some(PropertyType::Commercial));
    }

    #[test]
    fn test_land_keyword() {
        assert_eq!(classify("قطعة ارض 500م"), Some(PropertyType::Land));
        assert_eq!(classify("Plot for sale"), Some(PropertyType::Land));
    }

    #[test]
    fn test_keyword_beats_context() {
        assert_eq!(classify("ارض بها 3 غرف"), Some(PropertyType::Land));
    }

    #[test]
    fn test_room_context_means_apartment() {
        assert_eq!(classify("3 غرف و 2 حمام و ريسبشن"), Some(PropertyType::Apartment));
        assert_eq!(classify("2 bedrooms, kitchen"), Some(PropertyType::Apartment));
    }

    #[test]
    fn test_area_context_means_land() {
        let text = "للبيع في حي 19 مجاورة 1 مساحة 276 بحرى خالصه ورخصة سارية 01092400709";
        assert_eq!(classify(text), Some(PropertyType::Land));
        assert_eq!(classify("200 متر"), Some(PropertyType::Land));
    }

    #[test]
    fn test_keywords_inside_other_words_ignored() {
        assert_eq!(classify("مساحة 300 متر قابل للتفاوض"), Some(PropertyType::Land));
        assert_eq!(classify("مساحة 400 متر المالك معروف"), Some(PropertyType::Land));
    }

    #[test]
    fn test_administrative_capital_is_not_commercial() {
        assert_eq!(classify("مساحة 500 متر بالعاصمة الإدارية"), Some(PropertyType::Land));
        assert_eq!(classify("مطلوب وحدة في العاصمة الادارية"), None);
        assert_eq!(classify("مقر اداري بالعاصمة الادارية"), Some(PropertyType::Commercial));
    }

    #[test]
    fn test_clitic_forms_still_match() {
        assert_eq!(classify("الشقة بالدور التاني"), Some(PropertyType::Apartment));
        assert_eq!(classify("وحدة بالروف"), Some(PropertyType::Apartment));
        assert_eq!(classify("اوضتين و حمام"), Some(PropertyType::Apartment));
    }

    #[test]
    fn test_metro_is_not_metres() {
        assert_eq!(classify("بجوار المترو"), None);
    }

    #[test]
    fn test_english_whole_words() {
        assert_eq!(classify("flatter landscape"), None);
    }

    #[test]
    fn test_priorities_assigned() {
        let rules = default_rules();
        let villa = rules.iter().find(|r| r.text() == "فيلا").unwrap();
        assert_eq!(villa.priority, VILLA_PRIORITY);
        let metres = rules.iter().find(|r| r.text() == r"متر\b").unwrap();
        assert_eq!(metres.priority, LAND_CONTEXT_PRIORITY);
        let rooms = rules.iter().find(|r| r.text() == "rooms").unwrap();
        assert_eq!(rooms.category, PropertyType::Apartment);
        assert_eq!(rooms.priority, APARTMENT_CONTEXT_PRIORITY);
    }

    #[test]
    fn test_appended_rule_joins_its_tier() {
        let mut rules = default_rules();
        rules.push(
            ClassificationRule::keyword("شاليه", PropertyType::Villa, Language::Arabic)
                .with_priority(VILLA_PRIORITY),
        );
        let classifier = PropertyClassifier::new(&rules).unwrap();
        assert_eq!(classifier.classify("شاليه و شقة"), Some(PropertyType::Villa));
        assert_eq!(classifier.explain("شاليه").unwrap().text(), "شاليه");
    }

    #[test]
    fn test_from_str_and_display() {
        for property in PropertyType::ALL {
            assert_eq!(property.to_string().parse::<PropertyType>().unwrap(), property);
        }
        assert!("castle".parse::<PropertyType>().is_err());
    }
}
