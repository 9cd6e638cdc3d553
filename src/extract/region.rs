//! Region extraction.
//!
//! Three kinds of evidence are looked for:
//!
//! - **City**: a gazetteer of known cities and areas, Arabic and English
//! - **District**: numbered neighbourhoods such as `حي 19`, `مجاورة 1`,
//!   `district 5`
//! - **Direction**: a direction word and a location noun, such as
//!   `شمال المدينة` or `بجوار المترو`
//!
//! Matches shorter than the configured minimum are noise and dropped.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::rules::{ClassificationRule, Language, RuleSet, select_matches};
use crate::error::Result;

/// Default minimum length of a reported region, in characters.
pub const DEFAULT_MIN_REGION_CHARS: usize = 3;

/// Kind of location evidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionKind {
    City,
    District,
    Direction,
}

impl fmt::Display for RegionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RegionKind::City => "city",
            RegionKind::District => "district",
            RegionKind::Direction => "direction",
        })
    }
}

const ARABIC_CITIES: &[&str] = &[
    "القاهرة الجديدة",
    "القاهرة",
    "الجيزة",
    "الإسكندرية",
    "الاسكندرية",
    "العاشر من رمضان",
    "السادس من أكتوبر",
    "6 أكتوبر",
    "حدائق أكتوبر",
    "أكتوبر",
    "اكتوبر",
    "الشيخ زايد",
    "زايد",
    "التجمع الخامس",
    "التجمع الأول",
    "التجمع",
    "مدينة نصر",
    "مصر الجديدة",
    "المعادي",
    "العبور",
    "الشروق",
    "مدينة بدر",
    "العاصمة الإدارية",
    "العاصمة الادارية",
    "العلمين الجديدة",
    "العلمين",
    "الساحل الشمالي",
    "المقطم",
    "الرحاب",
    "مدينتي",
    "حلوان",
    "المنصورة",
    "طنطا",
    "الزقازيق",
    "بنها",
    "دمياط",
    "بورسعيد",
    "الإسماعيلية",
    "السويس",
    "الفيوم",
    "بني سويف",
    "المنيا",
    "أسيوط",
    "سوهاج",
    "الأقصر",
    "أسوان",
    "الغردقة",
    "شرم الشيخ",
];

const ENGLISH_CITIES: &[&str] = &[
    "New Cairo",
    "Cairo",
    "Giza",
    "Alexandria",
    "10th of Ramadan",
    "6th of October",
    "October",
    "Sheikh Zayed",
    "Zayed",
    "Fifth Settlement",
    "5th Settlement",
    "Nasr City",
    "Heliopolis",
    "Maadi",
    "Obour",
    "Shorouk",
    "New Capital",
    "New Administrative Capital",
    "North Coast",
    "Sahel",
    "Alamein",
    "Mokattam",
    "Rehab",
    "Madinaty",
    "Helwan",
    "Hurghada",
    "Sharm El Sheikh",
];

const DISTRICT_PATTERNS: &[(&str, Language)] = &[
    (r"(?:حي|حى)\s*[0-9٠-٩]+", Language::Arabic),
    (r"(?:مجاورة|مجاوره)\s*[0-9٠-٩]+", Language::Arabic),
    (r"(?:المرحلة|المرحله)\s*[0-9٠-٩]+", Language::Arabic),
    (r"(?:المنطقة|المنطقه)\s*[0-9٠-٩]+", Language::Arabic),
    (r"\bdistrict\s*\d+", Language::English),
    (r"\bneighbou?rhood\s*\d+", Language::English),
    (r"\bphase\s*\d+", Language::English),
];

const DIRECTION_PATTERNS: &[(&str, Language)] = &[
    (
        r"(?:شمال|جنوب|شرق|غرب|وسط)\s+(?:ال)?(?:مدينة|مدينه|حي|حى|منطقة|منطقه|جامعة|تجمع|عاصمة|محور|بلد)",
        Language::Arabic,
    ),
    (
        r"(?:بجوار|جنب|امام|أمام|خلف|قرب|بالقرب من)\s+(?:ال)?(?:مترو|محطة|محطه|جامعة|جامعه|مول|نادي|نادى|مسجد|جامع|مدرسة|مدرسه|محور|دائري|طريق)",
        Language::Arabic,
    ),
    (
        r"\b(?:north|south|east|west)\s+(?:of\s+)?(?:the\s+)?(?:city|district|cairo|giza|zayed|october|coast)\b",
        Language::English,
    ),
    (
        r"\b(?:near|next to|in front of|behind)\s+(?:the\s+)?(?:metro|station|university|mall|club|mosque|school)\b",
        Language::English,
    ),
];

/// Built-in region table: gazetteer, districts, directions.
pub fn default_rules() -> Vec<ClassificationRule<RegionKind>> {
    let cities = ARABIC_CITIES
        .iter()
        .map(|c| ClassificationRule::keyword(*c, RegionKind::City, Language::Arabic))
        .chain(
            ENGLISH_CITIES
                .iter()
                .map(|c| ClassificationRule::keyword(*c, RegionKind::City, Language::English)),
        );
    let districts = DISTRICT_PATTERNS
        .iter()
        .map(|&(p, lang)| ClassificationRule::pattern(p, RegionKind::District, lang));
    let directions = DIRECTION_PATTERNS
        .iter()
        .map(|&(p, lang)| ClassificationRule::pattern(p, RegionKind::Direction, lang));

    cities.chain(districts).chain(directions).collect()
}

/// Region extractor.
///
/// # Example
///
/// ```rust
/// use propchat::extract::region::{RegionExtractor, default_rules};
///
/// let extractor = RegionExtractor::new(&default_rules(), 3).unwrap();
/// let regions = extractor.extract("للبيع في حي 19 مجاورة 1 بالشيخ زايد");
///
/// assert_eq!(regions, ["حي 19", "مجاورة 1", "الشيخ زايد"]);
/// ```
#[derive(Debug, Clone)]
pub struct RegionExtractor {
    rules: RuleSet<RegionKind>,
    min_chars: usize,
}

impl RegionExtractor {
    /// Compiles a region table.
    ///
    /// # Errors
    ///
    /// Fails if a rule does not compile.
    pub fn new(rules: &[ClassificationRule<RegionKind>], min_chars: usize) -> Result<Self> {
        Ok(Self {
            rules: RuleSet::compile(rules)?,
            min_chars,
        })
    }

    /// Returns distinct region phrases in order of first occurrence.
    pub fn extract(&self, text: &str) -> Vec<String> {
        select_matches(self.rules.find_all(text), self.min_chars)
            .into_iter()
            .map(|m| m.label)
            .collect()
    }

    /// Returns distinct region phrases with their kind.
    pub fn extract_with_kind(&self, text: &str) -> Vec<(String, RegionKind)> {
        select_matches(self.rules.find_all(text), self.min_chars)
            .into_iter()
            .map(|m| (m.label, m.category))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str) -> Vec<String> {
        RegionExtractor::new(&default_rules(), DEFAULT_MIN_REGION_CHARS)
            .unwrap()
            .extract(text)
    }

    #[test]
    fn test_numbered_districts() {
        let text = "للبيع في حي 19 مجاورة 1 مساحة 276 بحرى خالصه";
        assert_eq!(extract(text), ["حي 19", "مجاورة 1"]);
    }

    #[test]
    fn test_district_without_space_and_alt_spelling() {
        assert_eq!(extract("شقة حى7 المرحله 2"), ["حى7", "المرحله 2"]);
    }

    #[test]
    fn test_district_native_digits() {
        assert_eq!(extract("حي ١٩"), ["حي ١٩"]);
    }

    #[test]
    fn test_english_district() {
        assert_eq!(extract("Flat in District 5, Neighborhood 3"), ["District 5", "Neighborhood 3"]);
    }

    #[test]
    fn test_gazetteer_longest_wins() {
        assert_eq!(extract("شقة في 6 أكتوبر"), ["6 أكتوبر"]);
        assert_eq!(extract("فيلا بالتجمع الخامس"), ["التجمع الخامس"]);
        assert_eq!(extract("villa in New Cairo"), ["New Cairo"]);
    }

    #[test]
    fn test_english_city_case_insensitive_reports_table_name() {
        assert_eq!(extract("flat in sheikh zayed"), ["Sheikh Zayed"]);
    }

    #[test]
    fn test_direction_phrases() {
        assert_eq!(
            extract("شمال المدينة حى7 ع المترو"),
            ["شمال المدينة", "حى7"]
        );
        assert_eq!(extract("شقة بجوار المترو"), ["بجوار المترو"]);
        assert_eq!(extract("house west of the city"), ["west of the city"]);
    }

    #[test]
    fn test_short_matches_dropped() {
        let rules = vec![ClassificationRule::pattern(r"ح\d", RegionKind::District, Language::Arabic)];
        let extractor = RegionExtractor::new(&rules, 3).unwrap();
        assert!(extractor.extract("ح1").is_empty());
    }

    #[test]
    fn test_duplicates_once() {
        assert_eq!(extract("القاهرة ... القاهرة"), ["القاهرة"]);
    }

    #[test]
    fn test_with_kind() {
        let extractor = RegionExtractor::new(&default_rules(), 3).unwrap();
        let found = extractor.extract_with_kind("الشيخ زايد حي 5");
        assert_eq!(found[0].1, RegionKind::City);
        assert_eq!(found[1].1, RegionKind::District);
    }

    #[test]
    fn test_no_region() {
        assert!(extract("صباح الخير").is_empty());
    }
}
