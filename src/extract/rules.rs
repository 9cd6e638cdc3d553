//! Classification rules as data.
//!
//! Every classifier in [`crate::extract`] is a table of
//! [`ClassificationRule`]s compiled once into a [`RuleSet`]. A rule is either
//! a literal keyword or a regular expression, tagged with the category it
//! votes for, its language and a priority.
//!
//! Matching follows the language:
//!
//! | Rule | Language | Compiled as |
//! |------|----------|-------------|
//! | keyword | Arabic | literal, whole word up to clitics |
//! | keyword | English | case-insensitive, whole words |
//! | pattern | Arabic | as written |
//! | pattern | English | as written, case-insensitive |
//!
//! An Arabic keyword may carry the attached prefixes و ف ب ل ك and the
//! article (`بالشيخ زايد`, `للبيع`) and a short inflection suffix such as
//! ة or ات, but never sits inside another word: `بيع` does not match
//! `الربيع` and `اوض` does not match `للتفاوض`.
//!
//! # Example
//!
//! ```rust
//! use propchat::extract::rules::{ClassificationRule, Language, RuleSet, select_matches};
//!
//! let rules = vec![
//!     ClassificationRule::keyword("for sale", 'S', Language::English),
//!     ClassificationRule::keyword("sale", 'S', Language::English),
//! ];
//! let set = RuleSet::compile(&rules).unwrap();
//!
//! let hits = select_matches(set.find_all("Villa FOR SALE, 3M"), 0);
//! let labels: Vec<_> = hits.iter().map(|m| m.label.as_str()).collect();
//! assert_eq!(labels, ["for sale"]);
//! ```

use std::cmp::Reverse;
use std::collections::HashSet;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{PropchatError, Result};

/// Script a rule is written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Arabic,
    English,
}

/// What a rule looks for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RulePattern {
    /// A literal term.
    Keyword(String),
    /// A regular expression.
    Pattern(String),
}

/// A (keyword-or-pattern, category, language, priority) tuple.
///
/// In JSON the pattern is flattened into the rule:
///
/// ```json
/// { "keyword": "للبيع", "category": "sale", "language": "arabic" }
/// { "pattern": "حي\\s*\\d+", "category": "district", "language": "arabic", "priority": 0 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationRule<C> {
    /// Keyword or pattern to look for
    #[serde(flatten)]
    pub pattern: RulePattern,

    /// Category this rule votes for
    pub category: C,

    /// Language of the keyword or pattern
    pub language: Language,

    /// Lower values are tried first (default: 0)
    #[serde(default)]
    pub priority: u32,
}

impl<C> ClassificationRule<C> {
    /// Creates a keyword rule with priority 0.
    pub fn keyword(keyword: impl Into<String>, category: C, language: Language) -> Self {
        Self {
            pattern: RulePattern::Keyword(keyword.into()),
            category,
            language,
            priority: 0,
        }
    }

    /// Creates a regex rule with priority 0.
    pub fn pattern(pattern: impl Into<String>, category: C, language: Language) -> Self {
        Self {
            pattern: RulePattern::Pattern(pattern.into()),
            category,
            language,
            priority: 0,
        }
    }

    /// Sets the priority.
    #[must_use]
    pub fn with_priority(mut self, priority: u32) -> Self {
        self.priority = priority;
        self
    }

    /// Returns the keyword or pattern text as configured.
    pub fn text(&self) -> &str {
        match &self.pattern {
            RulePattern::Keyword(text) | RulePattern::Pattern(text) => text,
        }
    }

    /// Returns `true` for keyword rules.
    pub fn is_keyword(&self) -> bool {
        matches!(self.pattern, RulePattern::Keyword(_))
    }

    /// Regex source this rule compiles to.
    pub fn regex_source(&self) -> String {
        match (&self.pattern, self.language) {
            (RulePattern::Keyword(k), Language::Arabic) => regex::escape(k),
            (RulePattern::Keyword(k), Language::English) => {
                format!(r"(?i)\b{}\b", regex::escape(k))
            }
            (RulePattern::Pattern(p), Language::Arabic) => p.clone(),
            (RulePattern::Pattern(p), Language::English) => format!("(?i){p}"),
        }
    }

    /// Compiles the rule.
    ///
    /// # Errors
    ///
    /// Returns [`PropchatError::InvalidRule`] if the pattern is not a valid
    /// regular expression.
    pub fn compile(&self) -> Result<Regex> {
        Regex::new(&self.regex_source()).map_err(|e| PropchatError::invalid_rule(self.text(), e))
    }
}

/// One occurrence of a rule in a text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMatch<C> {
    /// Byte offset of the match start
    pub start: usize,
    /// Byte offset one past the match end
    pub end: usize,
    /// Table keyword for keyword rules, matched text for patterns
    pub label: String,
    /// Category of the matching rule
    pub category: C,
    /// Position of the rule in the compiled set
    pub rule_index: usize,
}

#[derive(Debug, Clone)]
struct CompiledRule<C> {
    rule: ClassificationRule<C>,
    regex: Regex,
    word_bounded: bool,
}

impl<C> CompiledRule<C> {
    fn accepts(&self, text: &str, start: usize, end: usize) -> bool {
        !self.word_bounded || is_arabic_word(text, start, end)
    }

    fn matches(&self, text: &str) -> bool {
        self.regex
            .find_iter(text)
            .any(|m| self.accepts(text, m.start(), m.end()))
    }
}

const ARABIC_SUFFIXES: &[&str] = &["ة", "ه", "ات", "ي", "ية", "يه", "ين", "تين", "ها", "هم"];

/// Letters of an Arabic word, including diacritics and tatweel.
pub fn is_arabic_letter(c: char) -> bool {
    matches!(c, '\u{0621}'..='\u{065F}' | '\u{0670}'..='\u{06D3}')
}

fn is_proclitic(prefix: &str) -> bool {
    let rest = prefix.strip_prefix(|c: char| matches!(c, 'و' | 'ف')).unwrap_or(prefix);
    matches!(rest, "" | "ب" | "ل" | "ك" | "ال" | "بال" | "كال" | "لل")
}

/// Returns `true` if `text[start..end]` is a whole Arabic word, allowing
/// attached prefixes and inflection suffixes around it.
pub fn is_arabic_word(text: &str, start: usize, end: usize) -> bool {
    let before = &text[..start];
    let word_start = before
        .char_indices()
        .rev()
        .take_while(|&(_, c)| is_arabic_letter(c))
        .last()
        .map_or(start, |(i, _)| i);

    let after = &text[end..];
    let word_end = after
        .char_indices()
        .find(|&(_, c)| !is_arabic_letter(c))
        .map_or(after.len(), |(i, _)| i);

    is_proclitic(&before[word_start..])
        && (word_end == 0 || ARABIC_SUFFIXES.contains(&&after[..word_end]))
}

/// A table of rules compiled for matching.
///
/// Rules are kept in ascending priority. Sorting is stable, so rules of equal
/// priority keep their table order.
#[derive(Debug, Clone)]
pub struct RuleSet<C> {
    rules: Vec<CompiledRule<C>>,
}

impl<C: Clone> RuleSet<C> {
    /// Compiles a rule table.
    ///
    /// # Errors
    ///
    /// Returns the first [`PropchatError::InvalidRule`] encountered.
    pub fn compile(rules: &[ClassificationRule<C>]) -> Result<Self> {
        let mut compiled = rules
            .iter()
            .map(|rule| {
                Ok(CompiledRule {
                    regex: rule.compile()?,
                    word_bounded: rule.is_keyword() && rule.language == Language::Arabic,
                    rule: rule.clone(),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        compiled.sort_by_key(|c| c.rule.priority);
        Ok(Self { rules: compiled })
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if the set has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules in evaluation order.
    pub fn rules(&self) -> impl Iterator<Item = &ClassificationRule<C>> {
        self.rules.iter().map(|c| &c.rule)
    }

    /// Returns the first rule, in evaluation order, that matches anywhere in
    /// `text`.
    pub fn first_match(&self, text: &str) -> Option<&ClassificationRule<C>> {
        self.rules
            .iter()
            .find(|c| c.matches(text))
            .map(|c| &c.rule)
    }

    /// Returns every occurrence of every rule, unordered and unfiltered.
    pub fn find_all(&self, text: &str) -> Vec<RuleMatch<C>> {
        let mut matches = Vec::new();
        for (rule_index, compiled) in self.rules.iter().enumerate() {
            for m in compiled.regex.find_iter(text) {
                if m.as_str().trim().is_empty() || !compiled.accepts(text, m.start(), m.end()) {
                    continue;
                }
                let label = if compiled.rule.is_keyword() {
                    compiled.rule.text().to_string()
                } else {
                    m.as_str().trim().to_string()
                };
                matches.push(RuleMatch {
                    start: m.start(),
                    end: m.end(),
                    label,
                    category: compiled.rule.category.clone(),
                    rule_index,
                });
            }
        }
        matches
    }
}

/// Reduces raw matches to the reported list.
///
/// 1. Matches whose label is shorter than `min_chars` characters are dropped.
/// 2. A match lying entirely inside an earlier-starting or longer kept match
///    is dropped, so `for sale` hides `sale`.
/// 3. Labels are de-duplicated case-insensitively.
///
/// The result is in order of first occurrence in the text.
pub fn select_matches<C>(mut matches: Vec<RuleMatch<C>>, min_chars: usize) -> Vec<RuleMatch<C>> {
    matches.retain(|m| m.label.chars().count() >= min_chars);
    matches.sort_by_key(|m| (m.start, Reverse(m.end), m.rule_index));

    let mut covered_to = 0;
    let mut seen = HashSet::new();
    let mut selected = Vec::new();

    for m in matches {
        if m.end <= covered_to {
            continue;
        }
        covered_to = m.end;
        if seen.insert(m.label.to_lowercase()) {
            selected.push(m);
        }
    }

    selected
}
