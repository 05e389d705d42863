//! Casualty line classification
//!
//! Each line of a day's casualties breakdown names one category and carries
//! a `+<number>` token. Lines are lower-cased before matching.

use crate::record::LossCategory;
use regex::Regex;
use std::sync::LazyLock;

static COUNT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\+\s*(\d+)").expect("COUNT_RE: hardcoded regex is valid"));

/// A category matched when every keyword occurs in the line
#[derive(Debug, Clone, Copy)]
pub struct CategoryRule {
    pub keywords: &'static [&'static str],
    pub category: LossCategory,
}

impl CategoryRule {
    /// Returns true if `text` (already lower-cased) contains every keyword
    pub fn matches(&self, text: &str) -> bool {
        self.keywords.iter().all(|keyword| text.contains(keyword))
    }
}

/// Rules in priority order; the first match wins
pub const CATEGORY_RULES: &[CategoryRule] = &[
    CategoryRule {
        keywords: &["літаки"],
        category: LossCategory::Planes,
    },
    CategoryRule {
        keywords: &["гелікоптери"],
        category: LossCategory::Helicopters,
    },
    CategoryRule {
        keywords: &["бпла"],
        category: LossCategory::Uav,
    },
    CategoryRule {
        keywords: &["крилаті", "ракети"],
        category: LossCategory::CruiseMissiles,
    },
    CategoryRule {
        keywords: &["балістичні"],
        category: LossCategory::BallisticMissiles,
    },
];

/// Classifies a lower-cased casualty line
///
/// Returns `None` for lines that name none of the tracked categories.
pub fn classify_line(text: &str) -> Option<LossCategory> {
    CATEGORY_RULES
        .iter()
        .find(|rule| rule.matches(text))
        .map(|rule| rule.category)
}

/// Extracts the `+<number>` count from a casualty line
///
/// A line without the token, or with a number too large for `u32`, counts as 0.
pub fn extract_count(text: &str) -> u32 {
    COUNT_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

/// Classifies a raw casualty line and extracts its count
pub fn classify_casualty(line: &str) -> Option<(LossCategory, u32)> {
    let text = line.to_lowercase();
    classify_line(&text).map(|category| (category, extract_count(&text)))
}
