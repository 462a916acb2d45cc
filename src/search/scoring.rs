//! Keyword matching and relevance scoring for documentation records.
//!
//! Scores are additive across keywords, so a record hit by every word of a
//! multi-word query outranks one hit by a single, stronger match.

use super::tokenize::{contains_lower, keywords};
use crate::model::DocRecord;

/// Keyword equals the record name.
pub const EXACT_NAME_MATCH: u32 = 1000;
/// Record name starts with the keyword.
pub const PREFIX_MATCH: u32 = 500;
/// Record name ends with the keyword.
pub const SUFFIX_MATCH: u32 = 400;
/// Record name contains the keyword elsewhere.
pub const CONTAINS_MATCH: u32 = 100;
/// Brief contains the keyword.
pub const BRIEF_MATCH: u32 = 50;
/// Category contains the keyword.
pub const CATEGORY_MATCH: u32 = 30;
/// Remarks contain the keyword.
pub const REMARKS_MATCH: u32 = 10;

/// Calculate the name tier for a single lowercased keyword.
///
/// Tiers are mutually exclusive; only the strongest applicable one counts:
/// - 1000: Exact match
/// - 500: Name starts with keyword
/// - 400: Name ends with keyword
/// - 100: Name contains keyword
/// - 0: No match
pub(crate) fn name_score(name_lower: &str, keyword: &str) -> u32 {
    if name_lower == keyword {
        EXACT_NAME_MATCH
    } else if name_lower.starts_with(keyword) {
        PREFIX_MATCH
    } else if name_lower.ends_with(keyword) {
        SUFFIX_MATCH
    } else if name_lower.contains(keyword) {
        CONTAINS_MATCH
    } else {
        0
    }
}

impl DocRecord {
    /// Returns true if any keyword of `query` appears in the name, brief,
    /// remarks, or category (case-insensitive substring).
    ///
    /// A blank query matches everything.
    pub fn matches(&self, query: &str) -> bool {
        let keywords = keywords(query);
        if keywords.is_empty() {
            return true;
        }

        keywords.iter().any(|keyword| {
            [
                Some(self.name.as_str()),
                self.brief.as_deref(),
                self.remarks.as_deref(),
                self.category.as_deref(),
            ]
            .into_iter()
            .any(|field| contains_lower(field, keyword))
        })
    }

    /// Sum of per-keyword scores. A blank query scores 0.
    pub fn relevance_score(&self, query: &str) -> u32 {
        let name_lower = self.name.to_lowercase();
        keywords(query)
            .iter()
            .map(|keyword| self.keyword_score(&name_lower, keyword))
            .sum()
    }

    fn keyword_score(&self, name_lower: &str, keyword: &str) -> u32 {
        let mut score = name_score(name_lower, keyword);

        if contains_lower(self.brief.as_deref(), keyword) {
            score += BRIEF_MATCH;
        }
        if contains_lower(self.category.as_deref(), keyword) {
            score += CATEGORY_MATCH;
        }
        if contains_lower(self.remarks.as_deref(), keyword) {
            score += REMARKS_MATCH;
        }

        score
    }
}
