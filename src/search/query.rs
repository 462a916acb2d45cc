//! Search request parameters accepted by [`DocIndex::search`](super::DocIndex::search).

use super::tokenize::is_blank;
use crate::model::RecordKind;

/// Default number of results when the caller does not pick a limit.
pub(crate) const DEFAULT_LIMIT: usize = 20;

/// A search over the index: optional keywords, optional filters, and a result cap.
///
/// Without keywords the search runs in browse mode and returns records in
/// insertion order. With keywords, non-matching records are dropped and the
/// rest are ranked by relevance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchQuery<'a> {
    pub text: Option<&'a str>,
    pub kind: Option<RecordKind>,
    /// Exact, case-sensitive category to keep
    pub category: Option<&'a str>,
    pub limit: usize,
}

impl Default for SearchQuery<'_> {
    fn default() -> Self {
        Self {
            text: None,
            kind: None,
            category: None,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl<'a> SearchQuery<'a> {
    /// Keyword search with no filters and the default limit.
    pub fn new(text: &'a str) -> Self {
        Self {
            text: Some(text),
            ..Self::default()
        }
    }

    /// Browse mode: no keywords, records come back in insertion order.
    pub fn browse() -> Self {
        Self::default()
    }

    pub const fn kind(mut self, kind: RecordKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub const fn category(mut self, category: &'a str) -> Self {
        self.category = Some(category);
        self
    }

    pub const fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Keyword text if it contains at least one keyword.
    pub(crate) fn keywords_text(&self) -> Option<&'a str> {
        if is_blank(self.text) { None } else { self.text }
    }
}
