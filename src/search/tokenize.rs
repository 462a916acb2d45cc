//! Query keyword extraction.

/// Splits a query into lowercased, whitespace-delimited keywords.
///
/// Blank input yields no keywords. Keywords are not deduplicated: a query that
/// repeats a word scores that word twice.
pub(crate) fn keywords(query: &str) -> Vec<String> {
    query.split_whitespace().map(str::to_lowercase).collect()
}

/// Returns true when the query carries no keywords at all.
pub(crate) fn is_blank(query: Option<&str>) -> bool {
    query.is_none_or(|q| q.trim().is_empty())
}

/// Case-insensitive substring check against an already-lowercased needle.
pub(crate) fn contains_lower(haystack: Option<&str>, needle_lower: &str) -> bool {
    haystack.is_some_and(|h| h.to_lowercase().contains(needle_lower))
}
