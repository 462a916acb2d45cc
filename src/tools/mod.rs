pub mod find_related;
pub mod get_details;
pub mod get_topic;
pub mod list_category;
pub mod list_topics;
pub mod member_search;
pub mod parameter_search;
pub mod search;

pub use find_related::*;
pub use get_details::*;
pub use get_topic::*;
pub use list_category::*;
pub use list_topics::*;
pub use member_search::*;
pub use parameter_search::*;
pub use search::*;

/// Default number of results for tools that take a `limit`.
pub(crate) const DEFAULT_LIMIT: usize = crate::search::query::DEFAULT_LIMIT;

pub(crate) fn default_limit() -> Option<usize> {
    Some(DEFAULT_LIMIT)
}

/// Optional string argument with blank values treated as absent.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
