//! In-memory documentation index and relevance-ranked search.
//!
//! This module provides keyword tokenization, per-record relevance scoring,
//! the topic reference graph, and the [`DocIndex`] store that ties them together.

// Module declarations
pub(crate) mod index;
pub(crate) mod query;
pub(crate) mod references;
pub(crate) mod scoring;
pub(crate) mod tokenize;

// Public re-exports (used via lib.rs)
pub use index::{BriefInfo, DocIndex, IndexStats};
pub use query::SearchQuery;
pub use references::ReferenceGraph;
pub use scoring::{
    BRIEF_MATCH, CATEGORY_MATCH, CONTAINS_MATCH, EXACT_NAME_MATCH, PREFIX_MATCH, REMARKS_MATCH,
    SUFFIX_MATCH,
};
