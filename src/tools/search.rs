//! Keyword search across every documented item.

use super::{DEFAULT_LIMIT, default_limit, non_blank};
use crate::error::ToolError;
use crate::format::write_summary;
use crate::model::RecordKind;
use crate::search::{DocIndex, SearchQuery};
use crate::worker::DocState;
use rmcp::schemars;
use serde::Deserialize;
use std::fmt::Write as _;

const DETAILS_TIP: &str = "**Tip:** Use `cf_get_details` with an exact name to get full documentation including parameters, examples, and related items.";

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SearchRequest {
    /// Search query (matches name, description, remarks and category)
    pub query: String,
    /// Optional: filter by item type
    #[serde(rename = "type", default)]
    pub kind: Option<RecordKind>,
    /// Optional: filter by exact category (e.g., 'app', 'sprite', 'graphics')
    #[serde(default)]
    pub category: Option<String>,
    /// Maximum number of results to return (default: 20)
    #[serde(default = "default_limit")]
    pub limit: Option<usize>,
}

/// Execute a search against the current index.
pub async fn handle_search(state: &DocState, request: SearchRequest) -> Result<String, ToolError> {
    let index = state.index().await?;
    render_search(&index, &request)
}

pub fn render_search(index: &DocIndex, request: &SearchRequest) -> Result<String, ToolError> {
    let limit = request.limit.unwrap_or(DEFAULT_LIMIT);
    let mut query = SearchQuery::new(&request.query).limit(limit);
    if let Some(kind) = request.kind {
        query = query.kind(kind);
    }
    if let Some(category) = non_blank(request.category.as_deref()) {
        query = query.category(category);
    }

    let results = index.search(query);
    tracing::debug!("Search '{}' returned {} results", request.query, results.len());

    if results.is_empty() {
        return Ok(format!("No results found for '{}'", request.query));
    }

    let limit_reached = results.len() >= limit;
    let mut output = String::new();
    if limit_reached {
        writeln!(
            output,
            "Found {} result(s) (limit reached, more may exist):\n",
            results.len()
        )?;
    } else {
        writeln!(output, "Found {} result(s):\n", results.len())?;
    }

    for record in &results {
        write_summary(&mut output, record)?;
    }

    write!(output, "\n{}", DETAILS_TIP)?;
    if limit_reached {
        write!(
            output,
            "\nTo find more results, narrow your search with `type` or `category` filters."
        )?;
    }

    Ok(output)
}
