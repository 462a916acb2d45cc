//! Category browsing: all categories with counts, or the items of one category.

use super::non_blank;
use crate::error::ToolError;
use crate::format::{write_summary, write_topic_line};
use crate::model::{DocRecord, RecordKind};
use crate::search::DocIndex;
use crate::worker::DocState;
use rmcp::schemars;
use serde::Deserialize;
use std::fmt::Write as _;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListCategoryRequest {
    /// Category name (e.g., 'app', 'sprite', 'graphics'). Leave empty to list all categories.
    #[serde(default)]
    pub category: Option<String>,
    /// Optional: filter by item type
    #[serde(rename = "type", default)]
    pub kind: Option<RecordKind>,
}

pub async fn handle_list_category(
    state: &DocState,
    request: ListCategoryRequest,
) -> Result<String, ToolError> {
    let index = state.index().await?;
    match non_blank(request.category.as_deref()) {
        None => render_categories(&index),
        Some(category) => render_category(&index, category, request.kind),
    }
}

/// Every category with its item count and a per-kind breakdown.
pub fn render_categories(index: &DocIndex) -> Result<String, ToolError> {
    let categories = index.categories();
    if categories.is_empty() {
        return Ok("No categories found".to_string());
    }

    let mut output = String::from("Available categories:\n\n");
    for category in categories {
        let items = index.items_in_category(category);
        let breakdown: Vec<String> = RecordKind::ALL
            .into_iter()
            .filter_map(|kind| {
                let count = items.iter().filter(|r| r.kind() == kind).count();
                (count > 0).then(|| format!("{} {}", count, kind.plural()))
            })
            .collect();

        writeln!(
            output,
            "- **{}** ({} items: {})",
            category,
            items.len(),
            breakdown.join(", ")
        )?;
    }

    write!(
        output,
        "\n**Tip:** Use `cf_list_category` with a category name to see its items."
    )?;
    Ok(output)
}

/// Items of one category, optionally restricted to a kind, plus the topics covering it.
pub fn render_category(
    index: &DocIndex,
    category: &str,
    kind: Option<RecordKind>,
) -> Result<String, ToolError> {
    let (topics, items): (Vec<&DocRecord>, Vec<&DocRecord>) = index
        .items_in_category(category)
        .into_iter()
        .partition(|record| record.kind() == RecordKind::Topic);

    let listed: Vec<&DocRecord> = match kind {
        Some(RecordKind::Topic) => topics.clone(),
        Some(kind) => items.into_iter().filter(|r| r.kind() == kind).collect(),
        None => items,
    };

    // A category holding only topics still lists them under Related Topics
    if listed.is_empty() && (kind.is_some() || topics.is_empty()) {
        return Ok(match kind {
            Some(kind) => format!("No items found in category '{}' of type {}", category, kind),
            None => format!("No items found in category '{}'", category),
        });
    }

    let mut output = format!("Items in '{}':\n\n", category);
    for record in &listed {
        write_summary(&mut output, record)?;
    }

    if !topics.is_empty() && kind != Some(RecordKind::Topic) {
        writeln!(output, "\n## Related Topics")?;
        for topic in &topics {
            write_topic_line(&mut output, topic)?;
        }
    }

    write!(
        output,
        "\n**Tip:** Use `cf_get_details` with an exact name for full documentation."
    )?;
    Ok(output)
}
