//! Listing of the topic guides.

use super::non_blank;
use crate::error::ToolError;
use crate::model::DocRecord;
use crate::search::DocIndex;
use crate::worker::DocState;
use rmcp::schemars;
use serde::Deserialize;
use std::fmt::Write as _;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListTopicsRequest {
    /// Optional: filter topics by category (e.g., 'graphics', 'audio', 'getting-started')
    #[serde(default)]
    pub category: Option<String>,
    /// If true, return topics in recommended reading order (default: false)
    #[serde(default)]
    pub ordered: Option<bool>,
}

pub async fn handle_list_topics(
    state: &DocState,
    request: ListTopicsRequest,
) -> Result<String, ToolError> {
    let index = state.index().await?;
    render_topics(
        &index,
        non_blank(request.category.as_deref()),
        request.ordered.unwrap_or(false),
    )
}

pub fn render_topics(
    index: &DocIndex,
    category: Option<&str>,
    ordered: bool,
) -> Result<String, ToolError> {
    let topics: Vec<&DocRecord> = if ordered {
        index.topics_ordered()
    } else {
        index.topics().collect()
    };
    let topics: Vec<&DocRecord> = topics
        .into_iter()
        .filter(|t| category.is_none_or(|c| t.category() == Some(c)))
        .collect();

    if topics.is_empty() {
        let scope = category
            .map(|c| format!(" in category '{}'", c))
            .unwrap_or_default();
        return Ok(format!(
            "No topics found{}\n\nUse `cf_list_topics` without a category to see all available topics.",
            scope
        ));
    }

    let mut output = String::from("# Cute Framework Topics\n\n");
    if ordered {
        writeln!(output, "_Listed in recommended reading order_\n")?;
    }

    for (position, topic) in topics.iter().enumerate() {
        let reading_order = topic.as_topic().and_then(|t| t.reading_order);
        if ordered && reading_order.is_some() {
            write!(output, "{}. ", position + 1)?;
        } else {
            write!(output, "- ")?;
        }
        writeln!(output, "**{}** — {}", topic.name, topic.brief())?;
    }

    write!(
        output,
        "\n**Tip:** Use `cf_get_topic` with a topic name to read the full content."
    )?;
    Ok(output)
}
