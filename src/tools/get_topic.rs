//! Full content of a single topic guide.

use crate::error::ToolError;
use crate::format::{write_detail, write_topic_line};
use crate::model::{DocRecord, RecordKind};
use crate::search::DocIndex;
use crate::worker::DocState;
use rmcp::schemars;
use serde::Deserialize;
use std::fmt::Write as _;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetTopicRequest {
    /// Topic name (e.g., 'audio', 'collision', 'getting_started')
    pub name: String,
}

pub async fn handle_get_topic(
    state: &DocState,
    request: GetTopicRequest,
) -> Result<String, ToolError> {
    let index = state.index().await?;
    render_topic(&index, &request.name)
}

pub fn render_topic(index: &DocIndex, name: &str) -> Result<String, ToolError> {
    let mut output = String::new();

    if let Some(topic) = index.find(name).filter(|r| r.kind() == RecordKind::Topic) {
        write_detail(&mut output, topic, index)?;
        return Ok(output);
    }

    let similar = similar_topics(index, name);
    write!(output, "Topic not found: '{}'\n\n", name)?;
    if similar.is_empty() {
        write!(output, "Use `cf_list_topics` to see available topics.")?;
    } else {
        writeln!(output, "**Similar topics:**")?;
        for topic in similar {
            write_topic_line(&mut output, topic)?;
        }
    }

    Ok(output)
}

/// Topics whose name contains, or is contained in, `name`. Underscores are
/// ignored for the second containment check so `gettingstarted` finds
/// `getting_started`.
fn similar_topics<'a>(index: &'a DocIndex, name: &str) -> Vec<&'a DocRecord> {
    let squashed = name.replace('_', "");
    index
        .topics()
        .filter(|topic| {
            topic.name.contains(name)
                || name.contains(topic.name.as_str())
                || topic.name.replace('_', "").contains(&squashed)
        })
        .collect()
}
