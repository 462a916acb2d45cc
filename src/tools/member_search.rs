//! Find structs by the declarations of their members.

use super::{DEFAULT_LIMIT, default_limit};
use crate::error::ToolError;
use crate::model::{DocRecord, Member};
use crate::search::DocIndex;
use crate::worker::DocState;
use rmcp::schemars;
use serde::Deserialize;
use std::fmt::Write as _;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct MemberSearchRequest {
    /// Member name or type to search for (e.g., 'x', 'position', 'float', 'CF_V2')
    pub query: String,
    /// Maximum number of structs to return (default: 20)
    #[serde(default = "default_limit")]
    pub limit: Option<usize>,
}

/// A struct and the subset of its members that matched.
#[derive(Debug, Clone)]
pub struct MemberMatch<'a> {
    pub record: &'a DocRecord,
    pub members: Vec<&'a Member>,
}

/// Structs with at least one member declaration containing `query`
/// (case-insensitive), in insertion order, at most `limit` of them.
pub fn structs_with_member<'a>(index: &'a DocIndex, query: &str, limit: usize) -> Vec<MemberMatch<'a>> {
    let needle = query.to_lowercase();

    index
        .structs()
        .filter_map(|record| {
            let members: Vec<&Member> = record
                .as_struct()?
                .members
                .iter()
                .filter(|m| m.declaration.to_lowercase().contains(&needle))
                .collect();
            (!members.is_empty()).then_some(MemberMatch { record, members })
        })
        .take(limit)
        .collect()
}

pub async fn handle_member_search(
    state: &DocState,
    request: MemberSearchRequest,
) -> Result<String, ToolError> {
    let index = state.index().await?;
    render_member_search(
        &index,
        &request.query,
        request.limit.unwrap_or(DEFAULT_LIMIT),
    )
}

pub fn render_member_search(index: &DocIndex, query: &str, limit: usize) -> Result<String, ToolError> {
    let matches = structs_with_member(index, query, limit);
    if matches.is_empty() {
        return Ok(format!("No structs found with members matching '{}'", query));
    }

    let mut output = format!("# Structs with members matching '{}'\n\n", query);
    for MemberMatch { record, members } in &matches {
        match record.category() {
            Some(category) => writeln!(output, "- **{}** ({}) — {}", record.name, category, record.brief())?,
            None => writeln!(output, "- **{}** — {}", record.name, record.brief())?,
        }
        for member in members {
            writeln!(output, "  - `{}` — {}", member.declaration, member.description)?;
        }
    }

    if matches.len() >= limit {
        write!(
            output,
            "\n_Results limited to {}. Narrow your search for more specific results._\n",
            limit
        )?;
    }

    write!(
        output,
        "\n**Tip:** Use `cf_get_details` with a struct name for full documentation."
    )?;
    Ok(output)
}
