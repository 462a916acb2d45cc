//! Full documentation for one item looked up by exact name.

use crate::error::ToolError;
use crate::format::write_detail;
use crate::search::{DocIndex, SearchQuery};
use crate::worker::DocState;
use rmcp::schemars;
use serde::Deserialize;
use std::fmt::Write as _;

/// Maximum number of "did you mean" suggestions for an unknown name.
const MAX_SUGGESTIONS: usize = 5;

const NAMING_TIP: &str = "**Tip:** Cute Framework uses `cf_` prefix for functions and `CF_` prefix for types (structs/enums).";

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetDetailsRequest {
    /// Exact name of the item (e.g., 'cf_make_app', 'CF_Sprite', 'CF_PlayDirection')
    pub name: String,
}

pub async fn handle_get_details(
    state: &DocState,
    request: GetDetailsRequest,
) -> Result<String, ToolError> {
    let index = state.index().await?;
    render_details(&index, &request.name)
}

/// Detail text for `name`, or a not-found message with suggestions.
pub fn render_details(index: &DocIndex, name: &str) -> Result<String, ToolError> {
    let mut output = String::new();

    if let Some(record) = index.find(name) {
        write_detail(&mut output, record, index)?;
        return Ok(output);
    }

    let suggestions = index.search(SearchQuery::new(name).limit(MAX_SUGGESTIONS));
    writeln!(output, "Not found: '{}'\n", name)?;
    if !suggestions.is_empty() {
        writeln!(output, "**Similar items:**")?;
        for record in suggestions {
            writeln!(
                output,
                "- `{}` ({}) — {}",
                record.name,
                record.kind(),
                record.brief()
            )?;
        }
        writeln!(output)?;
    }
    write!(output, "{}", NAMING_TIP)?;

    Ok(output)
}
