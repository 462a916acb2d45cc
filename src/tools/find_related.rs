//! Bidirectional `@related` lookup.

use crate::error::ToolError;
use crate::model::DocRecord;
use crate::search::DocIndex;
use crate::worker::DocState;
use rmcp::schemars;
use serde::Deserialize;
use std::fmt::Write as _;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct FindRelatedRequest {
    /// Name of the item to find relations for (e.g., 'CF_Sprite', 'cf_make_sprite')
    pub name: String,
}

/// One entry of a record's own `related` list.
#[derive(Debug, Clone, Copy)]
pub enum RelatedEntry<'a> {
    Found(&'a DocRecord),
    /// Named in `related` but absent from the index
    Missing(&'a str),
}

/// Both directions of the relation graph around one record.
#[derive(Debug, Clone, Default)]
pub struct Relations<'a> {
    /// The record's own `related` entries, in declaration order
    pub references: Vec<RelatedEntry<'a>>,
    /// Other records whose `related` names this one, in insertion order
    pub referenced_by: Vec<&'a DocRecord>,
}

impl Relations<'_> {
    pub fn is_empty(&self) -> bool {
        self.references.is_empty() && self.referenced_by.is_empty()
    }
}

/// Relations of `name`, or `None` if no record has that name.
///
/// Back-references are found by scanning every record.
pub fn find_related<'a>(index: &'a DocIndex, name: &str) -> Option<Relations<'a>> {
    let record = index.find(name)?;

    let references = record
        .related
        .iter()
        .map(|related| match index.find(related) {
            Some(found) => RelatedEntry::Found(found),
            None => RelatedEntry::Missing(related),
        })
        .collect();

    let referenced_by = index
        .records()
        .filter(|other| other.name != name && other.related.iter().any(|r| r == name))
        .collect();

    Some(Relations {
        references,
        referenced_by,
    })
}

pub async fn handle_find_related(
    state: &DocState,
    request: FindRelatedRequest,
) -> Result<String, ToolError> {
    let index = state.index().await?;
    render_related(&index, &request.name)
}

pub fn render_related(index: &DocIndex, name: &str) -> Result<String, ToolError> {
    let Some(relations) = find_related(index, name) else {
        return Ok(format!("Not found: '{}'", name));
    };

    if relations.is_empty() {
        return Ok(format!(
            "# {}\n\nNo related items found.\n\n**Tip:** Not all items have explicit relationships documented.",
            name
        ));
    }

    let mut output = format!("# Related items for {}\n\n", name);

    if !relations.references.is_empty() {
        writeln!(output, "## References (items this references)")?;
        for entry in &relations.references {
            match entry {
                RelatedEntry::Found(record) => writeln!(
                    output,
                    "- `{}` ({}) — {}",
                    record.name,
                    record.kind(),
                    record.brief()
                )?,
                RelatedEntry::Missing(missing) => {
                    writeln!(output, "- `{}` (not found in index)", missing)?
                }
            }
        }
        writeln!(output)?;
    }

    if !relations.referenced_by.is_empty() {
        writeln!(output, "## Referenced by (items that reference this)")?;
        for record in &relations.referenced_by {
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

    Ok(output)
}
