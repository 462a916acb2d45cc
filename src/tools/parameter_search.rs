//! Find functions by the types they take or return.

use crate::error::ToolError;
use crate::model::DocRecord;
use crate::search::DocIndex;
use crate::worker::DocState;
use rmcp::schemars;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// Which side of a signature to search.
///
/// DO NOT add doc comments to individual variants - this causes schemars to generate
/// `oneOf` schemas instead of simple `enum` arrays, breaking MCP client enum handling.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Input,
    Output,
    #[default]
    Both,
}

impl Direction {
    const fn includes_input(self) -> bool {
        matches!(self, Self::Input | Self::Both)
    }

    const fn includes_output(self) -> bool {
        matches!(self, Self::Output | Self::Both)
    }
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ParameterSearchRequest {
    /// Type name to search for (e.g., 'CF_Sprite', 'const char*', 'int')
    #[serde(rename = "type")]
    pub type_name: String,
    /// Search direction: 'input' for parameters, 'output' for return types, 'both' for either (default: both)
    #[serde(default)]
    pub direction: Direction,
}

/// Functions whose signature mentions a type, split by where it appears.
#[derive(Debug, Clone, Default)]
pub struct TypeUsage<'a> {
    pub inputs: Vec<&'a DocRecord>,
    pub outputs: Vec<&'a DocRecord>,
}

impl TypeUsage<'_> {
    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty() && self.outputs.is_empty()
    }
}

/// Scan every function signature for `type_name` (case-insensitive substring).
///
/// A function lands in `inputs` if the type appears in its first parameter
/// list, and in `outputs` if it appears in the text before the function name.
/// It may land in both.
pub fn functions_using_type<'a>(
    index: &'a DocIndex,
    type_name: &str,
    direction: Direction,
) -> TypeUsage<'a> {
    let needle = type_name.to_lowercase();
    let mut usage = TypeUsage::default();

    for function in index.functions() {
        let Some(signature) = function.as_function().and_then(|f| f.signature.as_deref()) else {
            continue;
        };

        if direction.includes_output()
            && return_type(signature, &function.name)
                .is_some_and(|ret| ret.to_lowercase().contains(&needle))
        {
            usage.outputs.push(function);
        }

        if direction.includes_input()
            && parameter_list(signature).is_some_and(|params| params.to_lowercase().contains(&needle))
        {
            usage.inputs.push(function);
        }
    }

    usage
}

/// Text before the first `name(` that follows whitespace or a pointer star.
fn return_type<'s>(signature: &'s str, name: &str) -> Option<&'s str> {
    signature.match_indices(name).find_map(|(at, _)| {
        let before = &signature[..at];
        let after = signature[at + name.len()..].trim_start();
        let ret = before.trim_end();
        let separated = before.ends_with(|c: char| c.is_whitespace() || c == '*');
        (separated && after.starts_with('(') && !ret.is_empty()).then_some(ret)
    })
}

/// Contents of the first parenthesized list.
fn parameter_list(signature: &str) -> Option<&str> {
    let (_, rest) = signature.split_once('(')?;
    rest.split_once(')').map(|(params, _)| params)
}

pub async fn handle_parameter_search(
    state: &DocState,
    request: ParameterSearchRequest,
) -> Result<String, ToolError> {
    let index = state.index().await?;
    render_parameter_search(&index, &request.type_name, request.direction)
}

pub fn render_parameter_search(
    index: &DocIndex,
    type_name: &str,
    direction: Direction,
) -> Result<String, ToolError> {
    let usage = functions_using_type(index, type_name, direction);
    if usage.is_empty() {
        return Ok(format!("No functions found using type '{}'", type_name));
    }

    let mut output = format!("# Functions using '{}'\n\n", type_name);
    for (heading, functions) in [("Takes as input", &usage.inputs), ("Returns", &usage.outputs)] {
        if functions.is_empty() {
            continue;
        }
        writeln!(output, "## {} ({})", heading, functions.len())?;
        for function in functions {
            writeln!(output, "- **{}** — {}", function.name, function.brief())?;
            if let Some(signature) = function.as_function().and_then(|f| f.signature.as_deref()) {
                writeln!(output, "  `{}`", signature)?;
            }
        }
        writeln!(output)?;
    }

    write!(
        output,
        "**Tip:** Use `cf_get_details` with a function name for full documentation."
    )?;
    Ok(output)
}
