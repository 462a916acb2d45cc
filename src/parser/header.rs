//! Parser for documentation blocks in Cute Framework C headers.
//!
//! A documented declaration looks like this:
//!
//! ```c
//! /**
//!  * @function cf_make_sprite
//!  * @category sprite
//!  * @brief    Loads a sprite from an aseprite file.
//!  * @param    path  Virtual path to the file.
//!  * @related  CF_Sprite cf_draw_sprite
//!  */
//! CF_API CF_Sprite CF_CALL cf_make_sprite(const char* path);
//! ```
//!
//! Every `/** ... */` block owns the text between its end and the start of the
//! next block. That text supplies the function signature, the `@member`
//! comments of a struct body, or the `@entry` comments of an enum definition.

use super::collect_files;
use crate::error::Result;
use crate::model::{
    DocRecord, EnumDetails, EnumEntry, FunctionDetails, Member, Parameter, RecordDetails,
    SourceLocation, StructDetails,
};
use anyhow::Context;
use regex::Regex;
use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

static DOC_BLOCK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)/\*\*.*?\*/").unwrap());
static COMMENT_PREFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*/?\*+\s?").unwrap());
static COMMENT_SUFFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*\*+/\s*$").unwrap());
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*@(\w+)\s*").unwrap());
static PARAM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)^(\w+)(?:\s+(.*))?$").unwrap());
static COMMENT_ARTIFACT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[/*]+$").unwrap());
static TYPE_DEFINITION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^typedef\s+(struct|enum)").unwrap());
static EXPORT_MACROS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(CF_API|CF_CALL|CF_INLINE)\b\s*").unwrap());
static MEMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*\s*@member\s+(.*?)\s*\*/\s*([^/\n]+)").unwrap());
static ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)/\*\s*@entry\s+(.*?)\s*\*/\s*\\?\s*CF_ENUM\s*\(\s*(\w+)\s*,\s*([^)]*)\)")
        .unwrap()
});

/// Parse every `*.h` file under `dir`, recursively, in sorted path order.
///
/// Files that cannot be read are logged and skipped.
pub fn parse_header_dir(dir: &Path) -> Result<Vec<DocRecord>> {
    anyhow::ensure!(
        dir.is_dir(),
        "Headers directory not found: {}",
        dir.display()
    );

    let mut records = Vec::new();
    for path in collect_files(dir, "h", None) {
        match parse_header_file(&path) {
            Ok(parsed) => {
                tracing::trace!("Parsed {} records from {}", parsed.len(), path.display());
                records.extend(parsed);
            }
            Err(e) => tracing::warn!("Skipping header {}: {:#}", path.display(), e),
        }
    }

    Ok(records)
}

/// Parse a single header file. Records carry the file's base name as their source.
pub fn parse_header_file(path: &Path) -> Result<Vec<DocRecord>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(parse_header(&content, &file_name))
}

/// Parse header text. Blocks without `@function`, `@struct` or `@enum` are ignored.
pub fn parse_header(content: &str, source_file: &str) -> Vec<DocRecord> {
    let blocks: Vec<_> = DOC_BLOCK.find_iter(content).collect();

    blocks
        .iter()
        .enumerate()
        .filter_map(|(i, block)| {
            let end = blocks.get(i + 1).map_or(content.len(), |next| next.start());
            let following = content[block.end()..end].trim();
            let source = SourceLocation {
                file: source_file.to_string(),
                line: line_number(content, block.start()),
            };
            parse_block(block.as_str(), following, source)
        })
        .collect()
}

fn line_number(content: &str, offset: usize) -> Option<u32> {
    u32::try_from(content[..offset].matches('\n').count() + 1).ok()
}

fn parse_block(block: &str, following: &str, source: SourceLocation) -> Option<DocRecord> {
    let mut tags = Tags::parse(block);

    let (name, details) = if let Some(name) = tags.take("function") {
        let details = FunctionDetails {
            signature: extract_signature(following),
            parameters: std::mem::take(&mut tags.params),
            return_description: tags.take("return"),
        };
        (name, RecordDetails::Function(details))
    } else if let Some(name) = tags.take("struct") {
        let details = StructDetails {
            members: extract_members(following),
        };
        (name, RecordDetails::Struct(details))
    } else if let Some(name) = tags.take("enum") {
        let details = EnumDetails {
            entries: extract_entries(following),
        };
        (name, RecordDetails::Enum(details))
    } else {
        return None;
    };

    let mut record = DocRecord::new(name, details);
    record.category = tags.take("category");
    record.brief = tags.take("brief");
    record.remarks = tags.take("remarks");
    record.example = tags.take("example");
    record.example_brief = tags.take("example_brief");
    record.related = tags.related;
    record.source = Some(source);
    Some(record)
}

/// `@tag value` pairs of one documentation block.
#[derive(Debug, Default)]
struct Tags {
    values: HashMap<String, String>,
    params: Vec<Parameter>,
    related: Vec<String>,
}

impl Tags {
    /// A tag's value runs from the tag to the next tag line, comment markers stripped.
    fn parse(block: &str) -> Self {
        let mut tags = Self::default();
        let mut current: Option<(String, Vec<String>)> = None;

        for raw in block.lines() {
            let line = COMMENT_SUFFIX.replace(raw, "");
            let line = COMMENT_PREFIX.replace(&line, "").into_owned();

            if let Some(caps) = TAG.captures(&line) {
                if let Some((tag, content)) = current.take() {
                    tags.save(&tag, &content.join("\n"));
                }
                let rest = line[caps.get(0).map_or(0, |m| m.end())..].trim().to_string();
                current = Some((caps[1].to_string(), vec![rest]));
            } else if let Some((_, content)) = current.as_mut() {
                content.push(line);
            }
        }

        if let Some((tag, content)) = current {
            tags.save(&tag, &content.join("\n"));
        }

        tags
    }

    fn save(&mut self, tag: &str, content: &str) {
        let content = content.trim();
        match tag {
            "param" => {
                if let Some(caps) = PARAM.captures(content) {
                    self.params.push(Parameter {
                        name: caps[1].to_string(),
                        description: caps.get(2).map_or("", |m| m.as_str().trim()).to_string(),
                    });
                }
            }
            "related" => self.related.extend(
                content
                    .split_whitespace()
                    .filter(|name| !COMMENT_ARTIFACT.is_match(name))
                    .map(String::from),
            ),
            _ => {
                self.values.insert(tag.to_string(), content.to_string());
            }
        }
    }

    /// Remove a tag's value. Empty values count as absent.
    fn take(&mut self, tag: &str) -> Option<String> {
        self.values.remove(tag).filter(|value| !value.is_empty())
    }
}

/// First declaration after a block, up to `;` or `{`, with export macros removed.
fn extract_signature(following: &str) -> Option<String> {
    let mut lines = Vec::new();

    for line in following.lines() {
        if line.trim().is_empty() {
            if lines.is_empty() {
                continue;
            }
            break;
        }
        if TYPE_DEFINITION.is_match(line) || line.starts_with("#define") {
            break;
        }

        lines.push(line);
        if line.contains(';') || line.contains('{') {
            break;
        }
    }

    let joined = lines.join("\n");
    let cleaned = EXPORT_MACROS.replace_all(&joined, "");
    let declaration = cleaned
        .split_once('{')
        .map_or(cleaned.as_ref(), |(head, _)| head);
    let collapsed = declaration.split_whitespace().collect::<Vec<_>>().join(" ");
    let signature = collapsed.trim_end_matches(';').trim_end();

    (!signature.is_empty()).then(|| signature.to_string())
}

fn extract_members(following: &str) -> Vec<Member> {
    MEMBER
        .captures_iter(following)
        .filter_map(|caps| {
            let declaration = caps[2].trim().trim_end_matches(';').trim_end();
            (!declaration.is_empty()).then(|| Member {
                declaration: declaration.to_string(),
                description: caps[1].trim().to_string(),
            })
        })
        .collect()
}

fn extract_entries(following: &str) -> Vec<EnumEntry> {
    ENTRY
        .captures_iter(following)
        .map(|caps| EnumEntry {
            name: caps[2].trim().to_string(),
            value: caps[3].trim().to_string(),
            description: caps[1].trim().to_string(),
        })
        .collect()
}
