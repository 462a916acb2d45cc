//! Documentation records produced by the parsers and stored in the index.
//!
//! Every record shares a set of base fields ([`DocRecord`]) and carries a
//! kind-specific payload ([`RecordDetails`]). The kind of a record is derived
//! from its payload and can never drift from it.

use rmcp::schemars;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Discriminant of a [`DocRecord`].
///
/// DO NOT add doc comments to individual variants - this causes schemars to generate
/// `oneOf` schemas instead of simple `enum` arrays, breaking MCP client enum handling.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, schemars::JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Function,
    Struct,
    Enum,
    Topic,
}

impl RecordKind {
    /// All kinds, in the order they are reported by stats and listings.
    pub const ALL: [Self; 4] = [Self::Function, Self::Struct, Self::Enum, Self::Topic];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Function => "function",
            Self::Struct => "struct",
            Self::Enum => "enum",
            Self::Topic => "topic",
        }
    }

    /// Plural label used in counts ("3 functions").
    pub const fn plural(self) -> &'static str {
        match self {
            Self::Function => "functions",
            Self::Struct => "structs",
            Self::Enum => "enums",
            Self::Topic => "topics",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a record was declared. Only used for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    /// File name relative to the headers directory (e.g. `cute_sprite.h`)
    pub file: String,
    /// 1-based line of the documentation block, if known
    pub line: Option<u32>,
}

/// A documented function parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub description: String,
}

/// A documented struct member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Declaration text without the trailing semicolon (e.g. `const char* name`)
    pub declaration: String,
    pub description: String,
}

/// A documented enum entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumEntry {
    pub name: String,
    /// Literal value as written in the source (e.g. `0`, `1 << 2`)
    pub value: String,
    pub description: String,
}

/// A `## Heading` section of a topic guide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionDetails {
    /// C declaration with export macros stripped
    pub signature: Option<String>,
    pub parameters: Vec<Parameter>,
    pub return_description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructDetails {
    pub members: Vec<Member>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumDetails {
    pub entries: Vec<EnumEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicDetails {
    /// Full markdown body of the guide
    pub content: String,
    pub sections: Vec<Section>,
    pub function_references: Vec<String>,
    pub struct_references: Vec<String>,
    pub enum_references: Vec<String>,
    pub topic_references: Vec<String>,
    /// Position in the curated reading path; `None` sorts after every ordered topic
    pub reading_order: Option<u32>,
}

impl TopicDetails {
    /// Every API name this topic discusses (functions, then structs, then enums).
    pub fn api_references(&self) -> impl Iterator<Item = &str> {
        self.function_references
            .iter()
            .chain(&self.struct_references)
            .chain(&self.enum_references)
            .map(String::as_str)
    }
}

/// Kind-specific payload of a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RecordDetails {
    Function(FunctionDetails),
    Struct(StructDetails),
    Enum(EnumDetails),
    Topic(TopicDetails),
}

impl RecordDetails {
    pub const fn kind(&self) -> RecordKind {
        match self {
            Self::Function(_) => RecordKind::Function,
            Self::Struct(_) => RecordKind::Struct,
            Self::Enum(_) => RecordKind::Enum,
            Self::Topic(_) => RecordKind::Topic,
        }
    }
}

/// One indexed documentation unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocRecord {
    /// Primary key, unique across all kinds
    pub name: String,
    pub category: Option<String>,
    pub brief: Option<String>,
    pub remarks: Option<String>,
    pub example: Option<String>,
    pub example_brief: Option<String>,
    /// Names of related records, in declaration order
    pub related: Vec<String>,
    pub source: Option<SourceLocation>,
    #[serde(flatten)]
    pub details: RecordDetails,
}

impl DocRecord {
    /// Create a record with only a name and payload; every optional field is empty.
    pub fn new(name: impl Into<String>, details: RecordDetails) -> Self {
        Self {
            name: name.into(),
            category: None,
            brief: None,
            remarks: None,
            example: None,
            example_brief: None,
            related: Vec::new(),
            source: None,
            details,
        }
    }

    pub fn function(name: impl Into<String>, details: FunctionDetails) -> Self {
        Self::new(name, RecordDetails::Function(details))
    }

    pub fn structure(name: impl Into<String>, details: StructDetails) -> Self {
        Self::new(name, RecordDetails::Struct(details))
    }

    pub fn enumeration(name: impl Into<String>, details: EnumDetails) -> Self {
        Self::new(name, RecordDetails::Enum(details))
    }

    pub fn topic(name: impl Into<String>, details: TopicDetails) -> Self {
        Self::new(name, RecordDetails::Topic(details))
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_brief(mut self, brief: impl Into<String>) -> Self {
        self.brief = Some(brief.into());
        self
    }

    pub fn with_remarks(mut self, remarks: impl Into<String>) -> Self {
        self.remarks = Some(remarks.into());
        self
    }

    pub fn with_related<I, S>(mut self, related: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.related = related.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_source(mut self, file: impl Into<String>, line: Option<u32>) -> Self {
        self.source = Some(SourceLocation {
            file: file.into(),
            line,
        });
        self
    }

    pub const fn kind(&self) -> RecordKind {
        self.details.kind()
    }

    /// Category as a borrowed str, treating an empty string as absent.
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !c.is_empty())
    }

    pub fn brief(&self) -> &str {
        self.brief.as_deref().unwrap_or("")
    }

    pub const fn as_function(&self) -> Option<&FunctionDetails> {
        match &self.details {
            RecordDetails::Function(f) => Some(f),
            _ => None,
        }
    }

    pub const fn as_struct(&self) -> Option<&StructDetails> {
        match &self.details {
            RecordDetails::Struct(s) => Some(s),
            _ => None,
        }
    }

    pub const fn as_enum(&self) -> Option<&EnumDetails> {
        match &self.details {
            RecordDetails::Enum(e) => Some(e),
            _ => None,
        }
    }

    pub const fn as_topic(&self) -> Option<&TopicDetails> {
        match &self.details {
            RecordDetails::Topic(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_topic_mut(&mut self) -> Option<&mut TopicDetails> {
        match &mut self.details {
            RecordDetails::Topic(t) => Some(t),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::{check, let_assert};

    #[test]
    fn kind_follows_payload() {
        let record = DocRecord::structure("CF_Sprite", StructDetails::default());
        check!(record.kind() == RecordKind::Struct);
        check!(record.as_function().is_none());
        check!(record.as_struct().is_some());
    }

    #[test]
    fn new_record_has_empty_collections() {
        let record = DocRecord::function("cf_make_app", FunctionDetails::default());
        check!(record.related.is_empty());
        check!(record.brief() == "");
        let_assert!(Some(details) = record.as_function());
        check!(details.parameters.is_empty());
        check!(details.signature.is_none());
    }

    #[test]
    fn empty_category_is_treated_as_absent() {
        let record = DocRecord::function("f", FunctionDetails::default()).with_category("");
        check!(record.category().is_none());
    }

    #[test]
    fn topic_api_references_chain_all_lists() {
        let details = TopicDetails {
            function_references: vec!["cf_play_sound".into()],
            struct_references: vec!["CF_Audio".into()],
            enum_references: vec!["CF_PlayDirection".into()],
            ..TopicDetails::default()
        };
        let refs: Vec<_> = details.api_references().collect();
        check!(refs == ["cf_play_sound", "CF_Audio", "CF_PlayDirection"]);
    }

    #[test]
    fn kind_serializes_lowercase() {
        let json = serde_json::to_string(&RecordKind::Function).unwrap();
        check!(json == "\"function\"");
        let kind: RecordKind = serde_json::from_str("\"topic\"").unwrap();
        check!(kind == RecordKind::Topic);
    }
}
