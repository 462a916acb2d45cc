//! Assembling a [`DocIndex`] from a Cute Framework checkout.

use crate::download::Downloader;
use crate::error::Result;
use crate::model::{DocRecord, RecordKind};
use crate::parser::{parse_header_dir, parse_topic_dir};
use crate::search::DocIndex;
use std::borrow::Cow;
use std::path::{Path, PathBuf};

/// Headers location used when neither a root nor a download is requested.
pub const DEFAULT_HEADERS_PATH: &str = "~/Work/GitHub/pusewicz/cute_framework/include";

/// Where the headers come from.
#[derive(Debug, Clone, Default)]
pub struct SourceOptions {
    /// Explicit headers directory; wins over everything else
    pub root: Option<String>,
    /// Fetch the sources from GitHub when no root is given
    pub download: bool,
    /// Download destination
    pub cache_dir: Option<PathBuf>,
}

impl SourceOptions {
    /// Resolve the headers directory: explicit root, then download, then the default path.
    pub async fn resolve_headers_path(&self) -> Result<PathBuf> {
        if let Some(root) = &self.root {
            return Ok(PathBuf::from(expand_tilde(root).as_ref()));
        }

        if self.download {
            let cache_dir = self
                .cache_dir
                .clone()
                .unwrap_or_else(crate::download::default_cache_dir);
            return Downloader::new(cache_dir)?.fetch().await;
        }

        Ok(PathBuf::from(expand_tilde(DEFAULT_HEADERS_PATH).as_ref()))
    }
}

/// Expands tilde (`~`) in a path to the user's home directory.
///
/// - `~/foo` becomes `/home/user/foo`
/// - `~` becomes `/home/user`
/// - Other paths are returned unchanged
pub fn expand_tilde(path: &str) -> Cow<'_, str> {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return Cow::Owned(home.join(stripped).display().to_string());
        }
    } else if path == "~"
        && let Some(home) = dirs::home_dir()
    {
        return Cow::Owned(home.display().to_string());
    }
    Cow::Borrowed(path)
}

/// Topic guides sit next to the headers: `<parent>/docs/topics`, else `<parent>/topics`.
pub fn find_topics_path(headers_path: &Path) -> Option<PathBuf> {
    let base = headers_path.parent()?;
    [base.join("docs").join("topics"), base.join("topics")]
        .into_iter()
        .find(|candidate| candidate.is_dir())
}

/// Move struct references that the index knows to be enums into `enum_references`.
///
/// Topic links cannot tell a struct from an enum, so the parser files every
/// uppercase name as a struct. Non-topics pass through unchanged.
pub fn refine_topic(mut topic: DocRecord, index: &DocIndex) -> DocRecord {
    let Some(details) = topic.as_topic_mut() else {
        return topic;
    };

    let (enums, structs): (Vec<String>, Vec<String>) = std::mem::take(&mut details.struct_references)
        .into_iter()
        .partition(|name| {
            index
                .find(name)
                .is_some_and(|record| record.kind() == RecordKind::Enum)
        });

    details.struct_references = structs;
    for name in enums {
        if !details.enum_references.contains(&name) {
            details.enum_references.push(name);
        }
    }

    topic
}

/// Builds a fresh index from a headers directory and its sibling topics.
#[derive(Debug, Clone)]
pub struct IndexBuilder {
    headers_path: PathBuf,
}

impl IndexBuilder {
    pub fn new(headers_path: impl Into<PathBuf>) -> Self {
        Self {
            headers_path: headers_path.into(),
        }
    }

    pub fn headers_path(&self) -> &Path {
        &self.headers_path
    }

    pub fn is_valid(&self) -> bool {
        self.headers_path.is_dir()
    }

    /// Parse headers, then topics (refined against the headers), into a new index.
    pub fn build(&self) -> Result<DocIndex> {
        tracing::info!("Parsing headers from {}", self.headers_path.display());
        let mut index: DocIndex = parse_header_dir(&self.headers_path)?.into_iter().collect();

        if let Some(topics_path) = find_topics_path(&self.headers_path) {
            let topics = parse_topic_dir(&topics_path)?;
            for topic in topics {
                let refined = refine_topic(topic, &index);
                index.add(refined);
            }
            tracing::info!(
                "Indexed {} topics from {}",
                index.count(RecordKind::Topic),
                topics_path.display()
            );
        } else {
            tracing::debug!("No topics directory next to {}", self.headers_path.display());
        }

        let stats = index.stats();
        tracing::info!(
            "Indexed {} items ({} functions, {} structs, {} enums, {} topics)",
            stats.total,
            stats.functions,
            stats.structs,
            stats.enums,
            stats.topics
        );

        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EnumDetails, StructDetails, TopicDetails};
    use assert2::{check, let_assert};

    fn topic_with_structs(structs: &[&str], enums: &[&str]) -> DocRecord {
        DocRecord::topic(
            "audio",
            TopicDetails {
                struct_references: structs.iter().map(ToString::to_string).collect(),
                enum_references: enums.iter().map(ToString::to_string).collect(),
                ..TopicDetails::default()
            },
        )
    }

    #[test]
    fn refine_moves_enums_out_of_struct_references() {
        let index: DocIndex = [
            DocRecord::structure("CF_Audio", StructDetails::default()),
            DocRecord::enumeration("CF_PlayDirection", EnumDetails::default()),
        ]
        .into_iter()
        .collect();

        let refined = refine_topic(
            topic_with_structs(&["CF_Audio", "CF_PlayDirection", "CF_Unknown"], &[]),
            &index,
        );
        let_assert!(Some(details) = refined.as_topic());

        check!(details.struct_references == ["CF_Audio", "CF_Unknown"]);
        check!(details.enum_references == ["CF_PlayDirection"]);
    }

    #[test]
    fn refine_does_not_duplicate_enum_references() {
        let index: DocIndex = [DocRecord::enumeration("CF_PlayDirection", EnumDetails::default())]
            .into_iter()
            .collect();

        let refined = refine_topic(
            topic_with_structs(&["CF_PlayDirection"], &["CF_PlayDirection"]),
            &index,
        );
        let_assert!(Some(details) = refined.as_topic());
        check!(details.struct_references.is_empty());
        check!(details.enum_references == ["CF_PlayDirection"]);
    }

    #[test]
    fn tilde_expansion() {
        check!(expand_tilde("/abs/path") == "/abs/path");
        check!(expand_tilde("relative") == "relative");
        if let Some(home) = dirs::home_dir() {
            check!(expand_tilde("~/x") == home.join("x").display().to_string());
        }
    }

    #[test]
    fn topics_path_prefers_docs_topics() {
        let dir = tempfile::tempdir().unwrap();
        let include = dir.path().join("include");
        std::fs::create_dir_all(&include).unwrap();
        check!(find_topics_path(&include).is_none());

        std::fs::create_dir_all(dir.path().join("topics")).unwrap();
        check!(find_topics_path(&include) == Some(dir.path().join("topics")));

        std::fs::create_dir_all(dir.path().join("docs/topics")).unwrap();
        check!(find_topics_path(&include) == Some(dir.path().join("docs").join("topics")));
    }

    #[tokio::test]
    async fn explicit_root_wins_over_download() {
        let options = SourceOptions {
            root: Some("/tmp/cf/include".into()),
            download: true,
            cache_dir: None,
        };
        let path = options.resolve_headers_path().await.unwrap();
        check!(path == PathBuf::from("/tmp/cf/include"));
    }

    #[test]
    fn invalid_headers_path_fails_to_build() {
        let dir = tempfile::tempdir().unwrap();
        let builder = IndexBuilder::new(dir.path().join("missing"));
        check!(!builder.is_valid());
        check!(builder.build().is_err());
    }
}
