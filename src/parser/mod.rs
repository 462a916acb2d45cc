//! Ingestion of Cute Framework C headers and markdown topic guides into [`DocRecord`]s.
//!
//! [`DocRecord`]: crate::model::DocRecord

pub mod header;
pub mod topic;

pub use header::{parse_header, parse_header_dir, parse_header_file};
pub use topic::{parse_reading_order, parse_topic, parse_topic_dir, topic_category};

use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Files under `dir` with the given extension, sorted for deterministic ingestion order.
///
/// `max_depth` of `Some(1)` restricts the walk to direct children.
pub(crate) fn collect_files(dir: &Path, extension: &str, max_depth: Option<usize>) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkBuilder::new(dir)
        .standard_filters(false)
        .max_depth(max_depth)
        .build()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_some_and(|t| t.is_file()))
        .map(|e| e.into_path())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext == extension)
        })
        .collect();

    files.sort();
    files
}
