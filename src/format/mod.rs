//! Markdown rendering of documentation records for tool output.

pub(crate) mod renderers;
mod source;

pub use renderers::{write_api_reference, write_detail, write_summary, write_topic_line};
pub use source::{GITHUB_RAW_BASE, GITHUB_REPO, SourceUrls};
