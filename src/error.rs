//! Error handling types and utilities.

/// A specialized Result type for ingestion, download and startup paths.
///
/// This is an alias for `anyhow::Result` with context added via `.context()` and
/// `.with_context()` methods throughout the codebase.
pub type Result<T> = anyhow::Result<T>;

/// Error returned by tool handlers.
///
/// Not-found lookups are not errors; they render as ordinary text with
/// suggestions. Only conditions that make a tool unable to answer at all end up here.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    /// No index has been built yet, or the last build failed.
    #[error("Index not available")]
    IndexUnavailable,

    #[error("Failed to render output: {0}")]
    Format(#[from] std::fmt::Error),
}

/// Error returned when fetching the Cute Framework source archive fails.
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    #[error("Download failed with HTTP status {status} for {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("Archive does not contain an include/ directory")]
    MissingInclude,
}
