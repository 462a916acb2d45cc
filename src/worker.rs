//! Shared index state and the background task that builds it.
//!
//! The server starts answering MCP requests before the index exists. Tool
//! handlers see [`ToolError::IndexUnavailable`] until the first build
//! completes; after that every rebuild swaps in a complete index at once.

use crate::builder::{IndexBuilder, SourceOptions};
use crate::error::{Result, ToolError};
use crate::search::DocIndex;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Shared state for documentation queries.
///
/// Readers clone the `Arc` and drop the lock immediately, so a rebuild never
/// waits on a slow query and a query never observes a half-built index.
#[derive(Default)]
pub struct DocState {
    index: RwLock<Option<Arc<DocIndex>>>,
}

impl std::fmt::Debug for DocState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let stats = self
            .index
            .try_read()
            .ok()
            .and_then(|guard| guard.as_ref().map(|index| index.stats()));
        f.debug_struct("DocState").field("stats", &stats).finish()
    }
}

impl DocState {
    /// Create a state with no index; tools report it as unavailable.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a state that is immediately ready.
    pub fn with_index(index: DocIndex) -> Self {
        Self {
            index: RwLock::new(Some(Arc::new(index))),
        }
    }

    /// Current index, or [`ToolError::IndexUnavailable`] if none has been built.
    pub async fn index(&self) -> std::result::Result<Arc<DocIndex>, ToolError> {
        self.index
            .read()
            .await
            .clone()
            .ok_or(ToolError::IndexUnavailable)
    }

    pub async fn is_ready(&self) -> bool {
        self.index.read().await.is_some()
    }

    /// Swap in a freshly built index.
    pub async fn replace_index(&self, index: DocIndex) {
        *self.index.write().await = Some(Arc::new(index));
    }

    /// Drop the current index; tools report it as unavailable until the next build.
    pub async fn clear(&self) {
        *self.index.write().await = None;
    }
}

/// Resolve the headers directory and build an index from it off the async runtime.
pub async fn build_index(options: &SourceOptions) -> Result<DocIndex> {
    let headers_path = options.resolve_headers_path().await?;
    let builder = IndexBuilder::new(headers_path);

    if !builder.is_valid() {
        anyhow::bail!(
            "Headers directory not found: {}. Use --root to point at the Cute Framework \
             include/ directory, or --download to fetch it from GitHub.",
            builder.headers_path().display()
        );
    }

    tokio::task::spawn_blocking(move || builder.build())
        .await
        .map_err(|e| anyhow::anyhow!("Index build task failed: {}", e))?
}

/// Build the index in the background and publish it into `state`.
///
/// Failures are logged; the state stays unavailable.
pub fn spawn_index_build(
    state: Arc<DocState>,
    options: SourceOptions,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        match build_index(&options).await {
            Ok(index) => {
                let stats = index.stats();
                state.replace_index(index).await;
                tracing::info!(
                    "Index ready: {} items in {} categories",
                    stats.total,
                    stats.categories
                );
            }
            Err(e) => {
                tracing::error!("Failed to build documentation index: {:#}", e);
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DocRecord, FunctionDetails};
    use assert2::{check, let_assert};
    use std::path::PathBuf;

    fn fixtures_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
    }

    #[tokio::test]
    async fn new_state_is_unavailable() {
        let state = DocState::new();
        check!(!state.is_ready().await);
        let_assert!(Err(ToolError::IndexUnavailable) = state.index().await);
    }

    #[tokio::test]
    async fn replacing_keeps_old_readers_valid() {
        let state = DocState::with_index(
            [DocRecord::function("cf_old", FunctionDetails::default())]
                .into_iter()
                .collect(),
        );
        let old = state.index().await.unwrap();

        state
            .replace_index(
                [DocRecord::function("cf_new", FunctionDetails::default())]
                    .into_iter()
                    .collect(),
            )
            .await;

        check!(old.find("cf_old").is_some());
        let current = state.index().await.unwrap();
        check!(current.find("cf_new").is_some());
        check!(current.find("cf_old").is_none());
    }

    #[tokio::test]
    async fn clear_makes_state_unavailable() {
        let state = DocState::with_index(DocIndex::new());
        state.clear().await;
        check!(!state.is_ready().await);
    }

    #[tokio::test]
    async fn background_build_publishes_index() {
        let state = Arc::new(DocState::new());
        let options = SourceOptions {
            root: Some(fixtures_dir().display().to_string()),
            ..SourceOptions::default()
        };

        spawn_index_build(state.clone(), options).await.unwrap();

        let index = state.index().await.unwrap();
        check!(index.find("test_function").is_some());
        check!(index.stats().structs == 1);
    }

    #[tokio::test]
    async fn failed_build_leaves_state_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let state = Arc::new(DocState::new());
        let options = SourceOptions {
            root: Some(dir.path().join("missing").display().to_string()),
            ..SourceOptions::default()
        };

        spawn_index_build(state.clone(), options).await.unwrap();
        check!(!state.is_ready().await);
    }
}
