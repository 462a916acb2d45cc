//! Fetching the Cute Framework sources from GitHub.
//!
//! Only the `include/` headers and the `docs/topics/` guides are kept; the
//! rest of the archive is skipped during extraction.

use crate::error::{DownloadError, Result};
use anyhow::Context;
use flate2::read::GzDecoder;
use futures::{Stream, StreamExt};
use std::fs::File;
use std::io::Read;
use std::path::{Component, Path, PathBuf};
use tar::Archive;
use tokio::io::AsyncWriteExt;

/// Tarball of the framework's default branch.
pub const ARCHIVE_URL: &str =
    "https://github.com/RandyGaul/cute_framework/archive/refs/heads/master.tar.gz";

/// Default download location: `<platform cache dir>/cf-docs-mcp`.
pub fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(env!("CARGO_PKG_NAME"))
}

/// Downloads the framework archive into a cache directory and extracts the docs.
#[derive(Debug, Clone)]
pub struct Downloader {
    client: reqwest::Client,
    cache_dir: PathBuf,
}

impl Downloader {
    pub fn new(cache_dir: impl Into<PathBuf>) -> Result<Self> {
        let user_agent = format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        tracing::debug!("Creating HTTP client with User-Agent: {}", user_agent);

        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            cache_dir: cache_dir.into(),
        })
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Where extracted headers live.
    pub fn include_path(&self) -> PathBuf {
        self.cache_dir.join("include")
    }

    /// Return the headers directory, downloading the archive unless a
    /// non-empty one is already cached.
    pub async fn fetch(&self) -> Result<PathBuf> {
        let include = self.include_path();
        if is_populated(&include) {
            tracing::info!("Reusing cached headers at {}", include.display());
            return Ok(include);
        }

        tokio::fs::create_dir_all(&self.cache_dir)
            .await
            .with_context(|| format!("Failed to create {}", self.cache_dir.display()))?;

        let archive_path = self
            .cache_dir
            .join(format!("cute_framework-{}.tar.gz", std::process::id()));
        self.download_to(&archive_path).await?;

        let cache_dir = self.cache_dir.clone();
        let extract_from = archive_path.clone();
        let extracted = tokio::task::spawn_blocking(move || {
            let file = File::open(&extract_from)
                .with_context(|| format!("Failed to open {}", extract_from.display()))?;
            extract_docs(file, &cache_dir)
        })
        .await
        .context("Extraction task panicked")?;

        tokio::fs::remove_file(&archive_path).await.ok();

        let include = extracted?;
        tracing::info!("Downloaded headers to {}", include.display());
        Ok(include)
    }

    async fn download_to(&self, destination: &Path) -> Result<()> {
        tracing::info!("Downloading Cute Framework sources from {}", ARCHIVE_URL);

        let response = self
            .client
            .get(ARCHIVE_URL)
            .send()
            .await
            .context("Failed to download Cute Framework archive")?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::Status {
                status,
                url: ARCHIVE_URL.to_string(),
            }
            .into());
        }

        save_stream(response.bytes_stream(), destination).await
    }
}

/// Write a byte stream to `destination`. A partially written file is removed on failure.
async fn save_stream<S, B, E>(stream: S, destination: &Path) -> Result<()>
where
    S: Stream<Item = std::result::Result<B, E>>,
    B: AsRef<[u8]>,
    E: std::error::Error + Send + Sync + 'static,
{
    let result = write_stream(stream, destination).await;
    if result.is_err() {
        tokio::fs::remove_file(destination).await.ok();
    }
    result
}

async fn write_stream<S, B, E>(stream: S, destination: &Path) -> Result<()>
where
    S: Stream<Item = std::result::Result<B, E>>,
    B: AsRef<[u8]>,
    E: std::error::Error + Send + Sync + 'static,
{
    let mut file = tokio::fs::File::create(destination)
        .await
        .with_context(|| format!("Failed to create {}", destination.display()))?;

    let mut stream = std::pin::pin!(stream);
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.context("Failed to read chunk from download stream")?;
        file.write_all(chunk.as_ref())
            .await
            .context("Failed to write downloaded archive")?;
    }
    file.flush().await.context("Failed to write downloaded archive")?;

    Ok(())
}

fn is_populated(dir: &Path) -> bool {
    std::fs::read_dir(dir).is_ok_and(|mut entries| entries.next().is_some())
}

/// Extract `<top>/include/` and `<top>/docs/topics/` from a gzipped tarball into
/// `dest/include` and `dest/docs/topics`, replacing any previous copy.
///
/// Returns the include path.
pub fn extract_docs<R: Read>(reader: R, dest: &Path) -> Result<PathBuf> {
    let include = dest.join("include");
    let topics = dest.join("docs").join("topics");
    for stale in [&include, &topics] {
        if stale.exists() {
            std::fs::remove_dir_all(stale)
                .with_context(|| format!("Failed to remove {}", stale.display()))?;
        }
    }

    let mut archive = Archive::new(GzDecoder::new(reader));
    let mut found_include = false;

    for entry in archive.entries().context("Failed to read archive")? {
        let mut entry = entry.context("Corrupt archive entry")?;
        let path = entry.path().context("Invalid archive path")?.into_owned();

        // Skip the top-level directory (cute_framework-master/)
        let components: Vec<_> = path.components().collect();
        if components.len() < 2 {
            continue;
        }
        let relative: PathBuf = components[1..].iter().collect();

        let wanted = relative.starts_with("include") || relative.starts_with("docs/topics");
        if !wanted {
            continue;
        }
        if relative.components().any(|c| matches!(c, Component::ParentDir)) {
            tracing::warn!("Skipping entry with parent directory reference: {}", path.display());
            continue;
        }

        found_include |= relative.starts_with("include");

        let target = dest.join(&relative);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        entry
            .unpack(&target)
            .with_context(|| format!("Failed to extract {}", relative.display()))?;
    }

    if !found_include {
        return Err(DownloadError::MissingInclude.into());
    }

    Ok(include)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::{check, let_assert};
    use flate2::Compression;
    use flate2::write::GzEncoder;

    fn tarball(files: &[(&str, &str)]) -> Vec<u8> {
        let encoder = GzEncoder::new(Vec::new(), Compression::fast());
        let mut builder = tar::Builder::new(encoder);
        for (path, content) in files {
            let mut header = tar::Header::new_gnu();
            header.set_size(content.len() as u64);
            header.set_mode(0o644);
            header.set_cksum();
            builder
                .append_data(&mut header, path, content.as_bytes())
                .unwrap();
        }
        builder.into_inner().unwrap().finish().unwrap()
    }

    #[test]
    fn extracts_include_and_topics_only() {
        let archive = tarball(&[
            ("cute_framework-master/include/cute_app.h", "/** @function cf_make_app */"),
            ("cute_framework-master/docs/topics/audio.md", "# Audio"),
            ("cute_framework-master/docs/api/cf_make_app.md", "# cf_make_app"),
            ("cute_framework-master/src/cute_app.cpp", "int main() {}"),
        ]);
        let dir = tempfile::tempdir().unwrap();

        let include = extract_docs(archive.as_slice(), dir.path()).unwrap();

        check!(include == dir.path().join("include"));
        check!(include.join("cute_app.h").is_file());
        check!(dir.path().join("docs/topics/audio.md").is_file());
        check!(!dir.path().join("docs/api").exists());
        check!(!dir.path().join("src").exists());
    }

    #[test]
    fn archive_without_include_is_rejected() {
        let archive = tarball(&[("cute_framework-master/README.md", "hello")]);
        let dir = tempfile::tempdir().unwrap();

        let_assert!(Err(e) = extract_docs(archive.as_slice(), dir.path()));
        check!(matches!(
            e.downcast_ref::<DownloadError>(),
            Some(DownloadError::MissingInclude)
        ));
    }

    #[test]
    fn previous_extraction_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("include")).unwrap();
        std::fs::write(dir.path().join("include/stale.h"), "").unwrap();

        let archive = tarball(&[("top/include/fresh.h", "")]);
        extract_docs(archive.as_slice(), dir.path()).unwrap();

        check!(!dir.path().join("include/stale.h").exists());
        check!(dir.path().join("include/fresh.h").exists());
    }

    #[tokio::test]
    async fn populated_cache_is_reused_without_network() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("include")).unwrap();
        std::fs::write(dir.path().join("include/cute.h"), "").unwrap();

        let downloader = Downloader::new(dir.path()).unwrap();
        let path = downloader.fetch().await.unwrap();
        check!(path == dir.path().join("include"));
    }

    #[tokio::test]
    async fn stream_is_written_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("archive.tar.gz");
        let chunks = futures::stream::iter([
            Ok::<_, std::io::Error>(b"cute".to_vec()),
            Ok(b"_framework".to_vec()),
        ]);

        save_stream(chunks, &path).await.unwrap();
        check!(std::fs::read(&path).unwrap() == b"cute_framework");
    }

    #[tokio::test]
    async fn interrupted_stream_leaves_no_partial_archive() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("archive.tar.gz");
        let chunks = futures::stream::iter([
            Ok(b"partial".to_vec()),
            Err(std::io::Error::other("connection reset")),
        ]);

        let_assert!(Err(e) = save_stream(chunks, &path).await);
        check!(e.to_string().contains("download stream"));
        check!(!path.exists());
    }

    #[test]
    fn empty_directory_is_not_populated() {
        let dir = tempfile::tempdir().unwrap();
        check!(!is_populated(dir.path()));
        check!(!is_populated(&dir.path().join("missing")));
    }
}
