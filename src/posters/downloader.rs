use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use reqwest::Client;
use sha2::{Digest, Sha256};
use tokio::sync::Mutex;

use crate::lists::Movie;

/// Timeout for poster image downloads
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors from the poster download cache.
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    #[error("poster download failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to write poster to disk: {0}")]
    Io(#[from] std::io::Error),
}

/// Content-addressed download cache for poster images.
///
/// Filenames are derived from the source URL, not the image bytes, so a URL
/// resolves to the same file across runs and processes. Cached posters are
/// immutable: once a file exists it is returned as-is, with no freshness
/// check and no invalidation path.
pub struct PosterDownloader {
    client: Client,
    root: PathBuf,
    /// Per-URL guards so concurrent requests for the same uncached poster
    /// share one download instead of racing duplicates.
    inflight: DashMap<String, Arc<Mutex<()>>>,
}

impl PosterDownloader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let client = Client::builder()
            .timeout(DOWNLOAD_TIMEOUT)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to build HTTP client with timeout: {}", e);
                Client::new()
            });

        Self {
            client,
            root: root.into(),
            inflight: DashMap::new(),
        }
    }

    /// The poster cache directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Ensure the poster at `url` exists in the cache, downloading it if
    /// necessary, and return its filename within the cache directory.
    ///
    /// Downloads go to a temp file and are renamed into place only on full
    /// success, so a failed transfer never leaves a file the existence check
    /// would mistake for a cached poster.
    pub async fn ensure_cached(&self, url: &str) -> Result<String, DownloadError> {
        let filename = cached_filename(url);
        let path = self.root.join(&filename);

        if path.exists() {
            return Ok(filename);
        }

        let gate = self
            .inflight
            .entry(url.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let guard = gate.lock().await;

        // Another task may have finished the download while we waited.
        if path.exists() {
            drop(guard);
            self.inflight.remove(url);
            return Ok(filename);
        }

        let result = self.download_to(url, &path).await;

        drop(guard);
        self.inflight.remove(url);

        result?;
        tracing::debug!(url, filename = %filename, "Poster downloaded");
        Ok(filename)
    }

    async fn download_to(&self, url: &str, path: &Path) -> Result<(), DownloadError> {
        let bytes = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        std::fs::create_dir_all(&self.root)?;
        let tmp = tempfile::NamedTempFile::new_in(&self.root)?;
        std::fs::write(tmp.path(), &bytes)?;
        tmp.persist(path).map_err(|e| e.error)?;

        Ok(())
    }

    /// Download posters for every movie in the slice that has a poster URL,
    /// recording the cached filename on each success.
    ///
    /// A failed download is logged and skipped; the batch always runs to
    /// completion. Returns the number of posters now cached.
    pub async fn cache_posters(&self, movies: &mut [Movie]) -> usize {
        let mut cached = 0;

        for movie in movies.iter_mut() {
            let Some(url) = movie.poster_url.as_deref().filter(|u| !u.is_empty()) else {
                continue;
            };

            match self.ensure_cached(url).await {
                Ok(filename) => {
                    movie.cached_poster = Some(filename);
                    cached += 1;
                }
                Err(e) => {
                    tracing::warn!(
                        title = %movie.title,
                        url,
                        error = %e,
                        "Poster download failed; continuing with remaining movies"
                    );
                }
            }
        }

        cached
    }
}

/// Derive the stable cache filename for a poster URL.
///
/// First 16 hex characters of the SHA-256 of the URL string, with a `.jpg`
/// extension. Hashing the URL rather than the bytes keeps the name
/// computable before any download happens.
pub fn cached_filename(url: &str) -> String {
    let digest = Sha256::digest(url.as_bytes());
    format!("{}.jpg", hex::encode(&digest[..8]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_is_deterministic() {
        let a = cached_filename("http://example.com/poster.jpg");
        let b = cached_filename("http://example.com/poster.jpg");
        assert_eq!(a, b);
    }

    #[test]
    fn filename_distinguishes_urls() {
        let a = cached_filename("http://example.com/a.jpg");
        let b = cached_filename("http://example.com/b.jpg");
        assert_ne!(a, b);
    }

    #[test]
    fn filename_shape() {
        let name = cached_filename("http://example.com/poster.jpg");
        assert_eq!(name.len(), 16 + 4);
        assert!(name.ends_with(".jpg"));
    }
}
