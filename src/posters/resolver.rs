use std::sync::Arc;
use std::time::Duration;

use crate::cache::DiskCache;
use crate::radarr::{RadarrClient, RadarrError};

/// Namespace prefix for cached Radarr poster lookups.
const CACHE_PREFIX: &str = "poster_radarr_";

/// Errors from poster resolution.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error(transparent)]
    Radarr(#[from] RadarrError),

    /// No catalog entry matched the title, or the matched entry carries no
    /// poster-tagged image.
    #[error("no matching movie/poster found for '{0}'")]
    NotFound(String),
}

/// Resolves a movie title to a poster URL, caching successful lookups.
///
/// Only the Radarr path lives here. The TVDB search is an independent
/// resolve operation on [`TvdbClient`](crate::tvdb::TvdbClient); callers
/// that want a fallback compose the two themselves — the providers are
/// never chained automatically.
pub struct PosterResolver {
    cache: Arc<DiskCache>,
    radarr: Arc<RadarrClient>,
    ttl: Duration,
}

impl PosterResolver {
    /// Create a resolver. `ttl` bounds how long a cached lookup is trusted.
    pub fn new(cache: Arc<DiskCache>, radarr: Arc<RadarrClient>, ttl: Duration) -> Self {
        Self { cache, radarr, ttl }
    }

    /// Resolve `title` to a poster URL via the cache, falling back to a live
    /// Radarr catalog fetch with a case-insensitive exact-title match.
    ///
    /// A successful live lookup is written back to the cache before
    /// returning. A matched movie without a poster image is a failure and is
    /// deliberately *not* cached, so the next call retries the live lookup.
    pub async fn resolve(&self, title: &str) -> Result<String, ResolveError> {
        let key = format!("{CACHE_PREFIX}{title}");

        match self.cache.load::<String>(&key, self.ttl) {
            Ok(Some(url)) => {
                tracing::debug!(title, "Poster URL served from cache");
                return Ok(url);
            }
            Ok(None) => {}
            // Corruption counts as a miss for control flow, but is worth a
            // trace for operators watching the disk.
            Err(e) => tracing::warn!(title, error = %e, "Ignoring corrupt poster cache entry"),
        }

        let catalog = self.radarr.fetch_catalog().await?;

        let url = catalog
            .iter()
            .find(|movie| movie.title.eq_ignore_ascii_case(title))
            .and_then(|movie| movie.poster_url())
            .ok_or_else(|| ResolveError::NotFound(title.to_string()))?;

        if let Err(e) = self.cache.store(&key, &url.to_string()) {
            tracing::warn!(title, error = %e, "Failed to cache resolved poster URL");
        }

        Ok(url.to_string())
    }
}
