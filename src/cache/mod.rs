//! Generic TTL disk cache for API responses.
//!
//! Stores one JSON file per key under a cache root, each wrapping the cached
//! payload with the timestamp it was written at. Reads distinguish three
//! outcomes: a fresh hit, a silent miss (absent or expired), and corruption
//! (the file exists but cannot be parsed). Expired entries are never deleted,
//! only ignored; the next write for the same key overwrites them.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Errors surfaced by cache operations.
///
/// A missing or expired entry is *not* an error; `load` reports those as
/// `Ok(None)`. `Corrupt` is kept distinct from a plain miss so operators can
/// spot disk-level problems, but callers may treat it as a miss for fallback.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// Reading or writing a cache file failed.
    #[error("cache IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The payload could not be serialized for storage.
    #[error("failed to serialize cache payload: {0}")]
    Serialize(#[source] serde_json::Error),

    /// An entry exists on disk but could not be parsed.
    #[error("corrupt cache entry for key '{key}': {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// On-disk representation of a single cache entry.
///
/// The timestamp is set exactly once, at write time, by [`DiskCache::store`].
#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry {
    timestamp: DateTime<Utc>,
    data: serde_json::Value,
}

/// Key-to-JSON store with per-read staleness checks.
///
/// Writes are atomic (temp file + rename), so concurrent readers — including
/// other processes sharing the filesystem — never observe a half-written
/// entry.
#[derive(Debug, Clone)]
pub struct DiskCache {
    root: PathBuf,
}

impl DiskCache {
    /// Create a cache rooted at `root`. The directory is created lazily on
    /// the first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The cache root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Serialize `value` and write it under `key`, stamped with the current
    /// time. Overwrites any prior entry for the same key.
    pub fn store<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        std::fs::create_dir_all(&self.root)?;

        let entry = CacheEntry {
            timestamp: Utc::now(),
            data: serde_json::to_value(value).map_err(CacheError::Serialize)?,
        };
        let bytes = serde_json::to_vec(&entry).map_err(CacheError::Serialize)?;

        // Write to a temp file in the same directory, then rename into place
        // so readers never see a partial entry.
        let tmp = tempfile::NamedTempFile::new_in(&self.root)?;
        std::fs::write(tmp.path(), &bytes)?;
        tmp.persist(self.entry_path(key)).map_err(|e| e.error)?;

        Ok(())
    }

    /// Load the entry for `key` if it exists and is younger than `max_age`.
    ///
    /// Returns `Ok(None)` for both a missing entry and an expired one; the
    /// two collapse to "not found" for callers. Returns `Err(Corrupt)` when
    /// the file exists but does not parse into a well-formed entry of the
    /// expected shape.
    pub fn load<T: DeserializeOwned>(
        &self,
        key: &str,
        max_age: Duration,
    ) -> Result<Option<T>, CacheError> {
        let path = self.entry_path(key);
        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let entry: CacheEntry =
            serde_json::from_str(&content).map_err(|source| CacheError::Corrupt {
                key: key.to_string(),
                source,
            })?;

        let max_age = TimeDelta::from_std(max_age).unwrap_or(TimeDelta::MAX);
        if Utc::now().signed_duration_since(entry.timestamp) > max_age {
            tracing::debug!(key, "cache entry expired");
            return Ok(None);
        }

        let value = serde_json::from_value(entry.data).map_err(|source| CacheError::Corrupt {
            key: key.to_string(),
            source,
        })?;
        Ok(Some(value))
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", file_stem(key)))
    }
}

/// Derive a filesystem-safe file stem from an opaque cache key.
///
/// Characters outside `[A-Za-z0-9._-]` are replaced with `_`. When any
/// replacement occurred (or the key is unreasonably long), a short hash of
/// the original key is appended so distinct keys cannot collide after
/// sanitization.
fn file_stem(key: &str) -> String {
    let sanitized: String = key
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if sanitized == key && !key.is_empty() && key.len() <= 120 {
        sanitized
    } else {
        let digest = Sha256::digest(key.as_bytes());
        let mut stem = sanitized;
        stem.truncate(120);
        format!("{}-{}", stem, hex::encode(&digest[..6]))
    }
}
