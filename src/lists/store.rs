use std::path::PathBuf;

use parking_lot::Mutex;

use super::types::MovieList;

/// Errors from the list store.
#[derive(Debug, thiserror::Error)]
pub enum ListError {
    #[error("list IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode list: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("list file for '{name}' is not valid JSON: {source}")]
    Corrupt {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("no list named '{0}'")]
    NotFound(String),

    #[error("invalid list name '{0}'")]
    InvalidName(String),
}

/// File-backed store for named movie lists.
///
/// One pretty-printed JSON file per list under the lists directory, named
/// after the sanitized list name. Writes are atomic (temp file + rename)
/// and serialized behind a store-level lock.
pub struct ListStore {
    dir: PathBuf,
    write_lock: Mutex<()>,
}

impl ListStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Save a list, overwriting any previous list with the same name.
    pub fn save(&self, list: &MovieList) -> Result<(), ListError> {
        let path = self.list_path(&list.name)?;
        let json = serde_json::to_vec_pretty(list).map_err(ListError::Serialize)?;

        let _guard = self.write_lock.lock();
        std::fs::create_dir_all(&self.dir)?;
        let tmp = tempfile::NamedTempFile::new_in(&self.dir)?;
        std::fs::write(tmp.path(), &json)?;
        tmp.persist(path).map_err(|e| e.error)?;

        Ok(())
    }

    /// Load a list by name.
    pub fn load(&self, name: &str) -> Result<MovieList, ListError> {
        let path = self.list_path(name)?;
        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ListError::NotFound(name.to_string()))
            }
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&content).map_err(|source| ListError::Corrupt {
            name: name.to_string(),
            source,
        })
    }

    /// Delete a list by name.
    pub fn delete(&self, name: &str) -> Result<(), ListError> {
        let path = self.list_path(name)?;

        let _guard = self.write_lock.lock();
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(ListError::NotFound(name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Load every list in the directory, skipping files that fail to parse.
    ///
    /// Unparseable files are logged and ignored rather than failing the
    /// whole listing; one damaged file should not hide the other lists.
    pub fn load_all(&self) -> Result<Vec<MovieList>, ListError> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut lists = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }

            let content = std::fs::read_to_string(&path)?;
            match serde_json::from_str::<MovieList>(&content) {
                Ok(list) => lists.push(list),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable list file");
                }
            }
        }

        lists.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(lists)
    }

    /// Names of all stored lists.
    pub fn list_names(&self) -> Result<Vec<String>, ListError> {
        Ok(self.load_all()?.into_iter().map(|l| l.name).collect())
    }

    fn list_path(&self, name: &str) -> Result<PathBuf, ListError> {
        let stem = sanitize_name(name);
        if stem.is_empty() {
            return Err(ListError::InvalidName(name.to_string()));
        }
        Ok(self.dir.join(format!("{stem}.json")))
    }
}

/// Reduce a list name to a filesystem-safe stem: lowercase, spaces become
/// hyphens, everything outside `[a-z0-9-]` is dropped.
fn sanitize_name(name: &str) -> String {
    name.to_lowercase()
        .replace(' ', "-")
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lists::Movie;

    fn sample_list(name: &str) -> MovieList {
        MovieList::new(
            name,
            vec![Movie {
                id: 7,
                title: "Encanto".into(),
                year: Some(2021),
                tmdb_id: Some(568124),
                imdb_id: None,
                poster_url: Some("http://x/encanto.jpg".into()),
                cached_poster: None,
            }],
        )
    }

    fn temp_store() -> (ListStore, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        (ListStore::new(dir.path()), dir)
    }

    #[test]
    fn save_and_load_roundtrip() {
        let (store, _dir) = temp_store();
        let list = sample_list("Family Night");
        store.save(&list).unwrap();

        let loaded = store.load("Family Night").unwrap();
        assert_eq!(loaded, list);
    }

    #[test]
    fn load_missing_list_is_not_found() {
        let (store, _dir) = temp_store();
        assert!(matches!(
            store.load("nope"),
            Err(ListError::NotFound(name)) if name == "nope"
        ));
    }

    #[test]
    fn delete_removes_the_file() {
        let (store, _dir) = temp_store();
        store.save(&sample_list("to-delete")).unwrap();
        store.delete("to-delete").unwrap();
        assert!(matches!(store.load("to-delete"), Err(ListError::NotFound(_))));
    }

    #[test]
    fn delete_missing_list_is_not_found() {
        let (store, _dir) = temp_store();
        assert!(matches!(store.delete("ghost"), Err(ListError::NotFound(_))));
    }

    #[test]
    fn load_all_skips_garbage_files() {
        let (store, dir) = temp_store();
        store.save(&sample_list("good")).unwrap();
        std::fs::write(dir.path().join("bad.json"), "{ not json").unwrap();

        let lists = store.load_all().unwrap();
        assert_eq!(lists.len(), 1);
        assert_eq!(lists[0].name, "good");
    }

    #[test]
    fn load_all_on_missing_dir_is_empty() {
        let store = ListStore::new("/nonexistent/marquee-test-lists");
        assert!(store.load_all().unwrap().is_empty());
    }

    #[test]
    fn names_are_sorted() {
        let (store, _dir) = temp_store();
        store.save(&sample_list("zeta")).unwrap();
        store.save(&sample_list("alpha")).unwrap();

        assert_eq!(store.list_names().unwrap(), vec!["alpha", "zeta"]);
    }

    #[test]
    fn sanitization_maps_names_to_safe_stems() {
        assert_eq!(sanitize_name("Family Night"), "family-night");
        assert_eq!(sanitize_name("Kids' Picks!"), "kids-picks");
        assert_eq!(sanitize_name("../escape"), "escape");
    }

    #[test]
    fn unusable_name_is_rejected() {
        let (store, _dir) = temp_store();
        let list = sample_list("///");
        assert!(matches!(store.save(&list), Err(ListError::InvalidName(_))));
    }
}
