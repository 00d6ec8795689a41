//! JSON file backed timestamp store.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use super::error::StoreError;
use super::TimestampStore;

/// File name used under the data directory.
const STORE_FILE_NAME: &str = "store.json";

/// Directory name used under the platform data directory.
const APP_DIR_NAME: &str = "easy-timer";

/// Returns the default store path (`<data_dir>/easy-timer/store.json`).
///
/// # Errors
///
/// Returns `StoreError::NoDataDir` if the platform has no data directory.
pub fn default_store_path() -> Result<PathBuf, StoreError> {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR_NAME).join(STORE_FILE_NAME))
        .ok_or(StoreError::NoDataDir)
}

/// Store that keeps every key in one JSON object on disk.
///
/// Each operation re-reads the file so that a value written by an earlier
/// process is seen. A missing file is an empty store.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store at the given path. The file is created on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a store at the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if no data directory is available.
    pub fn at_default_location() -> Result<Self, StoreError> {
        default_store_path().map(Self::new)
    }

    /// Returns the path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Deletes the backing file, whatever it contains.
    ///
    /// Returns `false` if there was no file to delete.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the file exists but cannot be removed.
    pub fn discard(&self) -> Result<bool, StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!("Store discarded: {}", self.path.display());
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(source) => Err(StoreError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn load(&self) -> Result<BTreeMap<String, DateTime<Utc>>, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&contents).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&self, values: &BTreeMap<String, DateTime<Utc>>) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(io_err)?;
            }
        }

        let json = serde_json::to_string_pretty(values).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, json).map_err(io_err)?;

        debug!("Store written: {}", self.path.display());
        Ok(())
    }
}

impl TimestampStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<DateTime<Utc>>, StoreError> {
        Ok(self.load()?.get(key).copied())
    }

    fn set(&mut self, key: &str, at: DateTime<Utc>) -> Result<(), StoreError> {
        let mut values = match self.load() {
            Err(e) if e.is_corrupt() => {
                warn!("Overwriting unreadable store: {}", e);
                BTreeMap::new()
            }
            result => result?,
        };
        values.insert(key.to_string(), at);
        self.save(&values)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let mut values = match self.load() {
            Err(e) if e.is_corrupt() => {
                warn!("Discarding unreadable store: {}", e);
                self.discard()?;
                return Ok(());
            }
            result => result?,
        };
        if values.remove(key).is_some() {
            self.save(&values)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn instant(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn test_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("store.json"));
        assert_eq!(store.get("saveTime").unwrap(), None);
    }

    #[test]
    fn test_set_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("store.json");
        let mut store = JsonFileStore::new(&path);

        store.set("saveTime", instant(0)).unwrap();

        assert!(path.exists());
        assert_eq!(store.get("saveTime").unwrap(), Some(instant(0)));
    }

    #[test]
    fn test_value_survives_new_instance() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        JsonFileStore::new(&path)
            .set("saveTime", instant(42))
            .unwrap();

        let reopened = JsonFileStore::new(&path);
        assert_eq!(reopened.get("saveTime").unwrap(), Some(instant(42)));
    }

    #[test]
    fn test_file_contains_rfc3339_timestamp() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        JsonFileStore::new(&path)
            .set("saveTime", instant(0))
            .unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["saveTime"], "2023-11-14T22:13:20Z");
    }

    #[test]
    fn test_remove_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("store.json"));
        store.set("saveTime", instant(1)).unwrap();
        store.set("other", instant(2)).unwrap();

        store.remove("saveTime").unwrap();

        assert_eq!(store.get("saveTime").unwrap(), None);
        assert_eq!(store.get("other").unwrap(), Some(instant(2)));
    }

    #[test]
    fn test_remove_missing_file_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        let mut store = JsonFileStore::new(&path);

        store.remove("saveTime").unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "{not json").unwrap();

        let err = JsonFileStore::new(&path).get("saveTime").unwrap_err();
        assert!(err.is_corrupt());
    }

    #[test]
    fn test_remove_discards_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "{not json").unwrap();
        let mut store = JsonFileStore::new(&path);

        store.remove("saveTime").unwrap();

        assert!(!path.exists());
        assert_eq!(store.get("saveTime").unwrap(), None);
    }

    #[test]
    fn test_set_overwrites_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "{not json").unwrap();
        let mut store = JsonFileStore::new(&path);

        store.set("saveTime", instant(7)).unwrap();

        assert_eq!(store.get("saveTime").unwrap(), Some(instant(7)));
    }

    #[test]
    fn test_discard() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        let mut store = JsonFileStore::new(&path);
        assert!(!store.discard().unwrap());

        store.set("saveTime", instant(0)).unwrap();
        assert!(store.discard().unwrap());
        assert!(!path.exists());
    }

    #[test]
    fn test_empty_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "").unwrap();

        assert_eq!(JsonFileStore::new(&path).get("saveTime").unwrap(), None);
    }

    #[test]
    fn test_default_store_path_ends_with_app_dir() {
        if let Ok(path) = default_store_path() {
            assert!(path.ends_with("easy-timer/store.json"));
        }
    }
}
