//! Persistent key-value store for the suspension timestamp.
//!
//! The timer keeps exactly one value across background/foreground cycles:
//! the instant the app was last suspended, under [`SAVE_TIME_KEY`].
//! Writes are last-write-wins; nothing reads concurrently with a write.
//!
//! [`SAVE_TIME_KEY`]: crate::types::SAVE_TIME_KEY

mod error;
mod file;

use std::collections::HashMap;

use chrono::{DateTime, Utc};

pub use self::error::StoreError;
pub use self::file::{default_store_path, JsonFileStore};

/// Storage for named timestamps.
pub trait TimestampStore {
    /// Returns the timestamp stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<DateTime<Utc>>, StoreError>;

    /// Stores `at` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, at: DateTime<Utc>) -> Result<(), StoreError>;

    /// Removes the value under `key`. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;

    /// Reads and removes the value under `key`.
    fn take(&mut self, key: &str) -> Result<Option<DateTime<Utc>>, StoreError> {
        let value = self.get(key)?;
        if value.is_some() {
            self.remove(key)?;
        }
        Ok(value)
    }
}

/// In-memory store; nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, DateTime<Utc>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl TimestampStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<DateTime<Utc>>, StoreError> {
        Ok(self.values.get(key).copied())
    }

    fn set(&mut self, key: &str, at: DateTime<Utc>) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), at);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.values.remove(key);
        Ok(())
    }
}

/// Either store, chosen at run time from the configuration.
#[derive(Debug)]
pub enum AnyStore {
    Memory(MemoryStore),
    File(JsonFileStore),
}

impl TimestampStore for AnyStore {
    fn get(&self, key: &str) -> Result<Option<DateTime<Utc>>, StoreError> {
        match self {
            Self::Memory(store) => store.get(key),
            Self::File(store) => store.get(key),
        }
    }

    fn set(&mut self, key: &str, at: DateTime<Utc>) -> Result<(), StoreError> {
        match self {
            Self::Memory(store) => store.set(key, at),
            Self::File(store) => store.set(key, at),
        }
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        match self {
            Self::Memory(store) => store.remove(key),
            Self::File(store) => store.remove(key),
        }
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
    fn test_memory_store_get_missing() {
        let store = MemoryStore::new();
        assert_eq!(store.get("saveTime").unwrap(), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_memory_store_last_write_wins() {
        let mut store = MemoryStore::new();
        store.set("saveTime", instant(0)).unwrap();
        store.set("saveTime", instant(5)).unwrap();

        assert_eq!(store.get("saveTime").unwrap(), Some(instant(5)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_memory_store_remove_missing_is_ok() {
        let mut store = MemoryStore::new();
        assert!(store.remove("saveTime").is_ok());
    }

    #[test]
    fn test_take_clears_value() {
        let mut store = MemoryStore::new();
        store.set("saveTime", instant(3)).unwrap();

        assert_eq!(store.take("saveTime").unwrap(), Some(instant(3)));
        assert_eq!(store.take("saveTime").unwrap(), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_any_store_delegates() {
        let mut store = AnyStore::Memory(MemoryStore::new());
        store.set("saveTime", instant(1)).unwrap();
        assert_eq!(store.get("saveTime").unwrap(), Some(instant(1)));
        store.remove("saveTime").unwrap();
        assert_eq!(store.get("saveTime").unwrap(), None);
    }
}
