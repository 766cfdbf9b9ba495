//! In-memory key-value storage

use crate::StoreError;
use std::collections::HashMap;
use veracity_domain::traits::KeyValueStorage;

/// `KeyValueStorage` kept entirely in process memory
///
/// Nothing survives the process. Use it for tests and for runs where
/// persistence is disabled.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
    fail_writes: bool,
}

impl MemoryStorage {
    /// Create an empty storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a storage pre-populated with one value
    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut storage = Self::new();
        storage.values.insert(key.into(), value.into());
        storage
    }

    /// Make every subsequent `set` fail (for exercising error paths)
    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }
}

impl KeyValueStorage for MemoryStorage {
    type Error = StoreError;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Self::Error> {
        if self.fail_writes {
            return Err(StoreError::Storage(format!("write to '{}' rejected", key)));
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_round_trip() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.get("k").unwrap(), None);
        storage.set("k", "v").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_failing_writes() {
        let mut storage = MemoryStorage::with_value("k", "v").failing_writes();
        assert!(storage.set("k", "w").is_err());
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("v"));
    }
}
