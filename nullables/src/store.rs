//! Nullable store — thread-safe in-memory key-value storage for testing.

use florin_store::{KvStore, StoreError};
use std::collections::HashMap;
use std::sync::Mutex;

/// An in-memory ledger store for testing.
///
/// Entries live in a `HashMap` behind a `Mutex`; there is no durability and
/// no transaction boundary, which is fine for single-invocation tests.
pub struct NullKvStore {
    entries: Mutex<HashMap<Vec<u8>, Vec<u8>>>,
}

impl NullKvStore {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Number of entries currently stored.
    pub fn entry_count(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    /// A copy of every entry, for whole-state assertions.
    pub fn snapshot(&self) -> HashMap<Vec<u8>, Vec<u8>> {
        self.entries.lock().unwrap().clone()
    }
}

impl Default for NullKvStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KvStore for NullKvStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_vec(), value.to_vec());
        Ok(())
    }
}
