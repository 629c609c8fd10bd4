//! Key-value ledger store trait.

use crate::StoreError;

/// The persistent byte-keyed mapping backing the ledger, scoped to one
/// ledger instance by the host.
///
/// The host guarantees that writes made during an invocation become durable
/// only if the invocation completes successfully, and that invocations are
/// serialized against this store. Implementations take `&self`; interior
/// mutability is their concern.
pub trait KvStore {
    /// Read a value. Absent keys are `Ok(None)` — the engine maps absence
    /// to a zero amount, so it must be distinguishable from a backend fault.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError>;

    /// Write a value, creating the entry if it does not exist.
    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError>;

    /// Issue the grouped writes of one operation back-to-back.
    ///
    /// Callers must have finished every precondition check and computed
    /// every new value before calling this; nothing may fail between the
    /// first and last write except the backend itself, whose durability
    /// boundary the host owns.
    fn put_many(&self, entries: &[(Vec<u8>, Vec<u8>)]) -> Result<(), StoreError> {
        for (key, value) in entries {
            self.put(key, value)?;
        }
        Ok(())
    }
}
