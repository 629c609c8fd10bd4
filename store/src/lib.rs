//! Abstract storage trait for the Florin token ledger.
//!
//! The ledger engine depends only on this trait. Concrete backends are
//! supplied by the execution host; the in-memory backend used for testing
//! lives in `florin-nullables`.

pub mod error;
pub mod kv;

pub use error::StoreError;
pub use kv::KvStore;
