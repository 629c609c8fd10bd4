//! In-memory test doubles for the Florin token ledger.
//!
//! "Nullable" infrastructure: real trait implementations with the external
//! dependency nulled out, so ledger tests run without a storage backend or
//! signature checks.

pub mod gate;
pub mod store;

pub use gate::NullGate;
pub use store::NullKvStore;
