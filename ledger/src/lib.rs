//! The Florin token ledger engine.
//!
//! A deterministic record of balances and delegated-spend allowances,
//! mutated only through a closed set of authorized operations. The engine
//! owns *when* state changes; the host-provided key-value store owns *how*
//! mutations persist, and the authorization gate owns *who* may cause them.
//!
//! The ledger has two macro-states: uninitialized until the trust anchor
//! issues the fixed supply, active afterwards. Reads of absent entries are
//! zero in either state.

pub mod engine;
pub mod error;
pub mod host;
pub mod op;
pub mod schema;

pub use engine::{LedgerConfig, LedgerEngine};
pub use error::LedgerError;
pub use host::{respond, HostReply};
pub use op::{Operation, Outcome};
