//! Fundamental types for the Florin token ledger.
//!
//! This crate defines the types shared across every other crate in the
//! workspace: account identities, amounts and their canonical byte codec,
//! key material, and authorization witnesses.

pub mod account;
pub mod amount;
pub mod error;
pub mod keys;
pub mod witness;

pub use account::AccountId;
pub use amount::Amount;
pub use error::{AmountError, TypeError};
pub use keys::{KeyPair, PrivateKey, PublicKey, Signature};
pub use witness::Witness;
