//! Cryptographic primitives and the authorization gate for the Florin
//! token ledger.
//!
//! - **Ed25519** for witness signing and verification
//! - [`AuthorityGate`] — the trait the ledger engine authorizes through,
//!   with [`Ed25519Gate`] as the production implementation

pub mod gate;
pub mod keys;
pub mod sign;

pub use gate::{AuthorityGate, Ed25519Gate};
pub use keys::{generate_keypair, keypair_from_seed, public_from_private};
pub use sign::{sign_message, verify_signature};
