//! Account identity type.

use crate::error::TypeError;
use crate::keys::PublicKey;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The raw identity bytes of an account — its Ed25519 public key.
///
/// Opaque to the ledger: compared by exact byte equality, no
/// canonicalization. The width is fixed at 32 bytes so that the
/// concatenated (owner, spender) allowance key is unambiguous.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId(pub [u8; 32]);

impl AccountId {
    pub const LEN: usize = 32;

    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Parse an account id from raw host bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, TypeError> {
        let arr: [u8; 32] = bytes
            .try_into()
            .map_err(|_| TypeError::InvalidAccountId { len: bytes.len() })?;
        Ok(Self(arr))
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl From<PublicKey> for AccountId {
    fn from(key: PublicKey) -> Self {
        Self(key.0)
    }
}

impl From<&PublicKey> for AccountId {
    fn from(key: &PublicKey) -> Self {
        Self(key.0)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}
