//! Opaque authorization proof carried with each invocation.

use serde::{Deserialize, Serialize};

/// Host-supplied evidence that an invocation was authorized by its claimed
/// originator.
///
/// The ledger engine never interprets these bytes; only the authorization
/// gate does. For the Ed25519 gate the payload is a 64-byte signature, but
/// nothing in the engine depends on that.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Witness(Vec<u8>);

impl Witness {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// An empty witness, useful for operations that require no
    /// authorization (queries) and in tests of rejection paths.
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<crate::keys::Signature> for Witness {
    fn from(sig: crate::keys::Signature) -> Self {
        Self(sig.as_bytes().to_vec())
    }
}
