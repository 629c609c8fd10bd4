//! The authorization gate — the trust boundary in front of every mutation.

use crate::sign::verify_signature;
use florin_types::{AccountId, PublicKey, Signature, Witness};

/// Confirms that an invocation's claimed originator actually authorized it,
/// and whether an account is the trust anchor permitted to issue supply.
///
/// The ledger engine calls through this trait and never inspects witness
/// material itself. `payload` is the canonical byte form of the operation
/// being authorized; the engine computes it, the gate decides what the
/// witness must prove about it.
pub trait AuthorityGate {
    /// Does `witness` prove that `originator` authorized this payload?
    fn verify(&self, originator: &AccountId, payload: &[u8], witness: &Witness) -> bool;

    /// Is `account` the fixed identity permitted to perform issuance?
    fn is_trust_anchor(&self, account: &AccountId) -> bool;
}

/// The production gate: the witness is a 64-byte Ed25519 signature over the
/// payload by the originator's key.
///
/// The trust anchor is injected at construction, never compiled in, so
/// tests can substitute their own anchor identity.
pub struct Ed25519Gate {
    trust_anchor: AccountId,
}

impl Ed25519Gate {
    pub fn new(trust_anchor: AccountId) -> Self {
        Self { trust_anchor }
    }
}

impl AuthorityGate for Ed25519Gate {
    fn verify(&self, originator: &AccountId, payload: &[u8], witness: &Witness) -> bool {
        // A witness of the wrong shape verifies as false, never as an error.
        let Some(signature) = Signature::from_slice(witness.as_bytes()) else {
            return false;
        };
        let key = PublicKey(*originator.as_bytes());
        verify_signature(payload, &signature, &key)
    }

    fn is_trust_anchor(&self, account: &AccountId) -> bool {
        account == &self.trust_anchor
    }
}
