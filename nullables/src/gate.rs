//! Nullable authorization gate with a configurable verdict.

use florin_crypto::AuthorityGate;
use florin_types::{AccountId, Witness};

/// A gate that returns a fixed verdict for every witness, for tests that
/// exercise ledger logic rather than signature checking.
///
/// The trust-anchor comparison stays real: it is injected configuration,
/// not proof verification.
pub struct NullGate {
    trust_anchor: AccountId,
    verdict: bool,
}

impl NullGate {
    /// A gate that accepts every witness.
    pub fn accepting(trust_anchor: AccountId) -> Self {
        Self {
            trust_anchor,
            verdict: true,
        }
    }

    /// A gate that rejects every witness.
    pub fn rejecting(trust_anchor: AccountId) -> Self {
        Self {
            trust_anchor,
            verdict: false,
        }
    }
}

impl AuthorityGate for NullGate {
    fn verify(&self, _originator: &AccountId, _payload: &[u8], _witness: &Witness) -> bool {
        self.verdict
    }

    fn is_trust_anchor(&self, account: &AccountId) -> bool {
        account == &self.trust_anchor
    }
}
