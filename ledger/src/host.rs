//! Host-facing result adapter.
//!
//! The execution host treats a rejected token operation as an ordinary
//! falsy result, not a fault that should abort its larger unit of work.
//! [`respond`] makes that mapping: business rejections become
//! [`HostReply::Rejected`]; internal faults (corrupt stored bytes, backend
//! failure) propagate as errors.

use crate::engine::LedgerEngine;
use crate::error::LedgerError;
use crate::op::{Operation, Outcome};
use florin_crypto::AuthorityGate;
use florin_store::KvStore;
use florin_types::{Amount, Witness};
use tracing::debug;

/// The single result value returned to the host for one invocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostReply {
    /// The mutation was applied: the truthy sentinel.
    Accepted,
    /// A precondition or authorization check failed: the falsy sentinel.
    Rejected,
    /// A query result.
    Amount(Amount),
}

impl HostReply {
    pub fn is_success(&self) -> bool {
        !matches!(self, Self::Rejected)
    }

    /// The wire form: `[1]` for acceptance, `[0]` for rejection, canonical
    /// amount bytes for queries.
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Self::Accepted => vec![1],
            Self::Rejected => vec![0],
            Self::Amount(amount) => amount.encode().to_vec(),
        }
    }
}

/// Execute one operation and fold business rejections into the host's
/// sentinel result.
pub fn respond<S: KvStore, G: AuthorityGate>(
    engine: &LedgerEngine<S, G>,
    op: &Operation,
    witness: &Witness,
) -> Result<HostReply, LedgerError> {
    match engine.execute(op, witness) {
        Ok(Outcome::Accepted) => Ok(HostReply::Accepted),
        Ok(Outcome::Amount(amount)) => Ok(HostReply::Amount(amount)),
        Err(err) if err.is_rejection() => {
            debug!(op = op.name(), %err, "operation rejected");
            Ok(HostReply::Rejected)
        }
        Err(err) => Err(err),
    }
}
