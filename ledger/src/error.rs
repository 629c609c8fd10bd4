use florin_store::StoreError;
use florin_types::AmountError;
use thiserror::Error;

/// Every way a ledger operation can fail.
///
/// The taxonomy splits in two: *rejections* are ordinary business failures
/// the host reports to its caller as a falsy sentinel, while the remaining
/// variants are internal faults (corrupt stored bytes, backend failure)
/// that must surface instead of being swallowed.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The authorization gate rejected the witness for the claimed
    /// originator.
    #[error("witness does not authorize the claimed originator")]
    Unauthorized,

    /// A non-anchor account attempted a privileged operation.
    #[error("operation is restricted to the trust anchor")]
    Forbidden,

    /// Supply was already issued; re-issuance would duplicate it.
    #[error("supply has already been issued")]
    AlreadyIssued,

    #[error("insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds { requested: u64, available: u64 },

    #[error("insufficient allowance: requested {requested}, available {available}")]
    InsufficientAllowance { requested: u64, available: u64 },

    /// A host-supplied amount was rejected at the boundary conversion.
    #[error("invalid amount: {0}")]
    InvalidAmount(AmountError),

    /// A stored entry failed to decode. Prior data corruption, not a
    /// recoverable business failure.
    #[error("malformed stored amount: {0}")]
    MalformedAmount(AmountError),

    /// A credit would exceed the representable range. Cannot occur while
    /// the conservation invariant holds.
    #[error("amount arithmetic overflowed")]
    Overflow,

    /// The canonical operation encoding failed.
    #[error("operation encoding failed: {0}")]
    Encoding(String),

    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

impl From<AmountError> for LedgerError {
    fn from(err: AmountError) -> Self {
        match err {
            AmountError::Malformed { .. } => Self::MalformedAmount(err),
            AmountError::Negative(_) | AmountError::OutOfRange(_) => Self::InvalidAmount(err),
        }
    }
}

impl LedgerError {
    /// Is this an ordinary business rejection (as opposed to an internal
    /// fault)? Rejections map to the host's falsy result sentinel; faults
    /// propagate.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::Unauthorized
                | Self::Forbidden
                | Self::AlreadyIssued
                | Self::InsufficientFunds { .. }
                | Self::InsufficientAllowance { .. }
                | Self::InvalidAmount(_)
        )
    }
}
