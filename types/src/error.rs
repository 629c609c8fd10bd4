//! Error types for the fundamental ledger types.

use thiserror::Error;

/// Failures of the canonical amount codec and its boundary conversion.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmountError {
    /// A stored entry's byte length is inconsistent with the codec layout.
    /// Indicates prior data corruption, not a recoverable business failure.
    #[error("malformed amount entry: expected 8 bytes, found {len}")]
    Malformed { len: usize },

    /// A host-supplied raw amount was negative. The ledger has no negative
    /// balances or allowances.
    #[error("negative amount {0} is not representable")]
    Negative(i128),

    /// A host-supplied raw amount exceeds the representable range.
    #[error("amount {0} exceeds the representable range")]
    OutOfRange(i128),
}

/// Failures constructing fundamental types from raw host bytes.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid account id: expected 32 bytes, found {len}")]
    InvalidAccountId { len: usize },
}
