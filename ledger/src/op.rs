//! The closed set of ledger operations.
//!
//! One external call carries exactly one `Operation`. The host resolves its
//! loosely typed calling convention into these variants once, at the
//! boundary; business logic never re-interprets names or positional
//! arguments.

use florin_types::{AccountId, Amount};
use serde::{Deserialize, Serialize};

/// A single invocation of the ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    /// Write the fixed total supply into the trust anchor's balance.
    /// Privileged; permitted once.
    Issue { originator: AccountId },

    /// The fixed supply constant. No store access, cannot fail.
    TotalSupply,

    /// The balance of `account`, zero if it has never been written.
    BalanceOf { account: AccountId },

    /// Move `amount` from the originator's balance to `to`.
    Transfer {
        originator: AccountId,
        to: AccountId,
        amount: Amount,
    },

    /// Delegated transfer: the originator spends from `from`'s balance,
    /// bounded by the allowance `from` previously approved for them.
    TransferFrom {
        originator: AccountId,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    },

    /// Set (not add to) the allowance of `spender` over the originator's
    /// balance.
    Approve {
        originator: AccountId,
        spender: AccountId,
        amount: Amount,
    },

    /// The remaining allowance of `spender` over `owner`'s balance.
    Allowance {
        owner: AccountId,
        spender: AccountId,
    },
}

impl Operation {
    /// The claimed originator, for operations that mutate state.
    /// Queries carry no originator and require no authorization.
    pub fn originator(&self) -> Option<&AccountId> {
        match self {
            Self::Issue { originator } => Some(originator),
            Self::Transfer { originator, .. } => Some(originator),
            Self::TransferFrom { originator, .. } => Some(originator),
            Self::Approve { originator, .. } => Some(originator),
            Self::TotalSupply | Self::BalanceOf { .. } | Self::Allowance { .. } => None,
        }
    }

    /// Does this operation mutate ledger state?
    pub fn is_mutating(&self) -> bool {
        self.originator().is_some()
    }

    /// Operation name for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Issue { .. } => "issue",
            Self::TotalSupply => "total_supply",
            Self::BalanceOf { .. } => "balance_of",
            Self::Transfer { .. } => "transfer",
            Self::TransferFrom { .. } => "transfer_from",
            Self::Approve { .. } => "approve",
            Self::Allowance { .. } => "allowance",
        }
    }

    /// The canonical byte form of this operation — the payload an
    /// authorization witness signs over.
    pub fn canonical_bytes(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }
}

/// What a successful operation reports back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The mutation was applied.
    Accepted,
    /// The queried amount.
    Amount(Amount),
}
