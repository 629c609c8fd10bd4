//! Storage key layout.
//!
//! - balance entry: the 32 account identity bytes, verbatim
//! - allowance entry: owner bytes immediately followed by spender bytes,
//!   64 bytes, no separator
//!
//! `AccountId` is fixed-width, so distinct (owner, spender) pairs can never
//! collide on the concatenated key, and balance keys (32 bytes) can never
//! collide with allowance keys (64 bytes).

use florin_types::AccountId;

/// Store key of an account's balance entry.
pub fn balance_key(account: &AccountId) -> Vec<u8> {
    account.as_bytes().to_vec()
}

/// Store key of the allowance `spender` may move out of `owner`'s balance.
pub fn allowance_key(owner: &AccountId, spender: &AccountId) -> Vec<u8> {
    let mut key = Vec::with_capacity(AccountId::LEN * 2);
    key.extend_from_slice(owner.as_bytes());
    key.extend_from_slice(spender.as_bytes());
    key
}
