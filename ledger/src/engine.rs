//! The ledger engine — operation dispatch and state-transition rules.
//!
//! One invocation = one [`Operation`] + one [`Witness`] → authorization →
//! precondition checks → grouped store writes → one [`Outcome`]. Every
//! operation computes all of its new values against staged state before a
//! single write is issued, so success is never returned after a partial
//! write; the host's transaction boundary provides the rest of the
//! atomicity guarantee.

use crate::error::LedgerError;
use crate::op::{Operation, Outcome};
use crate::schema::{allowance_key, balance_key};
use florin_crypto::AuthorityGate;
use florin_store::KvStore;
use florin_types::{AccountId, Amount, Witness};
use tracing::{debug, warn};

/// Immutable configuration injected at engine construction.
///
/// The trust anchor and supply are configuration, not compiled-in
/// constants, so tests can substitute their own anchor identity.
#[derive(Clone, Debug)]
pub struct LedgerConfig {
    /// The single account permitted to perform issuance.
    pub trust_anchor: AccountId,
    /// The fixed supply established at issuance.
    pub total_supply: Amount,
}

impl LedgerConfig {
    /// Supply of the standard deployment: 10 000 whole units.
    pub const STANDARD_SUPPLY: Amount = Amount::new(10_000);

    pub fn new(trust_anchor: AccountId, total_supply: Amount) -> Self {
        Self {
            trust_anchor,
            total_supply,
        }
    }

    /// The standard configuration with the given anchor.
    pub fn standard(trust_anchor: AccountId) -> Self {
        Self::new(trust_anchor, Self::STANDARD_SUPPLY)
    }
}

/// Writes accumulated by one operation, applied all-or-none.
///
/// Reads go through the staged view so that a debit followed by a credit of
/// the same key (a self-transfer) composes correctly instead of the second
/// write clobbering the first.
#[derive(Default)]
struct StagedWrites {
    entries: Vec<(Vec<u8>, Vec<u8>)>,
}

impl StagedWrites {
    fn new() -> Self {
        Self::default()
    }

    fn get(&self, key: &[u8]) -> Option<&[u8]> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_slice())
    }

    fn put(&mut self, key: Vec<u8>, value: Vec<u8>) {
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    fn entries(&self) -> &[(Vec<u8>, Vec<u8>)] {
        &self.entries
    }
}

/// The operation dispatcher and business logic.
pub struct LedgerEngine<S, G> {
    store: S,
    gate: G,
    config: LedgerConfig,
}

impl<S: KvStore, G: AuthorityGate> LedgerEngine<S, G> {
    pub fn new(store: S, gate: G, config: LedgerConfig) -> Self {
        Self {
            store,
            gate,
            config,
        }
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// The underlying store, e.g. for host inspection between invocations.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Execute one operation.
    ///
    /// Mutating operations pass the authorization gate first; a gate
    /// rejection fails with [`LedgerError::Unauthorized`] before any store
    /// access. Queries ignore the witness.
    pub fn execute(&self, op: &Operation, witness: &Witness) -> Result<Outcome, LedgerError> {
        self.authorize(op, witness)?;

        match op {
            Operation::Issue { originator } => self.issue(originator),
            Operation::TotalSupply => Ok(Outcome::Amount(self.config.total_supply)),
            Operation::BalanceOf { account } => {
                let balance = self.read_amount(&balance_key(account))?;
                Ok(Outcome::Amount(balance))
            }
            Operation::Transfer {
                originator,
                to,
                amount,
            } => self.transfer(originator, to, *amount),
            Operation::TransferFrom {
                originator,
                from,
                to,
                amount,
            } => self.transfer_from(originator, from, to, *amount),
            Operation::Approve {
                originator,
                spender,
                amount,
            } => self.approve(originator, spender, *amount),
            Operation::Allowance { owner, spender } => {
                let allowance = self.read_amount(&allowance_key(owner, spender))?;
                Ok(Outcome::Amount(allowance))
            }
        }
    }

    fn authorize(&self, op: &Operation, witness: &Witness) -> Result<(), LedgerError> {
        let Some(originator) = op.originator() else {
            return Ok(());
        };
        let payload = op
            .canonical_bytes()
            .map_err(|e| LedgerError::Encoding(e.to_string()))?;
        if !self.gate.verify(originator, &payload, witness) {
            warn!(op = op.name(), originator = %originator, "witness rejected");
            return Err(LedgerError::Unauthorized);
        }
        Ok(())
    }

    /// Issuance: write the fixed supply into the anchor's balance entry.
    ///
    /// Hardened against re-issuance: if the anchor's balance entry exists —
    /// even with value zero — issuance already happened and running it again
    /// would duplicate supply.
    fn issue(&self, originator: &AccountId) -> Result<Outcome, LedgerError> {
        if !self.gate.is_trust_anchor(originator) {
            warn!(originator = %originator, "issuance attempted by non-anchor");
            return Err(LedgerError::Forbidden);
        }
        let key = balance_key(originator);
        if self.store.get(&key)?.is_some() {
            debug!("issuance refused: supply already issued");
            return Err(LedgerError::AlreadyIssued);
        }
        self.store.put(&key, &self.config.total_supply.encode())?;
        debug!(supply = %self.config.total_supply, "supply issued to trust anchor");
        Ok(Outcome::Accepted)
    }

    fn transfer(
        &self,
        originator: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> Result<Outcome, LedgerError> {
        let mut staged = StagedWrites::new();

        let from_key = balance_key(originator);
        let available = self.staged_amount(&staged, &from_key)?;
        if amount.is_zero() || available < amount {
            debug!(
                op = "transfer",
                requested = %amount,
                available = %available,
                "insufficient funds"
            );
            return Err(LedgerError::InsufficientFunds {
                requested: amount.raw(),
                available: available.raw(),
            });
        }
        self.debit(&mut staged, &from_key, amount)?;
        self.credit(&mut staged, &balance_key(to), amount)?;

        self.store.put_many(staged.entries())?;
        debug!(from = %originator, to = %to, amount = %amount, "transfer applied");
        Ok(Outcome::Accepted)
    }

    /// Delegated transfer. The originator is the spender, not the account
    /// funds move from. Allowance is checked before balance.
    fn transfer_from(
        &self,
        originator: &AccountId,
        from: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> Result<Outcome, LedgerError> {
        let mut staged = StagedWrites::new();

        let allow_key = allowance_key(from, originator);
        let allowed = self.staged_amount(&staged, &allow_key)?;
        if allowed < amount {
            debug!(
                op = "transfer_from",
                requested = %amount,
                allowed = %allowed,
                "insufficient allowance"
            );
            return Err(LedgerError::InsufficientAllowance {
                requested: amount.raw(),
                available: allowed.raw(),
            });
        }

        let from_key = balance_key(from);
        let available = self.staged_amount(&staged, &from_key)?;
        if amount.is_zero() || available < amount {
            debug!(
                op = "transfer_from",
                requested = %amount,
                available = %available,
                "insufficient funds"
            );
            return Err(LedgerError::InsufficientFunds {
                requested: amount.raw(),
                available: available.raw(),
            });
        }

        self.debit(&mut staged, &allow_key, amount)?;
        self.debit(&mut staged, &from_key, amount)?;
        self.credit(&mut staged, &balance_key(to), amount)?;

        self.store.put_many(staged.entries())?;
        debug!(
            spender = %originator,
            from = %from,
            to = %to,
            amount = %amount,
            "delegated transfer applied"
        );
        Ok(Outcome::Accepted)
    }

    /// Approve is a set, not an add: the prior allowance is never read.
    fn approve(
        &self,
        originator: &AccountId,
        spender: &AccountId,
        amount: Amount,
    ) -> Result<Outcome, LedgerError> {
        let key = allowance_key(originator, spender);
        self.store.put(&key, &amount.encode())?;
        debug!(owner = %originator, spender = %spender, amount = %amount, "allowance set");
        Ok(Outcome::Accepted)
    }

    /// Decode an amount entry straight from the store; absent ⇒ zero.
    fn read_amount(&self, key: &[u8]) -> Result<Amount, LedgerError> {
        let stored = self.store.get(key)?;
        Ok(Amount::decode_stored(stored.as_deref())?)
    }

    /// Decode an amount through the staged view, falling back to the store.
    fn staged_amount(&self, staged: &StagedWrites, key: &[u8]) -> Result<Amount, LedgerError> {
        match staged.get(key) {
            Some(bytes) => Ok(Amount::decode(bytes)?),
            None => self.read_amount(key),
        }
    }

    fn debit(
        &self,
        staged: &mut StagedWrites,
        key: &[u8],
        amount: Amount,
    ) -> Result<(), LedgerError> {
        let current = self.staged_amount(staged, key)?;
        // Preconditions already established sufficiency; underflow here
        // would be an internal bookkeeping fault.
        let updated = current.checked_sub(amount).ok_or(LedgerError::Overflow)?;
        staged.put(key.to_vec(), updated.encode().to_vec());
        Ok(())
    }

    fn credit(
        &self,
        staged: &mut StagedWrites,
        key: &[u8],
        amount: Amount,
    ) -> Result<(), LedgerError> {
        let current = self.staged_amount(staged, key)?;
        let updated = current.checked_add(amount).ok_or(LedgerError::Overflow)?;
        staged.put(key.to_vec(), updated.encode().to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use florin_crypto::{keypair_from_seed, sign_message, Ed25519Gate};
    use florin_nullables::NullKvStore;
    use florin_types::PrivateKey;

    struct Actor {
        id: AccountId,
        key: PrivateKey,
    }

    fn actor(seed: u8) -> Actor {
        let pair = keypair_from_seed(&[seed; 32]);
        Actor {
            id: AccountId::from(pair.public),
            key: pair.private,
        }
    }

    fn signed(op: &Operation, key: &PrivateKey) -> Witness {
        Witness::from(sign_message(&op.canonical_bytes().unwrap(), key))
    }

    fn engine_with_anchor(anchor: &Actor) -> LedgerEngine<NullKvStore, Ed25519Gate> {
        LedgerEngine::new(
            NullKvStore::new(),
            Ed25519Gate::new(anchor.id),
            LedgerConfig::standard(anchor.id),
        )
    }

    /// Issue, then sanity-check the anchor's opening balance.
    fn issued_engine(anchor: &Actor) -> LedgerEngine<NullKvStore, Ed25519Gate> {
        let engine = engine_with_anchor(anchor);
        let op = Operation::Issue {
            originator: anchor.id,
        };
        engine.execute(&op, &signed(&op, &anchor.key)).unwrap();
        assert_eq!(balance(&engine, &anchor.id), Amount::new(10_000));
        engine
    }

    fn balance(engine: &LedgerEngine<NullKvStore, Ed25519Gate>, account: &AccountId) -> Amount {
        match engine
            .execute(&Operation::BalanceOf { account: *account }, &Witness::empty())
            .unwrap()
        {
            Outcome::Amount(a) => a,
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    fn allowance(
        engine: &LedgerEngine<NullKvStore, Ed25519Gate>,
        owner: &AccountId,
        spender: &AccountId,
    ) -> Amount {
        match engine
            .execute(
                &Operation::Allowance {
                    owner: *owner,
                    spender: *spender,
                },
                &Witness::empty(),
            )
            .unwrap()
        {
            Outcome::Amount(a) => a,
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn issue_by_anchor_establishes_supply() {
        let anchor = actor(1);
        let engine = issued_engine(&anchor);
        assert_eq!(engine.store().entry_count(), 1);
    }

    #[test]
    fn issue_by_non_anchor_is_forbidden() {
        let anchor = actor(1);
        let intruder = actor(2);
        let engine = engine_with_anchor(&anchor);
        let op = Operation::Issue {
            originator: intruder.id,
        };
        let err = engine.execute(&op, &signed(&op, &intruder.key)).unwrap_err();
        assert!(matches!(err, LedgerError::Forbidden));
        assert_eq!(engine.store().entry_count(), 0);
    }

    #[test]
    fn reissue_fails_and_preserves_supply() {
        let anchor = actor(1);
        let engine = issued_engine(&anchor);
        let op = Operation::Issue {
            originator: anchor.id,
        };
        let err = engine.execute(&op, &signed(&op, &anchor.key)).unwrap_err();
        assert!(matches!(err, LedgerError::AlreadyIssued));
        assert_eq!(balance(&engine, &anchor.id), Amount::new(10_000));
    }

    #[test]
    fn reissue_fails_even_after_anchor_drained_to_zero() {
        let anchor = actor(1);
        let other = actor(2);
        let engine = issued_engine(&anchor);
        let op = Operation::Transfer {
            originator: anchor.id,
            to: other.id,
            amount: Amount::new(10_000),
        };
        engine.execute(&op, &signed(&op, &anchor.key)).unwrap();
        assert_eq!(balance(&engine, &anchor.id), Amount::ZERO);

        // The zero-valued entry still counts as issued.
        let op = Operation::Issue {
            originator: anchor.id,
        };
        let err = engine.execute(&op, &signed(&op, &anchor.key)).unwrap_err();
        assert!(matches!(err, LedgerError::AlreadyIssued));
        assert_eq!(balance(&engine, &anchor.id), Amount::ZERO);
    }

    #[test]
    fn total_supply_needs_no_witness() {
        let anchor = actor(1);
        let engine = engine_with_anchor(&anchor);
        let outcome = engine
            .execute(&Operation::TotalSupply, &Witness::empty())
            .unwrap();
        assert_eq!(outcome, Outcome::Amount(Amount::new(10_000)));
    }

    #[test]
    fn unknown_account_reads_zero() {
        let anchor = actor(1);
        let engine = engine_with_anchor(&anchor);
        let stranger = actor(9);
        assert_eq!(balance(&engine, &stranger.id), Amount::ZERO);
        assert_eq!(allowance(&engine, &stranger.id, &anchor.id), Amount::ZERO);
    }

    #[test]
    fn transfer_moves_funds_and_conserves_supply() {
        let anchor = actor(1);
        let bob = actor(2);
        let engine = issued_engine(&anchor);
        let op = Operation::Transfer {
            originator: anchor.id,
            to: bob.id,
            amount: Amount::new(2_500),
        };
        engine.execute(&op, &signed(&op, &anchor.key)).unwrap();
        assert_eq!(balance(&engine, &anchor.id), Amount::new(7_500));
        assert_eq!(balance(&engine, &bob.id), Amount::new(2_500));
    }

    #[test]
    fn transfer_with_forged_witness_is_unauthorized() {
        let anchor = actor(1);
        let bob = actor(2);
        let engine = issued_engine(&anchor);
        let op = Operation::Transfer {
            originator: anchor.id,
            to: bob.id,
            amount: Amount::new(1),
        };
        // Signed by bob, claiming to originate from the anchor.
        let err = engine.execute(&op, &signed(&op, &bob.key)).unwrap_err();
        assert!(matches!(err, LedgerError::Unauthorized));
        assert_eq!(balance(&engine, &anchor.id), Amount::new(10_000));
        assert_eq!(balance(&engine, &bob.id), Amount::ZERO);
    }

    #[test]
    fn witness_does_not_transfer_to_a_different_operation() {
        let anchor = actor(1);
        let bob = actor(2);
        let engine = issued_engine(&anchor);
        let small = Operation::Transfer {
            originator: anchor.id,
            to: bob.id,
            amount: Amount::new(1),
        };
        let large = Operation::Transfer {
            originator: anchor.id,
            to: bob.id,
            amount: Amount::new(9_999),
        };
        // A witness over the small transfer must not authorize the large one.
        let err = engine
            .execute(&large, &signed(&small, &anchor.key))
            .unwrap_err();
        assert!(matches!(err, LedgerError::Unauthorized));
        assert_eq!(balance(&engine, &bob.id), Amount::ZERO);
    }

    #[test]
    fn transfer_exceeding_balance_leaves_state_unchanged() {
        let anchor = actor(1);
        let bob = actor(2);
        let engine = issued_engine(&anchor);
        let op = Operation::Transfer {
            originator: anchor.id,
            to: bob.id,
            amount: Amount::new(10_001),
        };
        let err = engine.execute(&op, &signed(&op, &anchor.key)).unwrap_err();
        assert!(matches!(
            err,
            LedgerError::InsufficientFunds {
                requested: 10_001,
                available: 10_000
            }
        ));
        assert_eq!(balance(&engine, &anchor.id), Amount::new(10_000));
        assert_eq!(balance(&engine, &bob.id), Amount::ZERO);
    }

    #[test]
    fn zero_transfer_is_rejected() {
        let anchor = actor(1);
        let bob = actor(2);
        let engine = issued_engine(&anchor);
        let op = Operation::Transfer {
            originator: anchor.id,
            to: bob.id,
            amount: Amount::ZERO,
        };
        let err = engine.execute(&op, &signed(&op, &anchor.key)).unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientFunds { .. }));
        assert_eq!(balance(&engine, &anchor.id), Amount::new(10_000));
    }

    #[test]
    fn self_transfer_succeeds_with_zero_net_effect() {
        let anchor = actor(1);
        let engine = issued_engine(&anchor);
        let op = Operation::Transfer {
            originator: anchor.id,
            to: anchor.id,
            amount: Amount::new(4_000),
        };
        engine.execute(&op, &signed(&op, &anchor.key)).unwrap();
        assert_eq!(balance(&engine, &anchor.id), Amount::new(10_000));
    }

    #[test]
    fn approve_overwrites_rather_than_adds() {
        let anchor = actor(1);
        let bob = actor(2);
        let engine = issued_engine(&anchor);
        for amount in [5u64, 2] {
            let op = Operation::Approve {
                originator: anchor.id,
                spender: bob.id,
                amount: Amount::new(amount),
            };
            engine.execute(&op, &signed(&op, &anchor.key)).unwrap();
        }
        assert_eq!(allowance(&engine, &anchor.id, &bob.id), Amount::new(2));
    }

    #[test]
    fn approve_zero_revokes() {
        let anchor = actor(1);
        let bob = actor(2);
        let engine = issued_engine(&anchor);
        for amount in [500u64, 0] {
            let op = Operation::Approve {
                originator: anchor.id,
                spender: bob.id,
                amount: Amount::new(amount),
            };
            engine.execute(&op, &signed(&op, &anchor.key)).unwrap();
        }
        assert_eq!(allowance(&engine, &anchor.id, &bob.id), Amount::ZERO);
    }

    #[test]
    fn transfer_from_spends_allowance_exactly_once() {
        let anchor = actor(1); // owner A with balance 100 (after funding)
        let bob = actor(2); // spender B
        let carol = actor(3); // recipient C
        let engine = issued_engine(&anchor);

        let approve = Operation::Approve {
            originator: anchor.id,
            spender: bob.id,
            amount: Amount::new(30),
        };
        engine
            .execute(&approve, &signed(&approve, &anchor.key))
            .unwrap();

        let op = Operation::TransferFrom {
            originator: bob.id,
            from: anchor.id,
            to: carol.id,
            amount: Amount::new(30),
        };
        engine.execute(&op, &signed(&op, &bob.key)).unwrap();

        assert_eq!(balance(&engine, &anchor.id), Amount::new(9_970));
        assert_eq!(balance(&engine, &carol.id), Amount::new(30));
        assert_eq!(allowance(&engine, &anchor.id, &bob.id), Amount::ZERO);

        // The identical second call must fail on the spent allowance.
        let err = engine.execute(&op, &signed(&op, &bob.key)).unwrap_err();
        assert!(matches!(
            err,
            LedgerError::InsufficientAllowance {
                requested: 30,
                available: 0
            }
        ));
        assert_eq!(balance(&engine, &carol.id), Amount::new(30));
    }

    #[test]
    fn transfer_from_checks_allowance_before_balance() {
        let anchor = actor(1);
        let bob = actor(2);
        let carol = actor(3);
        let engine = issued_engine(&anchor);
        // No approval ever made: allowance failure even though funds exist.
        let op = Operation::TransferFrom {
            originator: bob.id,
            from: anchor.id,
            to: carol.id,
            amount: Amount::new(10),
        };
        let err = engine.execute(&op, &signed(&op, &bob.key)).unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientAllowance { .. }));
    }

    #[test]
    fn transfer_from_with_low_balance_leaves_allowance_intact() {
        let anchor = actor(1);
        let poor = actor(4);
        let bob = actor(2);
        let carol = actor(3);
        let engine = issued_engine(&anchor);

        // `poor` has no funds but approves generously.
        let approve = Operation::Approve {
            originator: poor.id,
            spender: bob.id,
            amount: Amount::new(1_000),
        };
        engine
            .execute(&approve, &signed(&approve, &poor.key))
            .unwrap();

        let op = Operation::TransferFrom {
            originator: bob.id,
            from: poor.id,
            to: carol.id,
            amount: Amount::new(500),
        };
        let err = engine.execute(&op, &signed(&op, &bob.key)).unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientFunds { .. }));
        // All-or-none: the allowance was not partially spent.
        assert_eq!(allowance(&engine, &poor.id, &bob.id), Amount::new(1_000));
        assert_eq!(balance(&engine, &carol.id), Amount::ZERO);
    }

    #[test]
    fn zero_transfer_from_is_rejected() {
        let anchor = actor(1);
        let bob = actor(2);
        let engine = issued_engine(&anchor);
        let approve = Operation::Approve {
            originator: anchor.id,
            spender: bob.id,
            amount: Amount::new(10),
        };
        engine
            .execute(&approve, &signed(&approve, &anchor.key))
            .unwrap();
        let op = Operation::TransferFrom {
            originator: bob.id,
            from: anchor.id,
            to: bob.id,
            amount: Amount::ZERO,
        };
        let err = engine.execute(&op, &signed(&op, &bob.key)).unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientFunds { .. }));
        assert_eq!(allowance(&engine, &anchor.id, &bob.id), Amount::new(10));
    }

    #[test]
    fn transfer_from_back_to_owner_only_spends_allowance() {
        let anchor = actor(1);
        let bob = actor(2);
        let engine = issued_engine(&anchor);
        let approve = Operation::Approve {
            originator: anchor.id,
            spender: bob.id,
            amount: Amount::new(40),
        };
        engine
            .execute(&approve, &signed(&approve, &anchor.key))
            .unwrap();
        // from == to: debit and credit cancel, allowance is still consumed.
        let op = Operation::TransferFrom {
            originator: bob.id,
            from: anchor.id,
            to: anchor.id,
            amount: Amount::new(40),
        };
        engine.execute(&op, &signed(&op, &bob.key)).unwrap();
        assert_eq!(balance(&engine, &anchor.id), Amount::new(10_000));
        assert_eq!(allowance(&engine, &anchor.id, &bob.id), Amount::ZERO);
    }

    #[test]
    fn corrupt_stored_balance_surfaces_as_malformed_amount() {
        let anchor = actor(1);
        let engine = engine_with_anchor(&anchor);
        engine
            .store()
            .put(&balance_key(&anchor.id), &[1, 2, 3])
            .unwrap();
        let err = engine
            .execute(
                &Operation::BalanceOf {
                    account: anchor.id,
                },
                &Witness::empty(),
            )
            .unwrap_err();
        assert!(matches!(err, LedgerError::MalformedAmount(_)));
        assert!(!err.is_rejection());
    }
}
