multiversx_sc::imports!();

use crate::errors::*;
use crate::types::{Checkpoint, LedgerKind, CAPABILITY_MANAGER};

/// Shares and loot balances, plus the checkpointed voting power of shares.
///
/// Voting power belongs to the delegate of a holder, never to the holder
/// directly. Holders delegate to themselves the first time they receive
/// shares, unless they already chose someone else.
#[multiversx_sc::module]
pub trait LedgerModule:
    crate::config::ConfigModule
    + crate::permissions::PermissionsModule
    + crate::signatures::SignaturesModule
    + crate::events::EventsModule
{
    // ========================================================
    // ENDPOINTS: holders
    // ========================================================

    #[endpoint(transfer)]
    fn transfer(&self, ledger: LedgerKind, to: ManagedAddress, amount: BigUint) {
        let caller = self.blockchain().get_caller();
        require!(!self.paused(ledger).get(), ERR_TRANSFER_PAUSED);
        self.move_balance(ledger, &caller, &to, &amount);
    }

    /// Overwrites any previous allowance.
    #[endpoint(approve)]
    fn approve(&self, ledger: LedgerKind, spender: ManagedAddress, amount: BigUint) {
        let caller = self.blockchain().get_caller();
        self.allowance(ledger, &caller, &spender).set(&amount);
        self.approval_event(ledger, &caller, &spender, &amount);
    }

    #[endpoint(transferFrom)]
    fn transfer_from(
        &self,
        ledger: LedgerKind,
        from: ManagedAddress,
        to: ManagedAddress,
        amount: BigUint,
    ) {
        let spender = self.blockchain().get_caller();
        require!(!self.paused(ledger).get(), ERR_TRANSFER_PAUSED);

        let allowance_mapper = self.allowance(ledger, &from, &spender);
        let allowance = allowance_mapper.get();
        require!(allowance >= amount, ERR_INSUFFICIENT_APPROVAL);
        allowance_mapper.set(&(allowance - &amount));

        self.move_balance(ledger, &from, &to, &amount);
    }

    #[endpoint(delegate)]
    fn delegate(&self, delegatee: ManagedAddress) {
        let caller = self.blockchain().get_caller();
        self.delegate_votes(&caller, &delegatee);
    }

    #[endpoint(delegateBySig)]
    fn delegate_by_sig(
        &self,
        delegator: ManagedAddress,
        delegatee: ManagedAddress,
        nonce: u64,
        expiry: u64,
        signature: ManagedBuffer,
    ) {
        let mut fields = ManagedBuffer::new();
        fields.append(delegatee.as_managed_buffer());
        self.consume_signature(&delegator, b"delegate", &fields, nonce, expiry, &signature);

        self.delegate_votes(&delegator, &delegatee);
    }

    // ========================================================
    // ENDPOINTS: system or manager
    // ========================================================

    #[endpoint(mintShares)]
    fn mint_shares(&self, to: ManagedVec<ManagedAddress>, amounts: ManagedVec<BigUint>) {
        self.require_system_or(CAPABILITY_MANAGER);
        self.mint_batch(LedgerKind::Shares, &to, &amounts);
    }

    #[endpoint(burnShares)]
    fn burn_shares(&self, from: ManagedVec<ManagedAddress>, amounts: ManagedVec<BigUint>) {
        self.require_system_or(CAPABILITY_MANAGER);
        self.burn_batch(LedgerKind::Shares, &from, &amounts);
    }

    #[endpoint(mintLoot)]
    fn mint_loot(&self, to: ManagedVec<ManagedAddress>, amounts: ManagedVec<BigUint>) {
        self.require_system_or(CAPABILITY_MANAGER);
        self.mint_batch(LedgerKind::Loot, &to, &amounts);
    }

    #[endpoint(burnLoot)]
    fn burn_loot(&self, from: ManagedVec<ManagedAddress>, amounts: ManagedVec<BigUint>) {
        self.require_system_or(CAPABILITY_MANAGER);
        self.burn_batch(LedgerKind::Loot, &from, &amounts);
    }

    // ========================================================
    // INTERNAL: balances
    // ========================================================

    fn mint_batch(
        &self,
        ledger: LedgerKind,
        holders: &ManagedVec<ManagedAddress>,
        amounts: &ManagedVec<BigUint>,
    ) {
        require!(holders.len() == amounts.len(), ERR_ARRAY_LENGTH_MISMATCH);
        for (holder, amount) in holders.iter().zip(amounts.iter()) {
            self.mint(ledger, &holder, &amount);
        }
    }

    fn burn_batch(
        &self,
        ledger: LedgerKind,
        holders: &ManagedVec<ManagedAddress>,
        amounts: &ManagedVec<BigUint>,
    ) {
        require!(holders.len() == amounts.len(), ERR_ARRAY_LENGTH_MISMATCH);
        for (holder, amount) in holders.iter().zip(amounts.iter()) {
            self.burn(ledger, &holder, &amount);
        }
    }

    fn mint(&self, ledger: LedgerKind, holder: &ManagedAddress, amount: &BigUint) {
        if *amount == 0u64 {
            return;
        }
        if ledger == LedgerKind::Shares {
            self.auto_delegate(holder);
        }

        self.balance(ledger, holder).update(|b| *b += amount);
        self.total_supply(ledger).update(|ts| *ts += amount);

        if ledger == LedgerKind::Shares {
            let delegatee = self.delegates(holder).get();
            self.move_votes(None, Some(&delegatee), amount);
        }
        self.transfer_event(ledger, &ManagedAddress::zero(), holder, amount);
    }

    fn burn(&self, ledger: LedgerKind, holder: &ManagedAddress, amount: &BigUint) {
        if *amount == 0u64 {
            return;
        }
        let balance_mapper = self.balance(ledger, holder);
        let balance = balance_mapper.get();
        require!(balance >= *amount, ERR_INSUFFICIENT_BALANCE);

        balance_mapper.set(&(balance - amount));
        self.total_supply(ledger).update(|ts| *ts -= amount);

        if ledger == LedgerKind::Shares {
            let delegatee = self.delegate_of(holder);
            self.move_votes(delegatee.as_ref(), None, amount);
        }
        self.transfer_event(ledger, holder, &ManagedAddress::zero(), amount);
    }

    fn move_balance(
        &self,
        ledger: LedgerKind,
        from: &ManagedAddress,
        to: &ManagedAddress,
        amount: &BigUint,
    ) {
        if *amount == 0u64 {
            return;
        }
        let from_mapper = self.balance(ledger, from);
        let from_balance = from_mapper.get();
        require!(from_balance >= *amount, ERR_INSUFFICIENT_BALANCE);

        if from != to {
            if ledger == LedgerKind::Shares {
                self.auto_delegate(to);
            }
            from_mapper.set(&(from_balance - amount));
            self.balance(ledger, to).update(|b| *b += amount);

            if ledger == LedgerKind::Shares {
                let from_delegate = self.delegate_of(from);
                let to_delegate = self.delegate_of(to);
                self.move_votes(from_delegate.as_ref(), to_delegate.as_ref(), amount);
            }
        }
        self.transfer_event(ledger, from, to, amount);
    }

    // ========================================================
    // INTERNAL: delegation & checkpoints
    // ========================================================

    fn auto_delegate(&self, holder: &ManagedAddress) {
        if self.delegates(holder).is_empty() {
            self.delegate_votes(holder, holder);
        }
    }

    fn delegate_of(&self, holder: &ManagedAddress) -> Option<ManagedAddress> {
        let mapper = self.delegates(holder);
        if mapper.is_empty() {
            None
        } else {
            Some(mapper.get())
        }
    }

    fn delegate_votes(&self, delegator: &ManagedAddress, delegatee: &ManagedAddress) {
        let previous = self.delegate_of(delegator);
        self.delegates(delegator).set(delegatee);

        let weight = self.balance(LedgerKind::Shares, delegator).get();
        self.move_votes(previous.as_ref(), Some(delegatee), &weight);

        let previous_or_zero = previous.unwrap_or_else(ManagedAddress::zero);
        self.delegate_changed_event(delegator, &previous_or_zero, delegatee);
    }

    fn move_votes(
        &self,
        src: Option<&ManagedAddress>,
        dst: Option<&ManagedAddress>,
        amount: &BigUint,
    ) {
        if *amount == 0u64 || src == dst {
            return;
        }
        if let Some(src) = src {
            let previous = self.get_votes(src);
            self.write_checkpoint(src, &previous, &(&previous - amount));
        }
        if let Some(dst) = dst {
            let previous = self.get_votes(dst);
            self.write_checkpoint(dst, &previous, &(&previous + amount));
        }
    }

    /// Updates made within the same block timestamp share one checkpoint.
    fn write_checkpoint(&self, delegatee: &ManagedAddress, previous: &BigUint, votes: &BigUint) {
        let now = self.blockchain().get_block_timestamp();
        let mut checkpoints = self.checkpoints(delegatee);
        let len = checkpoints.len();

        let checkpoint = Checkpoint {
            from_timepoint: now,
            votes: votes.clone(),
        };
        if len > 0 && checkpoints.get(len).from_timepoint == now {
            checkpoints.set(len, &checkpoint);
        } else {
            checkpoints.push(&checkpoint);
        }

        self.delegate_votes_changed_event(delegatee, previous, votes);
    }

    // ========================================================
    // VIEWS
    // ========================================================

    #[view(getVotes)]
    fn get_votes(&self, account: &ManagedAddress) -> BigUint {
        let checkpoints = self.checkpoints(account);
        let len = checkpoints.len();
        if len == 0 {
            return BigUint::zero();
        }
        checkpoints.get(len).votes
    }

    #[view(getPastVotes)]
    fn get_past_votes(&self, account: &ManagedAddress, timepoint: u64) -> BigUint {
        let now = self.blockchain().get_block_timestamp();
        require!(timepoint < now, ERR_NOT_YET_DETERMINED);

        let checkpoints = self.checkpoints(account);
        let len = checkpoints.len();
        if len == 0 {
            return BigUint::zero();
        }

        let latest = checkpoints.get(len);
        if latest.from_timepoint <= timepoint {
            return latest.votes;
        }

        // upper bound: first position whose timepoint is past `timepoint`
        let mut low = 0usize;
        let mut high = len;
        while low < high {
            let mid = (low + high) / 2;
            if checkpoints.get(mid + 1).from_timepoint > timepoint {
                high = mid;
            } else {
                low = mid + 1;
            }
        }

        if high == 0 {
            BigUint::zero()
        } else {
            checkpoints.get(high).votes
        }
    }

    #[view(numCheckpoints)]
    fn num_checkpoints(&self, account: &ManagedAddress) -> usize {
        self.checkpoints(account).len()
    }

    /// `index` is zero-based.
    #[view(getCheckpoint)]
    fn get_checkpoint(&self, account: &ManagedAddress, index: usize) -> Checkpoint<Self::Api> {
        let checkpoints = self.checkpoints(account);
        require!(index < checkpoints.len(), ERR_CHECKPOINT_OUT_OF_RANGE);
        checkpoints.get(index + 1)
    }

    #[view(getTotalSharesAndLoot)]
    fn total_shares_and_loot(&self) -> BigUint {
        self.total_supply(LedgerKind::Shares).get() + self.total_supply(LedgerKind::Loot).get()
    }

    // ========================================================
    // STORAGE
    // ========================================================

    #[view(getBalance)]
    #[storage_mapper("balance")]
    fn balance(&self, ledger: LedgerKind, holder: &ManagedAddress) -> SingleValueMapper<BigUint>;

    #[view(getTotalSupply)]
    #[storage_mapper("totalSupply")]
    fn total_supply(&self, ledger: LedgerKind) -> SingleValueMapper<BigUint>;

    #[view(getAllowance)]
    #[storage_mapper("allowance")]
    fn allowance(
        &self,
        ledger: LedgerKind,
        owner: &ManagedAddress,
        spender: &ManagedAddress,
    ) -> SingleValueMapper<BigUint>;

    #[view(getDelegate)]
    #[storage_mapper("delegates")]
    fn delegates(&self, holder: &ManagedAddress) -> SingleValueMapper<ManagedAddress>;

    #[storage_mapper("checkpoints")]
    fn checkpoints(&self, account: &ManagedAddress) -> VecMapper<Checkpoint<Self::Api>>;
}
