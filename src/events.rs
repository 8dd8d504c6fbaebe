multiversx_sc::imports!();

use crate::types::{GovernanceConfig, LedgerKind};

#[multiversx_sc::module]
pub trait EventsModule {
    // ── Ledger ──

    #[event("transfer")]
    fn transfer_event(
        &self,
        #[indexed] ledger: LedgerKind,
        #[indexed] from: &ManagedAddress,
        #[indexed] to: &ManagedAddress,
        amount: &BigUint,
    );

    #[event("approval")]
    fn approval_event(
        &self,
        #[indexed] ledger: LedgerKind,
        #[indexed] owner: &ManagedAddress,
        #[indexed] spender: &ManagedAddress,
        amount: &BigUint,
    );

    #[event("delegateChanged")]
    fn delegate_changed_event(
        &self,
        #[indexed] delegator: &ManagedAddress,
        #[indexed] from_delegate: &ManagedAddress,
        to_delegate: &ManagedAddress,
    );

    #[event("delegateVotesChanged")]
    fn delegate_votes_changed_event(
        &self,
        #[indexed] delegate: &ManagedAddress,
        #[indexed] previous_votes: &BigUint,
        new_votes: &BigUint,
    );

    // ── Permissions & configuration ──

    #[event("shamanSet")]
    fn shaman_set_event(&self, #[indexed] shaman: &ManagedAddress, permission: u8);

    #[event("lockCapability")]
    fn lock_capability_event(&self, capability: u8);

    #[event("governanceConfig")]
    fn governance_config_event(&self, config: &GovernanceConfig<Self::Api>);

    #[event("adminConfig")]
    fn admin_config_event(&self, #[indexed] shares_paused: bool, loot_paused: bool);

    #[event("trustedForwarderSet")]
    fn trusted_forwarder_set_event(&self, forwarder: &ManagedAddress);

    // ── Proposals ──

    #[event("submitProposal")]
    fn submit_proposal_event(
        &self,
        #[indexed] proposal_id: u64,
        #[indexed] submitter: &ManagedAddress,
        #[indexed] action_hash: &ManagedByteArray<Self::Api, 32>,
        #[indexed] expiration: u64,
        #[indexed] self_sponsored: bool,
        details: &ManagedBuffer,
    );

    #[event("sponsorProposal")]
    fn sponsor_proposal_event(
        &self,
        #[indexed] proposal_id: u64,
        #[indexed] sponsor: &ManagedAddress,
        voting_starts: u64,
    );

    #[event("submitVote")]
    fn submit_vote_event(
        &self,
        #[indexed] proposal_id: u64,
        #[indexed] voter: &ManagedAddress,
        #[indexed] approved: bool,
        weight: &BigUint,
    );

    #[event("cancelProposal")]
    fn cancel_proposal_event(&self, #[indexed] proposal_id: u64, canceller: &ManagedAddress);

    #[event("processProposal")]
    fn process_proposal_event(&self, #[indexed] proposal_id: u64, passed: bool);

    #[event("proposalExecuted")]
    fn proposal_executed_event(&self, #[indexed] proposal_id: u64);

    #[event("proposalActionFailed")]
    fn proposal_action_failed_event(&self, #[indexed] proposal_id: u64, err_code: u32);

    // ── Treasury ──

    #[event("ragequit")]
    fn ragequit_event(
        &self,
        #[indexed] member: &ManagedAddress,
        #[indexed] to: &ManagedAddress,
        #[indexed] shares_burned: &BigUint,
        loot_burned: &BigUint,
    );

    #[event("ragequitPayout")]
    fn ragequit_payout_event(
        &self,
        #[indexed] to: &ManagedAddress,
        #[indexed] token: &EgldOrEsdtTokenIdentifier,
        amount: &BigUint,
    );

    #[event("treasuryFunded")]
    fn treasury_funded_event(
        &self,
        #[indexed] from: &ManagedAddress,
        #[indexed] token: &EgldOrEsdtTokenIdentifier,
        amount: &BigUint,
    );
}
