multiversx_sc::imports!();

use crate::errors::*;
use crate::types::{
    Action, GovernanceConfig, Proposal, ProposalFlags, ProposalState, CAPABILITY_GOVERNANCE,
};

/// Hard ceiling on the gas a proposal may reserve for its action batch.
pub const MAX_GAS_BUDGET: u64 = 500_000_000;
/// Gas kept for the promise callback that records the batch outcome.
pub const CALLBACK_GAS: u64 = 10_000_000;
/// Gas needed to finish `processProposal` after the promise is registered.
pub const GAS_RESERVE: u64 = 5_000_000;

pub const EXECUTE_BATCH_ENDPOINT: &str = "executeBatch";

#[multiversx_sc::module]
pub trait ProposalsModule:
    crate::ledger::LedgerModule
    + crate::config::ConfigModule
    + crate::permissions::PermissionsModule
    + crate::signatures::SignaturesModule
    + crate::events::EventsModule
{
    // ========================================================
    // ENDPOINT: submitProposal
    // Members above the sponsor threshold open voting at once,
    // everyone else attaches the deposit and waits for a sponsor.
    // ========================================================

    #[payable("EGLD")]
    #[endpoint(submitProposal)]
    fn submit_proposal(
        &self,
        expiration: u64,
        gas_budget: u64,
        details: ManagedBuffer,
        actions: ManagedVec<Action<Self::Api>>,
    ) -> u64 {
        let caller = self.blockchain().get_caller();
        let now = self.blockchain().get_block_timestamp();
        let config = self.governance_config().get();

        require!(expiration == 0 || expiration > now, ERR_PROPOSAL_EXPIRED);
        require!(gas_budget > 0, ERR_GAS_BUDGET_ZERO);
        require!(gas_budget <= MAX_GAS_BUDGET, ERR_GAS_BUDGET_TOO_HIGH);

        let self_sponsor = self.get_votes(&caller) >= config.sponsor_threshold;
        if !self_sponsor {
            let payment = self.call_value().egld_value().clone_value();
            require!(
                payment > 0u64 && payment >= config.proposal_deposit,
                ERR_DEPOSIT_REQUIRED
            );
        }

        let proposal_id = self.proposal_count().get() + 1u64;
        let action_hash = self.hash_actions(&actions);
        let mut proposal = Proposal {
            id: proposal_id,
            sponsor: None,
            submitted_at: now,
            voting_starts: 0u64,
            voting_ends: 0u64,
            grace_ends: 0u64,
            expiration,
            gas_budget,
            action_hash,
            yes_votes: BigUint::zero(),
            no_votes: BigUint::zero(),
            max_total_shares_and_loot_at_vote: BigUint::zero(),
            flags: ProposalFlags::default(),
        };
        self.proposal_count().set(proposal_id);

        self.submit_proposal_event(
            proposal_id,
            &caller,
            &proposal.action_hash,
            expiration,
            self_sponsor,
            &details,
        );

        if self_sponsor {
            self.start_voting(&mut proposal, &caller, &config);
        }
        self.proposals(proposal_id).set(&proposal);

        proposal_id
    }

    // ========================================================
    // ENDPOINT: sponsorProposal
    // ========================================================

    #[endpoint(sponsorProposal)]
    fn sponsor_proposal(&self, proposal_id: u64) {
        let caller = self.blockchain().get_caller();
        require!(
            self.get_state(proposal_id) == ProposalState::Submitted,
            ERR_NOT_SUBMITTED
        );

        let config = self.governance_config().get();
        require!(
            self.get_votes(&caller) >= config.sponsor_threshold,
            ERR_BELOW_SPONSOR_THRESHOLD
        );

        let mut proposal = self.proposals(proposal_id).get();
        self.start_voting(&mut proposal, &caller, &config);
        self.proposals(proposal_id).set(&proposal);
    }

    // ========================================================
    // ENDPOINT: submitVote / submitVoteWithSig
    // Weight is the voter's power when voting opened.
    // ========================================================

    #[endpoint(submitVote)]
    fn submit_vote(&self, proposal_id: u64, approved: bool) {
        let caller = self.blockchain().get_caller();
        self.record_vote(&caller, proposal_id, approved);
    }

    #[endpoint(submitVoteWithSig)]
    fn submit_vote_with_sig(
        &self,
        voter: ManagedAddress,
        proposal_id: u64,
        approved: bool,
        nonce: u64,
        expiry: u64,
        signature: ManagedBuffer,
    ) {
        let fields = self.vote_fields(proposal_id, approved);
        self.consume_signature(&voter, b"vote", &fields, nonce, expiry, &signature);

        self.record_vote(&voter, proposal_id, approved);
    }

    // ========================================================
    // ENDPOINT: cancelProposal
    // Governors, the sponsor, or anyone once the sponsor has
    // dropped below the sponsor threshold.
    // ========================================================

    #[endpoint(cancelProposal)]
    fn cancel_proposal(&self, proposal_id: u64) {
        let state = self.get_state(proposal_id);
        require!(
            state == ProposalState::Submitted || state == ProposalState::Voting,
            ERR_NOT_VOTING
        );

        let caller = self.blockchain().get_caller();
        let mut proposal = self.proposals(proposal_id).get();
        let sponsor_threshold = self.governance_config().get().sponsor_threshold;

        let sponsor_allows = match &proposal.sponsor {
            Some(sponsor) => *sponsor == caller || self.get_votes(sponsor) < sponsor_threshold,
            None => false,
        };
        require!(
            self.is_system(&caller)
                || self.has_capability(&caller, CAPABILITY_GOVERNANCE)
                || sponsor_allows,
            ERR_NOT_CANCELLABLE
        );

        proposal.flags.cancelled = true;
        self.proposals(proposal_id).set(&proposal);
        self.cancel_proposal_event(proposal_id, &caller);
    }

    // ========================================================
    // ENDPOINT: processProposal
    // Proposals settle in id order. A failing batch is
    // recorded on the proposal; missing gas aborts the call so it
    // can be retried.
    // ========================================================

    #[endpoint(processProposal)]
    fn process_proposal(&self, proposal_id: u64, actions: ManagedVec<Action<Self::Api>>) {
        require!(
            self.get_state(proposal_id) == ProposalState::Ready,
            ERR_NOT_READY
        );

        let previous_id = proposal_id - 1;
        require!(
            previous_id == 0 || self.get_state(previous_id).is_terminal(),
            ERR_PREVIOUS_NOT_PROCESSED
        );

        let mut proposal = self.proposals(proposal_id).get();
        require!(
            self.hash_actions(&actions) == proposal.action_hash,
            ERR_INCORRECT_CALLDATA
        );

        let config = self.governance_config().get();
        let passed = self.proposal_passes(&proposal, &config);

        let execute = passed && !actions.is_empty();
        if execute {
            let gas_needed = proposal.gas_budget + CALLBACK_GAS + GAS_RESERVE;
            require!(
                self.blockchain().get_gas_left() >= gas_needed,
                ERR_NOT_ENOUGH_GAS
            );
        }

        proposal.flags.processed = true;
        proposal.flags.passed = passed;
        self.proposals(proposal_id).set(&proposal);
        self.process_proposal_event(proposal_id, passed);

        if execute {
            self.hand_off_actions(proposal_id, proposal.gas_budget, &actions);
        }
    }

    // ========================================================
    // INTERNAL
    // ========================================================

    fn start_voting(
        &self,
        proposal: &mut Proposal<Self::Api>,
        sponsor: &ManagedAddress,
        config: &GovernanceConfig<Self::Api>,
    ) {
        let now = self.blockchain().get_block_timestamp();
        require!(
            proposal.expiration == 0
                || proposal.expiration > now + config.voting_period + config.grace_period,
            ERR_PROPOSAL_EXPIRED
        );

        proposal.voting_starts = now;
        proposal.voting_ends = now + config.voting_period;
        proposal.grace_ends = proposal.voting_ends + config.grace_period;
        proposal.sponsor = Some(sponsor.clone());
        proposal.max_total_shares_and_loot_at_vote = self.total_shares_and_loot();

        self.latest_sponsored_proposal_id().set(proposal.id);
        self.sponsor_proposal_event(proposal.id, sponsor, now);
    }

    fn record_vote(&self, voter: &ManagedAddress, proposal_id: u64, approved: bool) {
        require!(
            self.get_state(proposal_id) == ProposalState::Voting,
            ERR_NOT_VOTING
        );
        require!(
            !self.has_voted(proposal_id, voter).get(),
            ERR_ALREADY_VOTED
        );

        let mut proposal = self.proposals(proposal_id).get();
        let weight = self.get_past_votes(voter, proposal.voting_starts);
        require!(weight > 0u64, ERR_NOT_A_MEMBER);

        if approved {
            proposal.yes_votes += &weight;
        } else {
            proposal.no_votes += &weight;
        }

        // ── Quorum denominator never shrinks below what voters saw ──
        let total = self.total_shares_and_loot();
        if total > proposal.max_total_shares_and_loot_at_vote {
            proposal.max_total_shares_and_loot_at_vote = total;
        }

        self.has_voted(proposal_id, voter).set(true);
        self.proposals(proposal_id).set(&proposal);
        self.submit_vote_event(proposal_id, voter, approved, &weight);
    }

    fn proposal_passes(
        &self,
        proposal: &Proposal<Self::Api>,
        config: &GovernanceConfig<Self::Api>,
    ) -> bool {
        let now = self.blockchain().get_block_timestamp();
        if proposal.expiration != 0 && proposal.expiration < now {
            return false;
        }
        if proposal.yes_votes <= proposal.no_votes {
            return false;
        }

        let snapshot = &proposal.max_total_shares_and_loot_at_vote;
        if &proposal.yes_votes * 100u64 < snapshot * config.quorum_percent {
            return false;
        }

        // ── Retention: mass ragequit after sponsoring defeats the proposal ──
        let remaining = self.total_shares_and_loot();
        &remaining * 100u64 >= snapshot * config.min_retention_percent
    }

    fn hand_off_actions(
        &self,
        proposal_id: u64,
        gas_budget: u64,
        actions: &ManagedVec<Action<Self::Api>>,
    ) {
        self.tx()
            .to(self.blockchain().get_sc_address())
            .raw_call(EXECUTE_BATCH_ENDPOINT)
            .argument(actions)
            .gas(gas_budget)
            .callback(self.callbacks().execution_callback(proposal_id))
            .gas_for_callback(CALLBACK_GAS)
            .register_promise();
    }

    #[promises_callback]
    fn execution_callback(
        &self,
        proposal_id: u64,
        #[call_result] result: ManagedAsyncCallResult<IgnoreValue>,
    ) {
        match result {
            ManagedAsyncCallResult::Ok(_) => {
                self.proposal_executed_event(proposal_id);
            },
            ManagedAsyncCallResult::Err(err) => {
                self.proposals(proposal_id)
                    .update(|proposal| proposal.flags.action_failed = true);
                self.proposal_action_failed_event(proposal_id, err.err_code);
            },
        }
    }

    // ========================================================
    // VIEWS
    // ========================================================

    #[view(getState)]
    fn get_state(&self, proposal_id: u64) -> ProposalState {
        let mapper = self.proposals(proposal_id);
        if mapper.is_empty() {
            return ProposalState::Unborn;
        }

        let proposal = mapper.get();
        let now = self.blockchain().get_block_timestamp();
        if proposal.flags.cancelled {
            ProposalState::Cancelled
        } else if proposal.sponsor.is_none() {
            ProposalState::Submitted
        } else if now <= proposal.voting_ends {
            ProposalState::Voting
        } else if proposal.no_votes >= proposal.yes_votes {
            ProposalState::Defeated
        } else if now <= proposal.grace_ends {
            ProposalState::Grace
        } else if proposal.flags.processed {
            ProposalState::Processed
        } else {
            ProposalState::Ready
        }
    }

    #[view(getProposal)]
    fn get_proposal(&self, proposal_id: u64) -> Proposal<Self::Api> {
        let mapper = self.proposals(proposal_id);
        require!(!mapper.is_empty(), ERR_PROPOSAL_NOT_FOUND);
        mapper.get()
    }

    /// Commitment stored at submission and checked again at processing.
    #[view(hashActions)]
    fn hash_actions(
        &self,
        actions: &ManagedVec<Action<Self::Api>>,
    ) -> ManagedByteArray<Self::Api, 32> {
        let mut encoded = ManagedBuffer::new();
        for action in actions.iter() {
            encoded.append(action.to.as_managed_buffer());
            self.append_with_length(&mut encoded, &action.egld_amount.to_bytes_be_buffer());
            self.append_with_length(&mut encoded, &action.endpoint);
            encoded.append_bytes(&(action.arguments.len() as u32).to_be_bytes());
            for argument in action.arguments.iter() {
                self.append_with_length(&mut encoded, &argument);
            }
            encoded.append_bytes(&action.gas_limit.to_be_bytes());
        }
        self.crypto().keccak256(&encoded)
    }

    fn append_with_length(&self, encoded: &mut ManagedBuffer, part: &ManagedBuffer) {
        encoded.append_bytes(&(part.len() as u32).to_be_bytes());
        encoded.append(part);
    }

    // ========================================================
    // STORAGE
    // ========================================================

    #[view(getProposalCount)]
    #[storage_mapper("proposalCount")]
    fn proposal_count(&self) -> SingleValueMapper<u64>;

    #[view(getLatestSponsoredProposalId)]
    #[storage_mapper("latestSponsoredProposalId")]
    fn latest_sponsored_proposal_id(&self) -> SingleValueMapper<u64>;

    #[storage_mapper("proposals")]
    fn proposals(&self, id: u64) -> SingleValueMapper<Proposal<Self::Api>>;

    #[view(hasVoted)]
    #[storage_mapper("hasVoted")]
    fn has_voted(&self, proposal_id: u64, voter: &ManagedAddress) -> SingleValueMapper<bool>;
}
