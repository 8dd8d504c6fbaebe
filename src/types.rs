multiversx_sc::imports!();
multiversx_sc::derive_imports!();

// ============================================================
// Capabilities: independent permission bits held by shamans
// ============================================================

pub const CAPABILITY_NONE: u8 = 0;
pub const CAPABILITY_ADMIN: u8 = 1;
pub const CAPABILITY_MANAGER: u8 = 2;
pub const CAPABILITY_GOVERNANCE: u8 = 4;
pub const CAPABILITY_ALL: u8 = CAPABILITY_ADMIN | CAPABILITY_MANAGER | CAPABILITY_GOVERNANCE;

// ============================================================
// Ledger selector: shares carry votes, loot does not
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Copy, PartialEq, Eq, Debug)]
pub enum LedgerKind {
    Shares,
    Loot,
}

/// Voting power delegated to an account from `from_timepoint` onwards.
#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, PartialEq, Debug)]
pub struct Checkpoint<M: ManagedTypeApi> {
    pub from_timepoint: u64,
    pub votes: BigUint<M>,
}

// ============================================================
// Governance configuration
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, PartialEq, Debug)]
pub struct GovernanceConfig<M: ManagedTypeApi> {
    /// Seconds a sponsored proposal stays open for votes. 0 keeps the current value on update.
    pub voting_period: u64,
    /// Seconds between the end of voting and processing. 0 keeps the current value on update.
    pub grace_period: u64,
    /// EGLD a non-sponsor must attach to submit a proposal.
    pub proposal_deposit: BigUint<M>,
    pub quorum_percent: u64,
    /// Current voting power required to sponsor.
    pub sponsor_threshold: BigUint<M>,
    /// Share of the voting-time supply that must remain at processing.
    pub min_retention_percent: u64,
}

// ============================================================
// Proposal: lifecycle is derived, never stored
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Copy, PartialEq, Eq, Debug)]
pub enum ProposalState {
    Unborn,
    /// Waiting for a sponsor.
    Submitted,
    Voting,
    /// Voting closed with yes > no. Members may still ragequit.
    Grace,
    /// Voting closed with no >= yes. Terminal.
    Defeated,
    Ready,
    Processed,
    Cancelled,
}

impl ProposalState {
    /// States the proposal can never leave.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ProposalState::Processed | ProposalState::Cancelled | ProposalState::Defeated
        )
    }
}

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct ProposalFlags {
    pub cancelled: bool,
    pub processed: bool,
    pub passed: bool,
    pub action_failed: bool,
}

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Debug)]
pub struct Proposal<M: ManagedTypeApi> {
    pub id: u64,
    pub sponsor: Option<ManagedAddress<M>>,
    pub submitted_at: u64,
    pub voting_starts: u64,
    pub voting_ends: u64,
    pub grace_ends: u64,
    /// 0 = never expires
    pub expiration: u64,
    pub gas_budget: u64,
    /// keccak256 commitment to the action batch
    pub action_hash: ManagedByteArray<M, 32>,
    pub yes_votes: BigUint<M>,
    pub no_votes: BigUint<M>,
    pub max_total_shares_and_loot_at_vote: BigUint<M>,
    pub flags: ProposalFlags,
}

// ============================================================
// Action: one call in a proposal's batch
// ============================================================

/// An action addressed to the contract itself is one of its privileged
/// endpoints; anything else is forwarded. An empty `endpoint` is a plain
/// EGLD transfer.
#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, ManagedVecItem, Clone, Debug)]
pub struct Action<M: ManagedTypeApi> {
    pub to: ManagedAddress<M>,
    pub egld_amount: BigUint<M>,
    pub endpoint: ManagedBuffer<M>,
    pub arguments: ManagedVec<M, ManagedBuffer<M>>,
    pub gas_limit: u64,
}
