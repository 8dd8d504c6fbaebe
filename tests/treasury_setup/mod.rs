#![allow(dead_code)]

use ed25519_dalek::{Signer, SigningKey};
use guild_treasury::{
    ledger::LedgerModule,
    proposals::ProposalsModule,
    ragequit::RagequitModule,
    types::{GovernanceConfig, LedgerKind, ProposalState, CAPABILITY_ALL},
    GuildTreasury,
};
use multiversx_sc::types::{Address, ManagedVec};
use multiversx_sc_scenario::{
    managed_address, managed_biguint, managed_buffer, rust_biguint, whitebox_legacy::*, DebugApi,
};

pub const WASM_PATH: &str = "output/guild-treasury.wasm";

pub const START: u64 = 1_000;
pub const VOTING_PERIOD: u64 = 100;
pub const GRACE_PERIOD: u64 = 50;
pub const PROPOSAL_DEPOSIT: u64 = 10;
pub const SPONSOR_THRESHOLD: u64 = 100;
pub const GAS_BUDGET: u64 = 20_000_000;

pub fn governance_config(
    quorum_percent: u64,
    min_retention_percent: u64,
) -> GovernanceConfig<DebugApi> {
    GovernanceConfig {
        voting_period: VOTING_PERIOD,
        grace_period: GRACE_PERIOD,
        proposal_deposit: managed_biguint!(PROPOSAL_DEPOSIT),
        quorum_percent,
        sponsor_threshold: managed_biguint!(SPONSOR_THRESHOLD),
        min_retention_percent,
    }
}

pub struct TreasurySetup<Builder>
where
    Builder: 'static + Copy + Fn() -> guild_treasury::ContractObj<DebugApi>,
{
    pub b_mock: BlockchainStateWrapper,
    pub owner: Address,
    /// Holds every capability bit.
    pub shaman: Address,
    pub alice: Address,
    pub bob: Address,
    pub carol: Address,
    pub contract: ContractObjWrapper<guild_treasury::ContractObj<DebugApi>, Builder>,
}

impl<Builder> TreasurySetup<Builder>
where
    Builder: 'static + Copy + Fn() -> guild_treasury::ContractObj<DebugApi>,
{
    pub fn new(builder: Builder, quorum_percent: u64, min_retention_percent: u64) -> Self {
        let rust_zero = rust_biguint!(0u64);
        let mut b_mock = BlockchainStateWrapper::new();
        let owner = b_mock.create_user_account(&rust_zero);
        let shaman = b_mock.create_user_account(&rust_zero);
        let alice = b_mock.create_user_account(&rust_biguint!(1_000u64));
        let bob = b_mock.create_user_account(&rust_biguint!(1_000u64));
        let carol = b_mock.create_user_account(&rust_zero);
        let contract = b_mock.create_sc_account(&rust_zero, Some(&owner), builder, WASM_PATH);

        b_mock.set_block_timestamp(START);
        b_mock
            .execute_tx(&owner, &contract, &rust_zero, |sc| {
                let mut shamans = ManagedVec::new();
                shamans.push(managed_address!(&shaman));
                let mut permissions = ManagedVec::new();
                permissions.push(CAPABILITY_ALL);

                sc.init(
                    managed_buffer!(b"Guild Shares"),
                    managed_buffer!(b"GSHR"),
                    managed_buffer!(b"Guild Loot"),
                    managed_buffer!(b"GLOOT"),
                    managed_buffer!(b"D"),
                    governance_config(quorum_percent, min_retention_percent),
                    shamans,
                    permissions,
                    ManagedVec::new(),
                    ManagedVec::new(),
                    ManagedVec::new(),
                );
            })
            .assert_ok();

        TreasurySetup {
            b_mock,
            owner,
            shaman,
            alice,
            bob,
            carol,
            contract,
        }
    }

    /// Registers an account whose address is the ed25519 public key
    /// derived from `seed`.
    pub fn create_signer(&mut self, seed: u8) -> (SigningKey, Address) {
        let key = SigningKey::from_bytes(&[seed; 32]);
        let address = Address::from(key.verifying_key().to_bytes());
        self.b_mock
            .create_user_account_fixed_address(&address, &rust_biguint!(0u64));
        (key, address)
    }

    pub fn set_time(&mut self, timestamp: u64) {
        self.b_mock.set_block_timestamp(timestamp);
    }

    pub fn mint(&mut self, ledger: LedgerKind, holder: &Address, amount: u64) {
        self.b_mock
            .execute_tx(&self.shaman, &self.contract, &rust_biguint!(0u64), |sc| {
                let mut to = ManagedVec::new();
                to.push(managed_address!(holder));
                let mut amounts = ManagedVec::new();
                amounts.push(managed_biguint!(amount));
                match ledger {
                    LedgerKind::Shares => sc.mint_shares(to, amounts),
                    LedgerKind::Loot => sc.mint_loot(to, amounts),
                }
            })
            .assert_ok();
    }

    pub fn transfer(&mut self, ledger: LedgerKind, from: &Address, to: &Address, amount: u64) {
        self.b_mock
            .execute_tx(from, &self.contract, &rust_biguint!(0u64), |sc| {
                sc.transfer(ledger, managed_address!(to), managed_biguint!(amount));
            })
            .assert_ok();
    }

    /// Submits a proposal with an empty action batch.
    pub fn submit(&mut self, caller: &Address, deposit: u64) -> u64 {
        let mut proposal_id = 0u64;
        self.b_mock
            .execute_tx(caller, &self.contract, &rust_biguint!(deposit), |sc| {
                proposal_id = sc.submit_proposal(
                    0u64,
                    GAS_BUDGET,
                    managed_buffer!(b"ipfs://details"),
                    ManagedVec::new(),
                );
            })
            .assert_ok();
        proposal_id
    }

    pub fn vote(&mut self, voter: &Address, proposal_id: u64, approved: bool) {
        self.b_mock
            .execute_tx(voter, &self.contract, &rust_biguint!(0u64), |sc| {
                sc.submit_vote(proposal_id, approved);
            })
            .assert_ok();
    }

    pub fn process(&mut self, caller: &Address, proposal_id: u64) {
        self.b_mock
            .execute_tx(caller, &self.contract, &rust_biguint!(0u64), |sc| {
                sc.process_proposal(proposal_id, ManagedVec::new());
            })
            .assert_ok();
    }

    pub fn process_fails(&mut self, caller: &Address, proposal_id: u64, message: &str) {
        self.b_mock
            .execute_tx(caller, &self.contract, &rust_biguint!(0u64), |sc| {
                sc.process_proposal(proposal_id, ManagedVec::new());
            })
            .assert_user_error(message);
    }

    pub fn ragequit(&mut self, member: &Address, shares: u64, loot: u64) {
        self.b_mock
            .execute_tx(member, &self.contract, &rust_biguint!(0u64), |sc| {
                sc.ragequit(
                    managed_address!(member),
                    managed_biguint!(shares),
                    managed_biguint!(loot),
                    ManagedVec::new(),
                );
            })
            .assert_ok();
    }

    pub fn check_state(&mut self, proposal_id: u64, expected: ProposalState) {
        self.b_mock
            .execute_query(&self.contract, |sc| {
                assert_eq!(sc.get_state(proposal_id), expected);
            })
            .assert_ok();
    }

    pub fn check_passed(&mut self, proposal_id: u64, expected: bool) {
        self.b_mock
            .execute_query(&self.contract, |sc| {
                let proposal = sc.get_proposal(proposal_id);
                assert!(proposal.flags.processed);
                assert_eq!(proposal.flags.passed, expected);
            })
            .assert_ok();
    }

    pub fn check_votes(&mut self, account: &Address, expected: u64) {
        self.b_mock
            .execute_query(&self.contract, |sc| {
                assert_eq!(
                    sc.get_votes(&managed_address!(account)),
                    managed_biguint!(expected)
                );
            })
            .assert_ok();
    }
}

pub fn sign(key: &SigningKey, digest: &[u8; 32]) -> [u8; 64] {
    key.sign(digest).to_bytes()
}
