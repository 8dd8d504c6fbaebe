#![no_std]

multiversx_sc::imports!();

pub mod config;
pub mod errors;
pub mod events;
pub mod executor;
pub mod ledger;
pub mod permissions;
pub mod proposals;
pub mod ragequit;
pub mod signatures;
pub mod types;

use errors::ERR_NOTHING_TO_FUND;
use types::{GovernanceConfig, LedgerKind};

// ============================================================
// Contract
// ============================================================

/// Member-governed treasury.
///
/// Members hold voting shares and non-voting loot. Every change to funds or
/// rules goes through a proposal that is sponsored, voted on, left in grace
/// for ragequits and finally processed in order. Shamans holding capability
/// bits may also call the privileged endpoints directly.
#[multiversx_sc::contract]
pub trait GuildTreasury:
    config::ConfigModule
    + events::EventsModule
    + executor::ExecutorModule
    + ledger::LedgerModule
    + permissions::PermissionsModule
    + proposals::ProposalsModule
    + ragequit::RagequitModule
    + signatures::SignaturesModule
{
    // ========================================================
    // Init / Upgrade
    // ========================================================

    #[allow(clippy::too_many_arguments)]
    #[init]
    fn init(
        &self,
        shares_name: ManagedBuffer,
        shares_symbol: ManagedBuffer,
        loot_name: ManagedBuffer,
        loot_symbol: ManagedBuffer,
        chain_id: ManagedBuffer,
        governance_config: GovernanceConfig<Self::Api>,
        shamans: ManagedVec<ManagedAddress>,
        permissions: ManagedVec<u8>,
        members: ManagedVec<ManagedAddress>,
        shares: ManagedVec<BigUint>,
        loot: ManagedVec<BigUint>,
    ) {
        self.token_name(LedgerKind::Shares).set(&shares_name);
        self.token_symbol(LedgerKind::Shares).set(&shares_symbol);
        self.token_name(LedgerKind::Loot).set(&loot_name);
        self.token_symbol(LedgerKind::Loot).set(&loot_symbol);
        self.chain_id().set(&chain_id);

        self.apply_governance_config(governance_config);

        self.assign_capabilities(&shamans, &permissions);

        // ── Founding members ──
        self.mint_batch(LedgerKind::Shares, &members, &shares);
        self.mint_batch(LedgerKind::Loot, &members, &loot);
    }

    #[upgrade]
    fn upgrade(&self) {}

    // ========================================================
    // ENDPOINT: fundTreasury
    // Anyone may add EGLD or ESDT to the pool that ragequit and
    // executed proposals pay out of.
    // ========================================================

    #[payable("*")]
    #[endpoint(fundTreasury)]
    fn fund_treasury(&self) {
        let caller = self.blockchain().get_caller();
        let (token, amount) = self.call_value().egld_or_single_fungible_esdt();
        require!(amount > 0u64, ERR_NOTHING_TO_FUND);

        self.treasury_funded_event(&caller, &token, &amount);
    }

    // ========================================================
    // VIEWS
    // ========================================================

    #[view(getTreasuryBalance)]
    fn get_treasury_balance(&self, token: EgldOrEsdtTokenIdentifier) -> BigUint {
        self.blockchain().get_sc_balance(&token, 0)
    }
}
