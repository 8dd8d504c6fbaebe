multiversx_sc::imports!();

use crate::errors::*;
use crate::types::{GovernanceConfig, LedgerKind, CAPABILITY_ADMIN, CAPABILITY_GOVERNANCE};

pub const MAX_PERCENT: u64 = 100;

#[multiversx_sc::module]
pub trait ConfigModule:
    crate::permissions::PermissionsModule + crate::events::EventsModule
{
    /// Zero periods keep the current values so a proposal can update the
    /// thresholds alone.
    #[endpoint(setGovernanceConfig)]
    fn set_governance_config(&self, config: GovernanceConfig<Self::Api>) {
        self.require_system_or(CAPABILITY_GOVERNANCE);
        self.apply_governance_config(config);
    }

    #[endpoint(setAdminConfig)]
    fn set_admin_config(&self, pause_shares: bool, pause_loot: bool) {
        self.require_system_or(CAPABILITY_ADMIN);
        self.paused(LedgerKind::Shares).set(pause_shares);
        self.paused(LedgerKind::Loot).set(pause_loot);
        self.admin_config_event(pause_shares, pause_loot);
    }

    /// Relayed transactions keep the original sender as caller; the forwarder
    /// is published for off-chain relayers.
    #[endpoint(setTrustedForwarder)]
    fn set_trusted_forwarder(&self, forwarder: ManagedAddress) {
        self.require_system_or(CAPABILITY_GOVERNANCE);
        self.trusted_forwarder().set(&forwarder);
        self.trusted_forwarder_set_event(&forwarder);
    }

    fn apply_governance_config(&self, update: GovernanceConfig<Self::Api>) {
        require!(update.quorum_percent <= MAX_PERCENT, ERR_INVALID_PERCENT);
        require!(
            update.min_retention_percent <= MAX_PERCENT,
            ERR_INVALID_PERCENT
        );

        let mapper = self.governance_config();
        let mut config = update;
        if !mapper.is_empty() {
            let current = mapper.get();
            if config.voting_period == 0 {
                config.voting_period = current.voting_period;
            }
            if config.grace_period == 0 {
                config.grace_period = current.grace_period;
            }
        }
        require!(config.voting_period > 0, ERR_ZERO_VOTING_PERIOD);

        mapper.set(&config);
        self.governance_config_event(&config);
    }

    #[view(isTrustedForwarder)]
    fn is_trusted_forwarder(&self, address: &ManagedAddress) -> bool {
        let mapper = self.trusted_forwarder();
        !mapper.is_empty() && mapper.get() == *address
    }

    // ========================================================
    // STORAGE
    // ========================================================

    #[view(getGovernanceConfig)]
    #[storage_mapper("governanceConfig")]
    fn governance_config(&self) -> SingleValueMapper<GovernanceConfig<Self::Api>>;

    #[view(isPaused)]
    #[storage_mapper("paused")]
    fn paused(&self, ledger: LedgerKind) -> SingleValueMapper<bool>;

    #[view(getTrustedForwarder)]
    #[storage_mapper("trustedForwarder")]
    fn trusted_forwarder(&self) -> SingleValueMapper<ManagedAddress>;

    #[view(getTokenName)]
    #[storage_mapper("tokenName")]
    fn token_name(&self, ledger: LedgerKind) -> SingleValueMapper<ManagedBuffer>;

    #[view(getTokenSymbol)]
    #[storage_mapper("tokenSymbol")]
    fn token_symbol(&self, ledger: LedgerKind) -> SingleValueMapper<ManagedBuffer>;

    /// Part of every signed digest, so signatures do not replay across networks.
    #[view(getChainId)]
    #[storage_mapper("chainId")]
    fn chain_id(&self) -> SingleValueMapper<ManagedBuffer>;
}
