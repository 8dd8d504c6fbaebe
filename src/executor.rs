multiversx_sc::imports!();

use crate::errors::*;
use crate::types::{Action, GovernanceConfig};

// Self-call endpoints an executed batch may reach.
const MINT_SHARES: &str = "mintShares";
const BURN_SHARES: &str = "burnShares";
const MINT_LOOT: &str = "mintLoot";
const BURN_LOOT: &str = "burnLoot";
const SET_SHAMANS: &str = "setShamans";
const LOCK_ADMIN: &str = "lockAdmin";
const LOCK_MANAGER: &str = "lockManager";
const LOCK_GOVERNANCE: &str = "lockGovernance";
const SET_ADMIN_CONFIG: &str = "setAdminConfig";
const SET_GOVERNANCE_CONFIG: &str = "setGovernanceConfig";
const SET_TRUSTED_FORWARDER: &str = "setTrustedForwarder";
const CANCEL_PROPOSAL: &str = "cancelProposal";

/// Runs a passed proposal's action batch.
///
/// `executeBatch` is only reached through the promise issued by
/// `processProposal`, so a failing action reverts the batch alone and the
/// proposal records the failure in its callback.
#[multiversx_sc::module]
pub trait ExecutorModule:
    crate::proposals::ProposalsModule
    + crate::ledger::LedgerModule
    + crate::config::ConfigModule
    + crate::permissions::PermissionsModule
    + crate::signatures::SignaturesModule
    + crate::events::EventsModule
{
    #[endpoint(executeBatch)]
    fn execute_batch(&self, actions: ManagedVec<Action<Self::Api>>) {
        self.require_system();

        let own_address = self.blockchain().get_sc_address();
        for action in actions.iter() {
            if action.to == own_address {
                self.dispatch_self_call(&action.endpoint, &action.arguments);
            } else {
                self.forward_call(&action);
            }
        }
    }

    fn forward_call(&self, action: &Action<Self::Api>) {
        if action.endpoint.is_empty() {
            self.send().direct_egld(&action.to, &action.egld_amount);
            return;
        }

        let mut call = self
            .tx()
            .to(&action.to)
            .egld(&action.egld_amount)
            .raw_call(action.endpoint.clone())
            .gas(action.gas_limit);
        for argument in action.arguments.iter() {
            call = call.argument(&*argument);
        }
        call.sync_call();
    }

    fn dispatch_self_call(&self, endpoint: &ManagedBuffer, args: &ManagedVec<ManagedBuffer>) {
        if *endpoint == ManagedBuffer::from(MINT_SHARES) {
            self.require_arg_count(args, 2);
            self.mint_shares(self.decode_arg(args, 0), self.decode_arg(args, 1));
        } else if *endpoint == ManagedBuffer::from(BURN_SHARES) {
            self.require_arg_count(args, 2);
            self.burn_shares(self.decode_arg(args, 0), self.decode_arg(args, 1));
        } else if *endpoint == ManagedBuffer::from(MINT_LOOT) {
            self.require_arg_count(args, 2);
            self.mint_loot(self.decode_arg(args, 0), self.decode_arg(args, 1));
        } else if *endpoint == ManagedBuffer::from(BURN_LOOT) {
            self.require_arg_count(args, 2);
            self.burn_loot(self.decode_arg(args, 0), self.decode_arg(args, 1));
        } else if *endpoint == ManagedBuffer::from(SET_SHAMANS) {
            self.require_arg_count(args, 2);
            self.set_shamans(self.decode_arg(args, 0), self.decode_arg(args, 1));
        } else if *endpoint == ManagedBuffer::from(LOCK_ADMIN) {
            self.require_arg_count(args, 0);
            self.lock_admin();
        } else if *endpoint == ManagedBuffer::from(LOCK_MANAGER) {
            self.require_arg_count(args, 0);
            self.lock_manager();
        } else if *endpoint == ManagedBuffer::from(LOCK_GOVERNANCE) {
            self.require_arg_count(args, 0);
            self.lock_governance();
        } else if *endpoint == ManagedBuffer::from(SET_ADMIN_CONFIG) {
            self.require_arg_count(args, 2);
            self.set_admin_config(self.decode_arg(args, 0), self.decode_arg(args, 1));
        } else if *endpoint == ManagedBuffer::from(SET_GOVERNANCE_CONFIG) {
            self.require_arg_count(args, 1);
            let config: GovernanceConfig<Self::Api> = self.decode_arg(args, 0);
            self.set_governance_config(config);
        } else if *endpoint == ManagedBuffer::from(SET_TRUSTED_FORWARDER) {
            self.require_arg_count(args, 1);
            self.set_trusted_forwarder(self.decode_arg(args, 0));
        } else if *endpoint == ManagedBuffer::from(CANCEL_PROPOSAL) {
            self.require_arg_count(args, 1);
            self.cancel_proposal(self.decode_arg(args, 0));
        } else {
            sc_panic!(ERR_UNKNOWN_SELF_CALL);
        }
    }

    fn require_arg_count(&self, args: &ManagedVec<ManagedBuffer>, expected: usize) {
        require!(args.len() == expected, ERR_WRONG_ARGUMENT_COUNT);
    }

    fn decode_arg<T: TopDecode>(&self, args: &ManagedVec<ManagedBuffer>, index: usize) -> T {
        let raw = args.get(index).clone_value();
        T::top_decode(raw).unwrap_or_else(|_| sc_panic!(ERR_INVALID_ACTION_ARGUMENT))
    }
}
