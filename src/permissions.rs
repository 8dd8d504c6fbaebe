multiversx_sc::imports!();

use crate::errors::*;
use crate::types::{
    CAPABILITY_ADMIN, CAPABILITY_ALL, CAPABILITY_GOVERNANCE, CAPABILITY_MANAGER,
};

/// Capability bits per principal, with one-way locks per bit.
///
/// A locked bit can never be granted again, not even by the treasury's own
/// executed proposals. Bits already held when a lock is set are kept.
#[multiversx_sc::module]
pub trait PermissionsModule: crate::events::EventsModule {
    // ========================================================
    // ENDPOINTS: system only
    // ========================================================

    #[endpoint(setShamans)]
    fn set_shamans(&self, shamans: ManagedVec<ManagedAddress>, permissions: ManagedVec<u8>) {
        self.require_system();
        self.assign_capabilities(&shamans, &permissions);
    }

    #[endpoint(lockAdmin)]
    fn lock_admin(&self) {
        self.require_system();
        self.admin_lock().set(true);
        self.lock_capability_event(CAPABILITY_ADMIN);
    }

    #[endpoint(lockManager)]
    fn lock_manager(&self) {
        self.require_system();
        self.manager_lock().set(true);
        self.lock_capability_event(CAPABILITY_MANAGER);
    }

    #[endpoint(lockGovernance)]
    fn lock_governance(&self) {
        self.require_system();
        self.governance_lock().set(true);
        self.lock_capability_event(CAPABILITY_GOVERNANCE);
    }

    // ========================================================
    // GUARDS
    // ========================================================

    fn require_system(&self) {
        let caller = self.blockchain().get_caller();
        require!(self.is_system(&caller), ERR_SYSTEM_ONLY);
    }

    fn require_system_or(&self, capability: u8) {
        let caller = self.blockchain().get_caller();
        require!(
            self.is_system(&caller) || self.has_capability(&caller, capability),
            ERR_NOT_AUTHORIZED
        );
    }

    fn is_system(&self, address: &ManagedAddress) -> bool {
        *address == self.blockchain().get_sc_address()
    }

    fn has_capability(&self, principal: &ManagedAddress, capability: u8) -> bool {
        self.capabilities(principal).get() & capability != 0
    }

    fn assign_capabilities(
        &self,
        shamans: &ManagedVec<ManagedAddress>,
        permissions: &ManagedVec<u8>,
    ) {
        require!(
            shamans.len() == permissions.len(),
            ERR_ARRAY_LENGTH_MISMATCH
        );
        for (shaman, requested) in shamans.iter().zip(permissions.iter()) {
            let permission = self.strip_locked(requested);
            self.capabilities(&shaman).set(permission);
            self.shaman_set_event(&shaman, permission);
        }
    }

    /// Drops unknown and locked bits; a grant of only locked bits
    /// becomes [`crate::types::CAPABILITY_NONE`].
    fn strip_locked(&self, requested: u8) -> u8 {
        let mut permission = requested & CAPABILITY_ALL;
        if self.admin_lock().get() {
            permission &= !CAPABILITY_ADMIN;
        }
        if self.manager_lock().get() {
            permission &= !CAPABILITY_MANAGER;
        }
        if self.governance_lock().get() {
            permission &= !CAPABILITY_GOVERNANCE;
        }
        permission
    }

    // ========================================================
    // VIEWS
    // ========================================================

    #[view(isAdmin)]
    fn is_admin(&self, principal: &ManagedAddress) -> bool {
        self.has_capability(principal, CAPABILITY_ADMIN)
    }

    #[view(isManager)]
    fn is_manager(&self, principal: &ManagedAddress) -> bool {
        self.has_capability(principal, CAPABILITY_MANAGER)
    }

    #[view(isGovernor)]
    fn is_governor(&self, principal: &ManagedAddress) -> bool {
        self.has_capability(principal, CAPABILITY_GOVERNANCE)
    }

    // ========================================================
    // STORAGE
    // ========================================================

    #[view(getCapabilities)]
    #[storage_mapper("capabilities")]
    fn capabilities(&self, principal: &ManagedAddress) -> SingleValueMapper<u8>;

    #[view(isAdminLocked)]
    #[storage_mapper("adminLock")]
    fn admin_lock(&self) -> SingleValueMapper<bool>;

    #[view(isManagerLocked)]
    #[storage_mapper("managerLock")]
    fn manager_lock(&self) -> SingleValueMapper<bool>;

    #[view(isGovernanceLocked)]
    #[storage_mapper("governanceLock")]
    fn governance_lock(&self) -> SingleValueMapper<bool>;
}
