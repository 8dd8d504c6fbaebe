multiversx_sc::imports!();

use crate::errors::*;
use crate::types::LedgerKind;

/// Longest identifier compared when checking token order.
const MAX_TOKEN_ID_LEN: usize = 32;

#[multiversx_sc::module]
pub trait RagequitModule:
    crate::ledger::LedgerModule
    + crate::config::ConfigModule
    + crate::permissions::PermissionsModule
    + crate::signatures::SignaturesModule
    + crate::events::EventsModule
{
    // ========================================================
    // ENDPOINT: ragequit
    // Burns the caller's shares and loot for a pro-rata slice of
    // every listed treasury token. No permission can block it.
    // ========================================================

    #[endpoint(ragequit)]
    fn ragequit(
        &self,
        to: ManagedAddress,
        shares_to_burn: BigUint,
        loot_to_burn: BigUint,
        tokens: ManagedVec<EgldOrEsdtTokenIdentifier>,
    ) {
        let caller = self.blockchain().get_caller();
        let burned = &shares_to_burn + &loot_to_burn;
        require!(burned > 0u64, ERR_NOTHING_TO_BURN);
        self.require_strictly_ascending(&tokens);

        // ── Supply is read before the burn ──
        let total_before = self.total_shares_and_loot();

        self.burn(LedgerKind::Loot, &caller, &loot_to_burn);
        self.burn(LedgerKind::Shares, &caller, &shares_to_burn);

        for token in tokens.iter() {
            let token = EgldOrEsdtTokenIdentifier::clone(&token);
            let balance = self.blockchain().get_sc_balance(&token, 0);
            let amount = self.ragequit_amount(&balance, &burned, &total_before);
            if amount == 0u64 {
                continue;
            }
            self.send().direct(&to, &token, 0, &amount);
            self.ragequit_payout_event(&to, &token, &amount);
        }

        self.ragequit_event(&caller, &to, &shares_to_burn, &loot_to_burn);
    }

    /// Rounds down; the remainder stays in the treasury.
    fn ragequit_amount(&self, balance: &BigUint, burned: &BigUint, total: &BigUint) -> BigUint {
        if *total == 0u64 {
            return BigUint::zero();
        }
        (balance * burned) / total
    }

    /// Rejects duplicates and gives a deterministic payout order.
    fn require_strictly_ascending(&self, tokens: &ManagedVec<EgldOrEsdtTokenIdentifier>) {
        let mut previous = [0u8; MAX_TOKEN_ID_LEN];
        let mut previous_len = 0usize;

        for (index, token) in tokens.iter().enumerate() {
            let name = EgldOrEsdtTokenIdentifier::clone(&token).into_name();
            let len = name.len();
            require!(len <= MAX_TOKEN_ID_LEN, ERR_TOKEN_ID_TOO_LONG);

            let mut current = [0u8; MAX_TOKEN_ID_LEN];
            require!(
                name.load_slice(0, &mut current[..len]).is_ok(),
                ERR_TOKEN_ID_TOO_LONG
            );

            if index > 0 {
                require!(
                    current[..len] > previous[..previous_len],
                    ERR_UNORDERED_TOKENS
                );
            }
            previous = current;
            previous_len = len;
        }
    }
}
