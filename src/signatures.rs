multiversx_sc::imports!();

use crate::errors::*;
use crate::types::LedgerKind;

const ED25519_SIGNATURE_LEN: usize = 64;

/// Off-chain authorizations for delegation and voting.
///
/// The signed message is the keccak256 digest of the chain id, this
/// contract's address, the shares token name, an operation tag, the signer,
/// the operation fields, the signer's nonce and the expiry. User addresses
/// are ed25519 public keys, so the signer's address verifies its own
/// signature.
#[multiversx_sc::module]
pub trait SignaturesModule:
    crate::config::ConfigModule
    + crate::permissions::PermissionsModule
    + crate::events::EventsModule
{
    /// Checks expiry and nonce, verifies the signature and spends the nonce.
    fn consume_signature(
        &self,
        signer: &ManagedAddress,
        operation: &[u8],
        fields: &ManagedBuffer,
        nonce: u64,
        expiry: u64,
        signature: &ManagedBuffer,
    ) {
        let now = self.blockchain().get_block_timestamp();
        require!(now <= expiry, ERR_SIGNATURE_EXPIRED);

        let nonce_mapper = self.nonces(signer);
        require!(nonce == nonce_mapper.get(), ERR_INVALID_NONCE);
        require!(
            signature.len() == ED25519_SIGNATURE_LEN,
            ERR_INVALID_SIGNATURE
        );

        let digest = self.signing_digest(signer, operation, fields, nonce, expiry);
        // the VM fails the transaction on a mismatch
        self.crypto().verify_ed25519(
            signer.as_managed_buffer(),
            digest.as_managed_buffer(),
            signature,
        );

        nonce_mapper.set(nonce + 1);
    }

    fn signing_digest(
        &self,
        signer: &ManagedAddress,
        operation: &[u8],
        fields: &ManagedBuffer,
        nonce: u64,
        expiry: u64,
    ) -> ManagedByteArray<Self::Api, 32> {
        let mut message = ManagedBuffer::new();
        message.append(&self.chain_id().get());
        message.append(self.blockchain().get_sc_address().as_managed_buffer());
        message.append(&self.token_name(LedgerKind::Shares).get());
        message.append_bytes(operation);
        message.append(signer.as_managed_buffer());
        message.append(fields);
        message.append_bytes(&nonce.to_be_bytes());
        message.append_bytes(&expiry.to_be_bytes());

        self.crypto().keccak256(&message)
    }

    /// Digest a voter signs to authorize `submitVoteWithSig`.
    #[view(getVoteDigest)]
    fn vote_digest(
        &self,
        voter: &ManagedAddress,
        proposal_id: u64,
        approved: bool,
        nonce: u64,
        expiry: u64,
    ) -> ManagedByteArray<Self::Api, 32> {
        let fields = self.vote_fields(proposal_id, approved);
        self.signing_digest(voter, b"vote", &fields, nonce, expiry)
    }

    /// Digest a delegator signs to authorize `delegateBySig`.
    #[view(getDelegationDigest)]
    fn delegation_digest(
        &self,
        delegator: &ManagedAddress,
        delegatee: &ManagedAddress,
        nonce: u64,
        expiry: u64,
    ) -> ManagedByteArray<Self::Api, 32> {
        let fields = delegatee.as_managed_buffer().clone();
        self.signing_digest(delegator, b"delegate", &fields, nonce, expiry)
    }

    fn vote_fields(&self, proposal_id: u64, approved: bool) -> ManagedBuffer {
        let mut fields = ManagedBuffer::new();
        fields.append_bytes(&proposal_id.to_be_bytes());
        fields.append_bytes(&[approved as u8]);
        fields
    }

    #[view(getNonce)]
    #[storage_mapper("nonces")]
    fn nonces(&self, signer: &ManagedAddress) -> SingleValueMapper<u64>;
}
