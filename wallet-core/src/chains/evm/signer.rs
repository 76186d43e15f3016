// wallet-core/src/chains/evm/signer.rs
//
// EVM Signer Module - Offline Signing
// Raw hashes, EIP-191 personal messages, EIP-155 / typed transactions

use crate::crypto::key_deriver::PrivateKey;
use crate::error::{CryptoError, WalletError, WalletResult};
use alloy::{
    consensus::{SignableTransaction, Signed},
    primitives::{Address, Signature, B256},
    signers::{local::LocalSigner, SignerSync},
};
use k256::ecdsa::SigningKey;

/// Signer bound to one private key.
///
/// The inner `SigningKey` zeroizes itself on drop. The address is computed
/// once at construction and used to check every produced signature.
pub struct EvmSigner {
    signer: LocalSigner<SigningKey>,
    address: Address,
}

impl std::fmt::Debug for EvmSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvmSigner")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

impl Drop for EvmSigner {
    fn drop(&mut self) {
        tracing::trace!(address = %self.address, "signer dropped");
    }
}

impl EvmSigner {
    // =========================================================================
    // CONSTRUCTORS
    // =========================================================================

    pub fn new(private_key: &PrivateKey) -> WalletResult<Self> {
        let signer = LocalSigner::from(private_key.signing_key()?);
        let address = signer.address();
        Ok(Self { signer, address })
    }

    #[inline]
    pub fn address(&self) -> Address {
        self.address
    }

    // =========================================================================
    // SIGNING
    // =========================================================================

    /// Sign a 32-byte prehash.
    ///
    /// The caller is responsible for hashing the payload the way the
    /// verifier expects.
    pub fn sign_hash(&self, hash: &B256) -> WalletResult<Signature> {
        self.signer
            .sign_hash_sync(hash)
            .map_err(|e| WalletError::Crypto(CryptoError::SigningFailed(e.to_string())))
    }

    /// EIP-191 personal sign: `"\x19Ethereum Signed Message:\n{len}{message}"`.
    pub fn sign_message(&self, message: &[u8]) -> WalletResult<Signature> {
        self.signer
            .sign_message_sync(message)
            .map_err(|e| WalletError::Crypto(CryptoError::SigningFailed(e.to_string())))
    }

    /// Sign a transaction for `chain_id` and return it with its signature.
    ///
    /// The chain id is written into the transaction if it has none; a
    /// transaction already bound to another chain is refused. The sender is
    /// recovered from the fresh signature and must equal this signer's
    /// address, otherwise [`CryptoError::SignerMismatch`].
    pub fn sign_transaction<T>(&self, mut tx: T, chain_id: u64) -> WalletResult<Signed<T>>
    where
        T: SignableTransaction<Signature>,
    {
        if !tx.set_chain_id_checked(chain_id) {
            return Err(WalletError::Validation(format!(
                "transaction is bound to chain {:?}, refusing to sign for chain {}",
                tx.chain_id(),
                chain_id
            )));
        }

        let hash = tx.signature_hash();
        let signature = self.sign_hash(&hash)?;
        self.ensure_recovers(&hash, &signature)?;

        Ok(tx.into_signed(signature))
    }

    fn ensure_recovers(&self, hash: &B256, signature: &Signature) -> WalletResult<()> {
        let recovered = signature
            .recover_address_from_prehash(hash)
            .map_err(|e| WalletError::Crypto(CryptoError::SigningFailed(e.to_string())))?;
        if recovered != self.address {
            tracing::warn!(expected = %self.address, %recovered, "recovered signer differs");
            return Err(CryptoError::SignerMismatch {
                expected: self.address,
                recovered,
            }
            .into());
        }
        Ok(())
    }

    // =========================================================================
    // VERIFICATION
    // =========================================================================

    pub fn verify_message(&self, message: &[u8], signature: &Signature) -> bool {
        signature
            .recover_address_from_msg(message)
            .map(|recovered| recovered == self.address)
            .unwrap_or(false)
    }

    pub fn verify_hash(&self, hash: &B256, signature: &Signature) -> bool {
        signature
            .recover_address_from_prehash(hash)
            .map(|recovered| recovered == self.address)
            .unwrap_or(false)
    }
}

// =============================================================================
// UNIT TESTS
// =============================================================================
