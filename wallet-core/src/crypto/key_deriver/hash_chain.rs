// wallet-core/src/crypto/key_deriver/hash_chain.rs
//
// Simplified derivation: key = SHA-256(seed || be32(c0) || be32(c1) || ...)
//
// Trade-off: one hash over the whole path. There is no chain code and no
// parent/child relation, so the hardened/non-hardened distinction only
// changes the hashed bytes; it gives none of the BIP-32 isolation guarantees,
// and keys are not interoperable with other HD wallets. Kept for callers that
// need the legacy key set.

use super::{KeyDerivation, PrivateKey};
use crate::crypto::paths::DerivationPath;
use crate::crypto::seed::Seed;
use crate::error::{CryptoError, WalletError, WalletResult};
use sha2::{Digest, Sha256};
use zeroize::Zeroize;

#[derive(Debug, Clone, Copy, Default)]
pub struct HashChainDeriver;

impl HashChainDeriver {
    pub const NAME: &'static str = "hash_chain";

    /// Turn the path digest into a key. A digest outside `[1, n)` is
    /// reported as [`CryptoError::DerivationFailed`], never retried.
    pub(super) fn scalar_from_digest(
        mut digest: [u8; 32],
        path: &DerivationPath,
    ) -> WalletResult<PrivateKey> {
        let key = PrivateKey::from_bytes(digest).map_err(|_| {
            WalletError::Crypto(CryptoError::DerivationFailed(format!(
                "hash of {} is not a valid secp256k1 scalar",
                path
            )))
        });
        digest.zeroize();
        key
    }
}

impl KeyDerivation for HashChainDeriver {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn derive_private_key(&self, seed: &Seed, path: &DerivationPath) -> WalletResult<PrivateKey> {
        let mut hasher = Sha256::new();
        hasher.update(seed.as_bytes());
        for component in path.components() {
            hasher.update(component.raw().to_be_bytes());
        }

        // Probability of an invalid scalar is ~2^-128.
        Self::scalar_from_digest(hasher.finalize().into(), path)
    }
}

// =============================================================================
// UNIT TESTS
// =============================================================================
