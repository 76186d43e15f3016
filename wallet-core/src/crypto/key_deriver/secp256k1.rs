// wallet-core/src/crypto/key_deriver/secp256k1.rs
//
// secp256k1 Key Derivation - BIP-32 / BIP-44
//
// Algorithm: HMAC-SHA512 hierarchical deterministic derivation
// Reference: https://github.com/bitcoin/bips/blob/master/bip-0032.mediawiki

use super::{KeyDerivation, PrivateKey};
use crate::crypto::paths::DerivationPath;
use crate::crypto::seed::Seed;
use crate::error::{CryptoError, WalletResult};
use ::bip32::{ChildNumber, XPrv};
use zeroize::Zeroize;

/// BIP-32 walk from the master key down `path`.
///
/// Each level mixes the parent extended key with the child index through
/// HMAC-SHA512. Hardened levels (index >= 2^31) hash the parent private key,
/// so a leaked child key cannot be combined with the parent public key to
/// recover siblings.
///
/// Intermediate extended keys are zeroized by `bip32` when they go out of
/// scope; nothing is cached between calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bip32Deriver;

impl Bip32Deriver {
    pub const NAME: &'static str = "bip32";
}

impl KeyDerivation for Bip32Deriver {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn derive_private_key(&self, seed: &Seed, path: &DerivationPath) -> WalletResult<PrivateKey> {
        let mut child = XPrv::new(seed.as_bytes()).map_err(|e| {
            CryptoError::DerivationFailed(format!("Failed to create master key: {}", e))
        })?;

        for component in path.components() {
            let child_num = ChildNumber::new(component.index(), component.is_hardened())
                .map_err(|e| {
                    CryptoError::DerivationFailed(format!("Invalid index {}: {}", component, e))
                })?;
            child = child.derive_child(child_num).map_err(|e| {
                CryptoError::DerivationFailed(format!(
                    "Child derivation failed at {}: {}",
                    component, e
                ))
            })?;
        }

        let mut key_bytes: [u8; 32] = child.private_key().to_bytes().into();
        let key = PrivateKey::from_bytes(key_bytes);
        key_bytes.zeroize();
        key
    }
}

// =============================================================================
// UNIT TESTS
// =============================================================================
