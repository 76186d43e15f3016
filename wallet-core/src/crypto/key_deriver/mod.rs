// wallet-core/src/crypto/key_deriver/mod.rs
//
// Key Derivation Engine - pluggable (seed, path) -> private key strategies
//
// ┌──────────────────────────────────────────────────────────┐
// │  Seed (64 bytes)          DerivationPath                 │
// │        └──────────┬──────────────┘                       │
// │                   ▼                                      │
// │        dyn KeyDerivation                                 │
// │        ├─ Bip32Deriver      HMAC-SHA512 tweak per level  │
// │        └─ HashChainDeriver  SHA-256(seed || path)        │
// │                   ▼                                      │
// │   PrivateKey ─► PublicKey (secp256k1) ─► Address         │
// └──────────────────────────────────────────────────────────┘

pub mod hash_chain;
pub mod secp256k1;

pub use secp256k1::Bip32Deriver;
pub use hash_chain::HashChainDeriver;

use crate::chains::evm::EvmAddress;
use crate::crypto::paths::DerivationPath;
use crate::crypto::seed::Seed;
use crate::error::{CryptoError, WalletResult};
use alloy::primitives::Address;
use k256::ecdsa::SigningKey;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::{PublicKey, SecretKey};
use zeroize::{Zeroize, Zeroizing};

// =============================================================================
// DERIVATION STRATEGY
// =============================================================================

/// Maps (seed, path) to a private key.
///
/// Implementations must be pure: the same seed and path always give the same
/// key, and no other state may influence the result. They are called
/// concurrently from several threads.
pub trait KeyDerivation: Send + Sync {
    /// Short identifier used in logs and configuration.
    fn name(&self) -> &'static str;

    fn derive_private_key(&self, seed: &Seed, path: &DerivationPath) -> WalletResult<PrivateKey>;
}

// =============================================================================
// PRIVATE KEY
// =============================================================================

/// A valid secp256k1 scalar (32 bytes, big-endian).
///
/// The buffer is zeroized on drop; [`PrivateKey::wipe`] clears it earlier.
pub struct PrivateKey(Zeroizing<[u8; 32]>);

impl std::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PrivateKey([REDACTED])")
    }
}

impl PrivateKey {
    /// Wrap raw bytes, rejecting zero and values outside the curve order.
    pub fn from_bytes(bytes: [u8; 32]) -> WalletResult<Self> {
        let key = Self(Zeroizing::new(bytes));
        key.secret_key()?;
        Ok(key)
    }

    pub fn from_slice(bytes: &[u8]) -> WalletResult<Self> {
        if bytes.len() != 32 {
            return Err(CryptoError::InvalidKeyFormat(format!(
                "expected 32 bytes, got {}",
                bytes.len()
            ))
            .into());
        }
        let mut buf = [0u8; 32];
        buf.copy_from_slice(bytes);
        let key = Self::from_bytes(buf);
        buf.zeroize();
        key
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    fn secret_key(&self) -> WalletResult<SecretKey> {
        SecretKey::from_slice(self.0.as_slice()).map_err(|_| {
            CryptoError::InvalidKeyFormat("scalar is zero or exceeds the curve order".to_string())
                .into()
        })
    }

    pub fn public_key(&self) -> WalletResult<PublicKey> {
        Ok(self.secret_key()?.public_key())
    }

    pub fn signing_key(&self) -> WalletResult<SigningKey> {
        SigningKey::from_slice(self.0.as_slice())
            .map_err(|e| CryptoError::InvalidKeyFormat(e.to_string()).into())
    }

    /// Lowercase hex, no `0x`, always 64 characters.
    pub fn to_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(hex::encode(self.0.as_slice()))
    }

    pub(crate) fn wipe(&mut self) {
        self.0.zeroize();
    }

    #[cfg(test)]
    pub(crate) fn is_zeroed(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }
}

/// 64-byte uncompressed public key without the `0x04` SEC1 prefix.
pub fn public_key_raw(public_key: &PublicKey) -> [u8; 64] {
    let encoded = public_key.to_encoded_point(false);
    let mut raw = [0u8; 64];
    raw.copy_from_slice(&encoded.as_bytes()[1..]);
    raw
}

// =============================================================================
// DERIVED KEY
// =============================================================================

/// Everything derived for one path.
#[derive(Debug)]
pub struct DerivedKey {
    pub private_key: PrivateKey,
    pub public_key: PublicKey,
    pub address: Address,
    pub path: DerivationPath,
}

impl DerivedKey {
    /// Private key through `kdf`, then public key and address.
    pub fn derive(kdf: &dyn KeyDerivation, seed: &Seed, path: &DerivationPath) -> WalletResult<Self> {
        let private_key = kdf.derive_private_key(seed, path)?;
        let public_key = private_key.public_key()?;
        let address = EvmAddress::from_public_key(&public_key);
        Ok(Self {
            private_key,
            public_key,
            address,
            path: path.clone(),
        })
    }
}

// =============================================================================
// UNIT TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::paths::DerivationPaths;

    // Anvil/Hardhat account #0
    const ANVIL_PRIVATE_KEY: &str =
        "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const ANVIL_ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

    #[test]
    fn test_private_key_rejects_invalid_scalars() {
        assert!(PrivateKey::from_bytes([0u8; 32]).is_err());
        assert!(PrivateKey::from_bytes([0xFF; 32]).is_err());
        assert!(PrivateKey::from_slice(&[1u8; 31]).is_err());
        assert!(PrivateKey::from_slice(&[1u8; 33]).is_err());
        assert!(PrivateKey::from_bytes([1u8; 32]).is_ok());
    }

    #[test]
    fn test_private_key_hex_and_public_key() {
        let key = PrivateKey::from_slice(&hex::decode(ANVIL_PRIVATE_KEY).unwrap()).unwrap();
        assert_eq!(key.to_hex().as_str(), ANVIL_PRIVATE_KEY);

        let public = key.public_key().unwrap();
        let raw = public_key_raw(&public);
        assert_eq!(raw.len(), 64);
        assert_eq!(
            EvmAddress::from_public_key(&public).to_checksum(None),
            ANVIL_ADDRESS
        );
    }

    #[test]
    fn test_wipe() {
        let mut key = PrivateKey::from_bytes([7u8; 32]).unwrap();
        assert!(!key.is_zeroed());
        key.wipe();
        assert!(key.is_zeroed());
    }

    #[test]
    fn test_debug_redacted() {
        let key = PrivateKey::from_slice(&hex::decode(ANVIL_PRIVATE_KEY).unwrap()).unwrap();
        let out = format!("{:?}", key);
        assert!(!out.contains("ac0974"));
        assert!(out.contains("REDACTED"));
    }

    /// Always lands on the zero scalar.
    struct ZeroDigest;

    impl KeyDerivation for ZeroDigest {
        fn name(&self) -> &'static str {
            "zero_digest"
        }

        fn derive_private_key(&self, _: &Seed, path: &DerivationPath) -> WalletResult<PrivateKey> {
            HashChainDeriver::scalar_from_digest([0u8; 32], path)
        }
    }

    #[test]
    fn test_derived_key_propagates_derivation_failure() {
        let seed = Seed::from_bytes([0x42; 64]);
        let err = DerivedKey::derive(&ZeroDigest, &seed, &DerivationPaths::evm(0)).unwrap_err();
        assert!(matches!(
            err,
            crate::error::WalletError::Crypto(CryptoError::DerivationFailed(_))
        ));
    }

    #[test]
    fn test_strategies_disagree() {
        let seed = Seed::from_bytes([0x42; 64]);
        let path = DerivationPaths::evm(0);
        let a = DerivedKey::derive(&Bip32Deriver, &seed, &path).unwrap();
        let b = DerivedKey::derive(&HashChainDeriver, &seed, &path).unwrap();
        assert_ne!(a.address, b.address);
        assert_eq!(a.path, b.path);
    }
}
