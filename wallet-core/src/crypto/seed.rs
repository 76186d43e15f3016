// wallet-core/src/crypto/seed.rs
//
// Seed Derivation - PBKDF2-HMAC-SHA512 (2048 rounds, salt "mnemonic" + passphrase)

use crate::crypto::mnemonic::WalletMnemonic;
use crate::error::{CryptoError, MnemonicError, WalletResult};
use bip39::Mnemonic;
use rand::{rngs::OsRng, RngCore};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// 64-byte root secret of the key tree.
///
/// Never serialized, never printed. Zeroized on drop, or earlier through
/// [`Zeroize::zeroize`] when a wallet closes.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Seed([u8; Seed::LEN]);

impl std::fmt::Debug for Seed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Seed([REDACTED])")
    }
}

impl Seed {
    pub const LEN: usize = 64;

    pub fn from_bytes(bytes: [u8; Self::LEN]) -> Self {
        Self(bytes)
    }

    /// Copy a seed out of a slice. Anything but 64 bytes is rejected.
    pub fn from_slice(bytes: &[u8]) -> WalletResult<Self> {
        if bytes.len() != Self::LEN {
            return Err(CryptoError::InvalidSeedLength(bytes.len()).into());
        }
        let mut buf = [0u8; Self::LEN];
        buf.copy_from_slice(bytes);
        Ok(Self(buf))
    }

    /// Seed of an already-validated mnemonic.
    pub fn from_mnemonic(mnemonic: &WalletMnemonic, passphrase: &str) -> WalletResult<Self> {
        let parsed = Mnemonic::parse(mnemonic.phrase())
            .map_err(|e| MnemonicError::Bip39Error(e.to_string()))?;
        Ok(Self(parsed.to_seed(passphrase)))
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8; Self::LEN] {
        &self.0
    }

    #[cfg(test)]
    pub(crate) fn is_zeroed(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }
}

/// Seed from a mnemonic phrase and an optional passphrase.
///
/// Deterministic: identical inputs always produce the same seed.
pub fn seed_from_mnemonic(phrase: &str, passphrase: &str) -> WalletResult<Seed> {
    if phrase.trim().is_empty() {
        return Err(MnemonicError::Empty.into());
    }
    let mnemonic = WalletMnemonic::from_phrase(phrase)?;
    Seed::from_mnemonic(&mnemonic, passphrase)
}

/// 64 fresh bytes from the OS CSPRNG.
pub fn new_random_seed() -> WalletResult<Seed> {
    let mut buf = [0u8; Seed::LEN];
    OsRng
        .try_fill_bytes(&mut buf)
        .map_err(|e| CryptoError::RandomSource(e.to_string()))?;
    let seed = Seed(buf);
    buf.zeroize();
    Ok(seed)
}

// =============================================================================
// UNIT TESTS
// =============================================================================
