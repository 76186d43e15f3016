// wallet-core/src/config.rs
//
// Wallet configuration: BIP-39 passphrase and derivation strategy.

use crate::crypto::key_deriver::{Bip32Deriver, HashChainDeriver, KeyDerivation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Which `(seed, path) -> key` strategy a wallet uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DerivationScheme {
    /// BIP-32 over secp256k1; interoperable with other HD wallets.
    #[default]
    Bip32,
    /// Single SHA-256 over seed and path; legacy key set, not interoperable.
    HashChain,
}

impl DerivationScheme {
    pub fn deriver(self) -> Arc<dyn KeyDerivation> {
        match self {
            DerivationScheme::Bip32 => Arc::new(Bip32Deriver),
            DerivationScheme::HashChain => Arc::new(HashChainDeriver),
        }
    }
}

/// Options for opening a wallet.
///
/// The passphrase is mixed into seed derivation (BIP-39 salt). It is never
/// serialized, never printed by `Debug`, and is zeroized on drop.
///
/// Fields default individually: a container-level serde default would move
/// out of a value that implements `Drop`.
#[derive(Clone, Default, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct WalletConfig {
    #[serde(skip_serializing, default)]
    passphrase: Option<String>,
    #[zeroize(skip)]
    #[serde(default)]
    derivation: DerivationScheme,
}

impl std::fmt::Debug for WalletConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletConfig")
            .field("passphrase", &self.passphrase.as_ref().map(|_| "[REDACTED]"))
            .field("derivation", &self.derivation)
            .finish()
    }
}

impl WalletConfig {
    pub fn with_passphrase(mut self, passphrase: impl Into<String>) -> Self {
        self.passphrase.zeroize();
        self.passphrase = Some(passphrase.into());
        self
    }

    pub fn with_derivation(mut self, derivation: DerivationScheme) -> Self {
        self.derivation = derivation;
        self
    }

    /// Passphrase, or `""` when none is configured.
    pub fn passphrase(&self) -> &str {
        self.passphrase.as_deref().unwrap_or("")
    }

    pub fn derivation(&self) -> DerivationScheme {
        self.derivation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = WalletConfig::default();
        assert_eq!(config.passphrase(), "");
        assert_eq!(config.derivation(), DerivationScheme::Bip32);
        assert_eq!(config.derivation().deriver().name(), "bip32");
    }

    #[test]
    fn test_builders() {
        let config = WalletConfig::default()
            .with_passphrase("TREZOR")
            .with_derivation(DerivationScheme::HashChain);
        assert_eq!(config.passphrase(), "TREZOR");
        assert_eq!(config.derivation().deriver().name(), "hash_chain");
    }

    #[test]
    fn test_deserialize() {
        let config: WalletConfig =
            serde_json::from_str(r#"{"passphrase":"secret","derivation":"hash_chain"}"#).unwrap();
        assert_eq!(config.passphrase(), "secret");
        assert_eq!(config.derivation(), DerivationScheme::HashChain);

        let empty: WalletConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.derivation(), DerivationScheme::Bip32);
        assert_eq!(empty.passphrase(), "");

        let only_passphrase: WalletConfig =
            serde_json::from_str(r#"{"passphrase":"secret"}"#).unwrap();
        assert_eq!(only_passphrase.passphrase(), "secret");
        assert_eq!(only_passphrase.derivation(), DerivationScheme::Bip32);
    }

    #[test]
    fn test_serialize_omits_passphrase() {
        let config = WalletConfig::default().with_passphrase("secret");
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("secret"));
        assert!(json.contains("bip32"));
    }

    #[test]
    fn test_debug_redacts_passphrase() {
        let config = WalletConfig::default().with_passphrase("secret");
        let out = format!("{:?}", config);
        assert!(!out.contains("secret"));
        assert!(out.contains("REDACTED"));
    }
}
