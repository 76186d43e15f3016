// wallet-core/src/wallet/account.rs

use crate::crypto::key_deriver::public_key_raw;
use crate::crypto::paths::DerivationPath;
use alloy::primitives::Address;
use chrono::{DateTime, Utc};
use k256::PublicKey;

/// Public view of a derived account.
///
/// Carries no secret material: the private key stays in the wallet's
/// registry and is reached through the wallet's accessors. Two accounts are
/// equal when address and path match, regardless of when they were derived.
#[derive(Debug, Clone)]
pub struct Account {
    address: Address,
    path: DerivationPath,
    index: u32,
    public_key: PublicKey,
    created_at: DateTime<Utc>,
}

impl PartialEq for Account {
    fn eq(&self, other: &Self) -> bool {
        self.address == other.address && self.path == other.path
    }
}

impl Eq for Account {}

impl Account {
    pub(crate) fn new(address: Address, path: DerivationPath, public_key: PublicKey) -> Self {
        Self {
            index: path.address_index(),
            address,
            path,
            public_key,
            created_at: Utc::now(),
        }
    }

    #[inline]
    pub fn address(&self) -> Address {
        self.address
    }

    #[inline]
    pub fn path(&self) -> &DerivationPath {
        &self.path
    }

    /// Last path level without the hardened bit.
    #[inline]
    pub fn index(&self) -> u32 {
        self.index
    }

    #[inline]
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    #[inline]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// EIP-55 checksummed, `0x`-prefixed.
    pub fn address_hex(&self) -> String {
        self.address.to_checksum(None)
    }

    /// Uncompressed public key without the `04` prefix (128 hex chars).
    pub fn public_key_hex(&self) -> String {
        hex::encode(public_key_raw(&self.public_key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chains::evm::EvmAddress;
    use crate::crypto::key_deriver::PrivateKey;
    use crate::crypto::paths::DerivationPaths;

    const ANVIL_PRIVATE_KEY: &str =
        "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const ANVIL_ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

    fn anvil_account(index: u32) -> Account {
        let key = PrivateKey::from_slice(&hex::decode(ANVIL_PRIVATE_KEY).unwrap()).unwrap();
        let public_key = key.public_key().unwrap();
        Account::new(
            EvmAddress::from_public_key(&public_key),
            DerivationPaths::evm(index),
            public_key,
        )
    }

    #[test]
    fn test_accessors() {
        let account = anvil_account(4);
        assert_eq!(account.index(), 4);
        assert_eq!(account.address_hex(), ANVIL_ADDRESS);
        assert_eq!(account.public_key_hex().len(), 128);
        assert_eq!(account.path().to_string(), "m/44'/60'/0'/0/4");
    }

    #[test]
    fn test_equality_ignores_timestamp() {
        let a = anvil_account(0);
        std::thread::sleep(std::time::Duration::from_millis(2));
        let b = anvil_account(0);
        assert_ne!(a.created_at(), b.created_at());
        assert_eq!(a, b);
        assert_ne!(a, anvil_account(1));
    }
}
