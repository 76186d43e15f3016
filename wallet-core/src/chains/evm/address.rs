// wallet-core/src/chains/evm/address.rs
//
// Account addresses: last 20 bytes of Keccak-256(uncompressed pubkey[1..])

use crate::crypto::key_deriver::{public_key_raw, PrivateKey};
use crate::error::{CryptoError, WalletResult};
use alloy::primitives::Address;
use k256::PublicKey;
use tiny_keccak::{Hasher, Keccak};

/// Address mapping and EIP-55 text helpers. Holds no state.
pub struct EvmAddress;

impl EvmAddress {
    pub fn from_public_key(public_key: &PublicKey) -> Address {
        let mut digest = [0u8; 32];
        let mut keccak = Keccak::v256();
        keccak.update(&public_key_raw(public_key));
        keccak.finalize(&mut digest);

        Address::from_slice(&digest[12..])
    }

    pub fn from_private_key(private_key: &PrivateKey) -> WalletResult<Address> {
        Ok(Self::from_public_key(&private_key.public_key()?))
    }

    /// Parse `0x` + 40 hex chars.
    ///
    /// All-lowercase and all-uppercase input is accepted as is; mixed case
    /// must carry a correct EIP-55 checksum.
    pub fn parse(text: &str) -> WalletResult<Address> {
        let invalid = || CryptoError::InvalidKeyFormat(format!("not an address: {:?}", text));
        let digits = text.strip_prefix("0x").ok_or_else(invalid)?;
        let mixed_case = digits.chars().any(|c| c.is_ascii_lowercase())
            && digits.chars().any(|c| c.is_ascii_uppercase());

        let parsed = if mixed_case {
            Address::parse_checksummed(text, None).ok()
        } else {
            text.parse::<Address>().ok()
        };
        parsed.ok_or_else(|| invalid().into())
    }

    #[inline]
    pub fn is_valid(text: &str) -> bool {
        Self::parse(text).is_ok()
    }

    /// Re-render an address with its EIP-55 checksum.
    pub fn to_checksum(text: &str) -> WalletResult<String> {
        Ok(Self::parse(text)?.to_checksum(None))
    }

    /// Byte equality of two textual addresses; `false` if either is invalid.
    pub fn equals(a: &str, b: &str) -> bool {
        matches!((Self::parse(a), Self::parse(b)), (Ok(a), Ok(b)) if a == b)
    }
}
