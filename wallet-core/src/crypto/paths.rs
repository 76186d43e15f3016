// wallet-core/src/crypto/paths.rs
//
// Derivation Paths - BIP-32 path type, parser and BIP-44 builders
// Canonical EVM layout: m / purpose' / coin_type' / account' / change / address_index

use crate::error::{CryptoError, WalletResult};
use ::bip32::ChildNumber;
use std::fmt;
use std::str::FromStr;

/// SLIP-44 registered coin types used by the builders.
pub mod coin_type {
    pub const BITCOIN: u32 = 0;
    pub const ETHEREUM: u32 = 60;
}

/// Offset marking a hardened index (2^31).
pub const HARDENED_OFFSET: u32 = 0x8000_0000;

/// One level of a derivation path.
///
/// The raw `u32` encodes hardening in the top bit, the way BIP-32 serializes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChildIndex(u32);

impl ChildIndex {
    pub const fn normal(index: u32) -> Self {
        Self(index & !HARDENED_OFFSET)
    }

    pub const fn hardened(index: u32) -> Self {
        Self(index | HARDENED_OFFSET)
    }

    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Top bit included.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Index with the hardened bit stripped.
    #[inline]
    pub const fn index(self) -> u32 {
        self.0 & !HARDENED_OFFSET
    }

    #[inline]
    pub const fn is_hardened(self) -> bool {
        self.0 & HARDENED_OFFSET != 0
    }
}

impl fmt::Display for ChildIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_hardened() {
            write!(f, "{}'", self.index())
        } else {
            write!(f, "{}", self.index())
        }
    }
}

/// Location of a key in the tree.
///
/// Immutable once built: there are no mutating methods, derived accounts
/// hold their own copy.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DerivationPath(Vec<ChildIndex>);

/// `m/44'/60'/0'/0`; relative paths are appended to it.
pub const DEFAULT_ROOT_PATH: [ChildIndex; 4] = [
    ChildIndex::hardened(44),
    ChildIndex::hardened(coin_type::ETHEREUM),
    ChildIndex::hardened(0),
    ChildIndex::normal(0),
];

/// `m/44'/60'/0'/0/0`, the first account.
pub const DEFAULT_BASE_PATH: [ChildIndex; 5] = [
    DEFAULT_ROOT_PATH[0],
    DEFAULT_ROOT_PATH[1],
    DEFAULT_ROOT_PATH[2],
    DEFAULT_ROOT_PATH[3],
    ChildIndex::normal(0),
];

impl DerivationPath {
    pub fn new(components: Vec<ChildIndex>) -> Self {
        Self(components)
    }

    pub fn from_raw(raw: &[u32]) -> Self {
        Self(raw.iter().copied().map(ChildIndex::from_raw).collect())
    }

    /// `m/44'/60'/0'/0`
    pub fn default_root() -> Self {
        Self(DEFAULT_ROOT_PATH.to_vec())
    }

    /// [`DEFAULT_BASE_PATH`]
    pub fn default_base() -> Self {
        Self(DEFAULT_BASE_PATH.to_vec())
    }

    /// New path one level deeper.
    pub fn child(&self, index: ChildIndex) -> Self {
        let mut components = self.0.clone();
        components.push(index);
        Self(components)
    }

    #[inline]
    pub fn components(&self) -> &[ChildIndex] {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Unhardened value of the last level (`address_index` for BIP-44 paths),
    /// `0` for the master path.
    pub fn address_index(&self) -> u32 {
        self.0.last().map(|c| c.index()).unwrap_or(0)
    }

    /// Parse `m/44'/60'/0'/0/0` style paths.
    ///
    /// Each level goes through `bip32::ChildNumber`; this function only adds:
    /// - `'`, `h` and `H` mark hardened levels
    /// - whitespace is ignored
    /// - a path without the `m` prefix is relative and is appended to
    ///   [`DEFAULT_ROOT_PATH`]
    pub fn parse(path: &str) -> WalletResult<Self> {
        let compact: String = path.chars().filter(|c| !c.is_whitespace()).collect();
        let invalid = || CryptoError::InvalidPath(path.trim().to_string());

        if compact.is_empty() {
            return Err(invalid().into());
        }

        let (mut components, rest) = match compact.strip_prefix('m') {
            Some("") => return Ok(Self(Vec::new())),
            Some(rest) => (
                Vec::new(),
                rest.strip_prefix('/').ok_or_else(invalid)?,
            ),
            None => (DEFAULT_ROOT_PATH.to_vec(), compact.as_str()),
        };

        for segment in rest.split('/') {
            // `bip32` only knows the `'` marker
            let normalized = match segment
                .strip_suffix('h')
                .or_else(|| segment.strip_suffix('H'))
            {
                Some(digits) => format!("{}'", digits),
                None => segment.to_string(),
            };
            let child = ChildNumber::from_str(&normalized).map_err(|_| invalid())?;

            components.push(if child.is_hardened() {
                ChildIndex::hardened(child.index())
            } else {
                ChildIndex::normal(child.index())
            });
        }

        Ok(Self(components))
    }
}

impl FromStr for DerivationPath {
    type Err = crate::error::WalletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("m")?;
        for component in &self.0 {
            write!(f, "/{}", component)?;
        }
        Ok(())
    }
}

/// Pre-built BIP-44 paths.
pub struct DerivationPaths;

impl DerivationPaths {
    pub const EVM_0: &'static str = "m/44'/60'/0'/0/0";

    /// `m/44'/60'/0'/0/{index}`
    #[inline]
    pub fn evm(index: u32) -> DerivationPath {
        Self::bip44(44, coin_type::ETHEREUM, 0, 0, index)
    }

    /// `m/44'/60'/{account}'/0/{index}`
    #[inline]
    pub fn evm_account(account: u32, index: u32) -> DerivationPath {
        Self::bip44(44, coin_type::ETHEREUM, account, 0, index)
    }

    /// `m/{purpose}'/{coin_type}'/{account}'/{change}/{index}`
    pub fn bip44(purpose: u32, coin_type: u32, account: u32, change: u32, index: u32) -> DerivationPath {
        DerivationPath::new(vec![
            ChildIndex::hardened(purpose),
            ChildIndex::hardened(coin_type),
            ChildIndex::hardened(account),
            ChildIndex::normal(change),
            ChildIndex::normal(index),
        ])
    }
}
