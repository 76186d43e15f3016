// wallet-core/src/error.rs
//
// Error kinds for the HD engine. Messages carry addresses, paths, counts and
// word positions only. Seed bytes, key bytes, passphrases and mnemonic words
// never appear in an error.

use alloy::primitives::Address;
use thiserror::Error;

pub type WalletResult<T> = std::result::Result<T, WalletError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WalletError {
    #[error("Mnemonic Error: {0}")]
    Mnemonic(#[from] MnemonicError),

    #[error("Cryptography Error: {0}")]
    Crypto(#[from] CryptoError),

    #[error("Unknown account {0}: not registered with this wallet")]
    UnknownAccount(Address),

    #[error("Account {0} not found among pinned accounts")]
    AccountNotFound(Address),

    #[error("Wallet is closed")]
    WalletClosed,

    #[error("Passphrase does not reproduce account {0}")]
    InvalidPassphrase(Address),

    #[error("Passphrase signing requires a wallet opened from a mnemonic")]
    PassphraseUnsupported,

    #[error("Validation Error: {0}")]
    Validation(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MnemonicError {
    #[error("Mnemonic is empty.")]
    Empty,

    #[error("Invalid entropy size: {0} bits. Expected 128, 160, 192, 224 or 256.")]
    InvalidEntropy(usize),

    #[error("Invalid word count: {0}. Expected 12, 15, 18, 21 or 24 words.")]
    InvalidWordCount(usize),

    #[error("Word at position {position} not found in the BIP39 wordlist.")]
    UnknownWord { position: usize },

    #[error("Checksum validation failed.")]
    ChecksumFailed,

    #[error("BIP39 internal error: {0}")]
    Bip39Error(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CryptoError {
    #[error("Invalid seed length: expected 64 bytes, got {0}")]
    InvalidSeedLength(usize),

    #[error("Invalid derivation path '{0}'")]
    InvalidPath(String),

    #[error("Key derivation failed: {0}")]
    DerivationFailed(String),

    #[error("Invalid key format: {0}")]
    InvalidKeyFormat(String),

    #[error("Signing failed: {0}")]
    SigningFailed(String),

    #[error("Signer mismatch: expected {expected}, recovered {recovered}")]
    SignerMismatch { expected: Address, recovered: Address },

    #[error("Random source failure: {0}")]
    RandomSource(String),
}
