// wallet-core/src/crypto/mod.rs

//! Core Cryptography Module
//!
//! - **Mnemonic**: BIP-39 generation/validation over a lazily indexed dictionary ([`WalletMnemonic`]).
//! - **Seed**: PBKDF2-HMAC-SHA512 seed derivation and random seeds ([`Seed`]).
//! - **Derivation Paths**: BIP-32 path type, parser and BIP-44 builders ([`DerivationPath`]).
//! - **Key Derivation**: pluggable `(seed, path) -> key` strategies behind [`KeyDerivation`].

pub mod key_deriver;
pub mod mnemonic;
pub mod paths;
pub mod seed;
pub mod wordlist;

pub use key_deriver::{
    Bip32Deriver, DerivedKey, HashChainDeriver, KeyDerivation, PrivateKey,
};
pub use mnemonic::{generate_mnemonic, is_valid_word, validate_mnemonic, WalletMnemonic, WordCount};
pub use paths::{ChildIndex, DerivationPath, DerivationPaths, DEFAULT_BASE_PATH, DEFAULT_ROOT_PATH};
pub use seed::{new_random_seed, seed_from_mnemonic, Seed};
