// wallet-core/src/lib.rs

//! Hierarchical deterministic key derivation and account management.
//!
//! A [`Wallet`] owns one 64-byte seed (from a BIP-39 phrase or supplied
//! directly) and one [`KeyDerivation`] strategy. Accounts are derived on
//! demand by path, optionally pinned in an in-memory registry, and used to
//! sign hashes, EIP-191 messages and transactions. [`Wallet::close`] zeroes
//! every secret; dropping the wallet does the same.
//!
//! ```no_run
//! use hdwallet_core::{DerivationPath, Wallet, WalletConfig};
//!
//! # fn main() -> hdwallet_core::WalletResult<()> {
//! let phrase = hdwallet_core::generate_mnemonic(128)?;
//! let wallet = Wallet::from_mnemonic(phrase.phrase(), &WalletConfig::default())?;
//! let path: DerivationPath = "m/44'/60'/0'/0/0".parse()?;
//! let account = wallet.derive(&path, true)?;
//! println!("{}", account.address_hex());
//! # Ok(())
//! # }
//! ```

pub mod chains;
pub mod config;
pub mod crypto;
pub mod error;
pub mod wallet;

pub use chains::evm::{EvmAddress, EvmSigner};
pub use config::{DerivationScheme, WalletConfig};
pub use crypto::{
    generate_mnemonic, is_valid_word, new_random_seed, seed_from_mnemonic, validate_mnemonic,
    Bip32Deriver, ChildIndex, DerivationPath, DerivationPaths, HashChainDeriver, KeyDerivation,
    PrivateKey, Seed, WalletMnemonic, WordCount,
};
pub use error::{CryptoError, MnemonicError, WalletError, WalletResult};
pub use wallet::{Account, Wallet, WalletStatus};
