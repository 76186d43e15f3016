// wallet-core/src/wallet/mod.rs

//! Wallet engine
//!
//! - **Account**: public view of a derived key ([`Account`]).
//! - **Registry**: pinned accounts and their keys behind a reader/writer lock.
//! - **Wallet**: seed custody, derivation, signing and explicit close ([`Wallet`]).

pub mod account;
pub mod hd_wallet;
mod registry;

pub use account::Account;
pub use hd_wallet::{Wallet, WalletStatus};
