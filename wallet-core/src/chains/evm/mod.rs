// wallet-core/src/chains/evm/mod.rs

//! Ethereum Virtual Machine (EVM) account support
//!
//! - **Address Derivation**: Keccak-256 addresses with EIP-55 rendering via [`EvmAddress`].
//! - **Signing**: raw hashes, EIP-191 messages and EIP-155 transactions via [`EvmSigner`],
//!   each signature checked by recovering its signer.

pub mod address;
pub mod signer;

pub use address::EvmAddress;
pub use signer::EvmSigner;
