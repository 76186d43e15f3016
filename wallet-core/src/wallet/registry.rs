// wallet-core/src/wallet/registry.rs
//
// Pinned-account registry: address -> (account, path, private key).
// Readers share the lock; pin, unpin and wipe take it exclusively.

use super::account::Account;
use crate::crypto::key_deriver::PrivateKey;
use crate::crypto::paths::DerivationPath;
use crate::error::{WalletError, WalletResult};
use alloy::primitives::Address;
use parking_lot::RwLock;
use std::collections::HashMap;

struct PinnedEntry {
    account: Account,
    private_key: PrivateKey,
}

#[derive(Default)]
struct RegistryState {
    /// Pin order. Always holds exactly the keys of `entries`.
    order: Vec<Address>,
    entries: HashMap<Address, PinnedEntry>,
}

impl RegistryState {
    fn zeroize_keys(&mut self) -> usize {
        for entry in self.entries.values_mut() {
            entry.private_key.wipe();
        }
        self.entries.len()
    }
}

#[derive(Default)]
pub(crate) struct AccountRegistry {
    state: RwLock<RegistryState>,
}

impl AccountRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `account` unless its address is already pinned.
    ///
    /// Returns the registered account; when the address was already present
    /// the earlier entry wins and `private_key` is dropped (and zeroized).
    pub fn pin(&self, account: Account, private_key: PrivateKey) -> (Account, bool) {
        let mut state = self.state.write();
        if let Some(existing) = state.entries.get(&account.address()) {
            return (existing.account.clone(), false);
        }
        let address = account.address();
        state.order.push(address);
        state.entries.insert(
            address,
            PinnedEntry {
                account: account.clone(),
                private_key,
            },
        );
        (account, true)
    }

    pub fn contains(&self, address: &Address) -> bool {
        self.state.read().entries.contains_key(address)
    }

    pub fn len(&self) -> usize {
        self.state.read().entries.len()
    }

    /// Snapshot of the pinned accounts in pin order.
    pub fn accounts(&self) -> Vec<Account> {
        let state = self.state.read();
        state
            .order
            .iter()
            .filter_map(|address| state.entries.get(address))
            .map(|entry| entry.account.clone())
            .collect()
    }

    pub fn get(&self, address: &Address) -> Option<Account> {
        self.state
            .read()
            .entries
            .get(address)
            .map(|entry| entry.account.clone())
    }

    pub fn path_of(&self, address: &Address) -> Option<DerivationPath> {
        self.state
            .read()
            .entries
            .get(address)
            .map(|entry| entry.account.path().clone())
    }

    /// Run `f` with the pinned private key, under the shared lock.
    pub fn with_key<R>(&self, address: &Address, f: impl FnOnce(&PrivateKey) -> R) -> Option<R> {
        let state = self.state.read();
        state.entries.get(address).map(|entry| f(&entry.private_key))
    }

    /// Remove a pinned account and zero its private key.
    pub fn unpin(&self, address: &Address) -> WalletResult<Account> {
        let mut state = self.state.write();
        let mut entry = state
            .entries
            .remove(address)
            .ok_or(WalletError::AccountNotFound(*address))?;
        state.order.retain(|a| a != address);
        entry.private_key.wipe();
        Ok(entry.account)
    }

    /// Zero every private key, then forget all entries.
    pub fn wipe(&self) -> usize {
        let mut state = self.state.write();
        let wiped = state.zeroize_keys();
        state.entries.clear();
        state.order.clear();
        wiped
    }
}
