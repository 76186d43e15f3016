// wallet-core/src/wallet/hd_wallet.rs
//
// HD Wallet Engine - seed custody, account derivation, signing, close
//
// ┌──────────────────────────────────────────────────────────────┐
// │  RwLock<SecretState>   seed, retained mnemonic, closed flag  │
// │          │ read                                              │
// │          ▼                                                   │
// │  Arc<dyn KeyDerivation> ──► DerivedKey ──► AccountRegistry   │
// │                                              (own RwLock)    │
// │  close(): write lock, zero seed + mnemonic, wipe registry    │
// └──────────────────────────────────────────────────────────────┘
//
// Lock order is always SecretState, then registry. `close` holds the
// secret write lock while wiping, so no derive can pin into a closed wallet.

use super::account::Account;
use super::registry::AccountRegistry;
use crate::chains::evm::EvmSigner;
use crate::config::WalletConfig;
use crate::crypto::key_deriver::{DerivedKey, KeyDerivation, PrivateKey};
use crate::crypto::mnemonic::WalletMnemonic;
use crate::crypto::paths::{ChildIndex, DerivationPath};
use crate::crypto::seed::Seed;
use crate::error::{CryptoError, WalletError, WalletResult};
use alloy::{
    consensus::{SignableTransaction, Signed},
    primitives::{Address, Signature, B256},
};
use parking_lot::{RwLock, RwLockReadGuard};
use std::sync::Arc;
use zeroize::{Zeroize, Zeroizing};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalletStatus {
    Open,
    Closed,
}

struct SecretState {
    seed: Seed,
    /// Kept only for wallets opened from a phrase; needed to re-derive the
    /// seed under another passphrase.
    mnemonic: Option<WalletMnemonic>,
    closed: bool,
}

/// Deterministic account engine over one seed.
///
/// All methods take `&self` and may be called from many threads at once;
/// share the wallet through an `Arc`. Dropping the wallet closes it.
pub struct Wallet {
    secrets: RwLock<SecretState>,
    kdf: Arc<dyn KeyDerivation>,
    registry: AccountRegistry,
}

impl std::fmt::Debug for Wallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wallet")
            .field("scheme", &self.scheme())
            .field("status", &self.status())
            .field("pinned", &self.registry.len())
            .finish_non_exhaustive()
    }
}

impl Wallet {
    // =========================================================================
    // CONSTRUCTORS
    // =========================================================================

    /// Open a wallet from a BIP-39 phrase.
    ///
    /// The phrase is fully validated (count, dictionary, checksum) and the
    /// seed is stretched with the configured passphrase.
    pub fn from_mnemonic(phrase: &str, config: &WalletConfig) -> WalletResult<Self> {
        let mnemonic = WalletMnemonic::from_phrase(phrase)?;
        let seed = Seed::from_mnemonic(&mnemonic, config.passphrase())?;
        Ok(Self::build(seed, Some(mnemonic), config.derivation().deriver()))
    }

    /// Open a wallet from a raw 64-byte seed.
    ///
    /// The configured passphrase has nothing to salt here and is ignored.
    pub fn from_seed(seed: &[u8], config: &WalletConfig) -> WalletResult<Self> {
        let seed = Seed::from_slice(seed)?;
        Ok(Self::build(seed, None, config.derivation().deriver()))
    }

    /// Open a wallet with a caller-supplied derivation strategy.
    pub fn with_key_derivation(seed: Seed, kdf: Arc<dyn KeyDerivation>) -> Self {
        Self::build(seed, None, kdf)
    }

    fn build(seed: Seed, mnemonic: Option<WalletMnemonic>, kdf: Arc<dyn KeyDerivation>) -> Self {
        tracing::info!(
            scheme = kdf.name(),
            from_mnemonic = mnemonic.is_some(),
            "wallet opened"
        );
        Self {
            secrets: RwLock::new(SecretState {
                seed,
                mnemonic,
                closed: false,
            }),
            kdf,
            registry: AccountRegistry::new(),
        }
    }

    /// Name of the active derivation strategy (`"bip32"`, `"hash_chain"`, ...).
    pub fn scheme(&self) -> &'static str {
        self.kdf.name()
    }

    pub fn status(&self) -> WalletStatus {
        if self.secrets.read().closed {
            WalletStatus::Closed
        } else {
            WalletStatus::Open
        }
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.status() == WalletStatus::Closed
    }

    fn open_secrets(&self) -> WalletResult<RwLockReadGuard<'_, SecretState>> {
        let secrets = self.secrets.read();
        if secrets.closed {
            return Err(WalletError::WalletClosed);
        }
        Ok(secrets)
    }

    fn registered_path(&self, account: &Account) -> WalletResult<DerivationPath> {
        self.registry
            .path_of(&account.address())
            .ok_or(WalletError::UnknownAccount(account.address()))
    }

    // =========================================================================
    // DERIVATION & REGISTRY
    // =========================================================================

    /// Derive the account at `path`; with `pin` keep it in the registry.
    ///
    /// Pinning an address that is already registered leaves the registry
    /// untouched and returns the registered account.
    pub fn derive(&self, path: &DerivationPath, pin: bool) -> WalletResult<Account> {
        let secrets = self.open_secrets()?;
        let DerivedKey {
            private_key,
            public_key,
            address,
            path,
        } = DerivedKey::derive(self.kdf.as_ref(), &secrets.seed, path)?;

        let account = Account::new(address, path, public_key);
        if !pin {
            tracing::debug!(path = %account.path(), %address, "derived account");
            return Ok(account);
        }

        let (account, inserted) = self.registry.pin(account, private_key);
        tracing::debug!(path = %account.path(), %address, inserted, "pinned account");
        Ok(account)
    }

    /// Derive `m/44'/60'/0'/0/{index}`.
    pub fn derive_index(&self, index: u32, pin: bool) -> WalletResult<Account> {
        let path = DerivationPath::default_root().child(ChildIndex::normal(index));
        self.derive(&path, pin)
    }

    /// Pinned accounts in pin order.
    pub fn accounts(&self) -> WalletResult<Vec<Account>> {
        let _secrets = self.open_secrets()?;
        Ok(self.registry.accounts())
    }

    /// Pinned account with this address.
    pub fn account(&self, address: &Address) -> Option<Account> {
        self.registry.get(address)
    }

    /// `true` while the account is pinned. Always `false` once closed.
    pub fn contains(&self, account: &Account) -> bool {
        self.registry.contains(&account.address())
    }

    pub fn path(&self, account: &Account) -> WalletResult<DerivationPath> {
        let _secrets = self.open_secrets()?;
        self.registered_path(account)
    }

    /// Forget a pinned account and zero its key.
    pub fn unpin(&self, account: &Account) -> WalletResult<()> {
        let _secrets = self.open_secrets()?;
        let removed = self.registry.unpin(&account.address())?;
        tracing::debug!(path = %removed.path(), address = %removed.address(), "unpinned account");
        Ok(())
    }

    // =========================================================================
    // HEX ACCESSORS
    // =========================================================================

    /// Private key of a pinned account as 64 lowercase hex chars.
    pub fn private_key_hex(&self, account: &Account) -> WalletResult<Zeroizing<String>> {
        let _secrets = self.open_secrets()?;
        self.registry
            .with_key(&account.address(), PrivateKey::to_hex)
            .ok_or(WalletError::UnknownAccount(account.address()))
    }

    /// Uncompressed public key of a pinned account, without the `04` prefix.
    pub fn public_key_hex(&self, account: &Account) -> WalletResult<String> {
        let _secrets = self.open_secrets()?;
        self.registry
            .get(&account.address())
            .map(|registered| registered.public_key_hex())
            .ok_or(WalletError::UnknownAccount(account.address()))
    }

    /// EIP-55 address of a pinned account.
    pub fn address_hex(&self, account: &Account) -> WalletResult<String> {
        let _secrets = self.open_secrets()?;
        self.registry
            .get(&account.address())
            .map(|registered| registered.address_hex())
            .ok_or(WalletError::UnknownAccount(account.address()))
    }

    // =========================================================================
    // SIGNING
    // =========================================================================

    fn with_signer<R>(
        &self,
        account: &Account,
        f: impl FnOnce(&EvmSigner) -> WalletResult<R>,
    ) -> WalletResult<R> {
        let _secrets = self.open_secrets()?;
        self.registry
            .with_key(&account.address(), |key| EvmSigner::new(key).and_then(|s| f(&s)))
            .ok_or(WalletError::UnknownAccount(account.address()))?
    }

    /// Sign a 32-byte prehash with a pinned account's key.
    pub fn sign_hash(&self, account: &Account, hash: &B256) -> WalletResult<Signature> {
        let signature = self.with_signer(account, |signer| signer.sign_hash(hash))?;
        tracing::debug!(address = %account.address(), "signed hash");
        Ok(signature)
    }

    /// EIP-191 personal-sign with a pinned account's key.
    pub fn sign_message(&self, account: &Account, message: &[u8]) -> WalletResult<Signature> {
        let signature = self.with_signer(account, |signer| signer.sign_message(message))?;
        tracing::debug!(address = %account.address(), len = message.len(), "signed message");
        Ok(signature)
    }

    /// Sign `tx` for `chain_id` with a key freshly derived from the seed.
    ///
    /// The key is re-derived from the account's registered path. If the
    /// derived address, or the address recovered from the signature, is not
    /// the account's address the call fails with
    /// [`CryptoError::SignerMismatch`].
    pub fn sign_transaction<T>(&self, account: &Account, tx: T, chain_id: u64) -> WalletResult<Signed<T>>
    where
        T: SignableTransaction<Signature>,
    {
        let key = {
            let secrets = self.open_secrets()?;
            let path = self.registered_path(account)?;
            let derived = DerivedKey::derive(self.kdf.as_ref(), &secrets.seed, &path)?;
            if derived.address != account.address() {
                tracing::warn!(expected = %account.address(), derived = %derived.address, %path, "re-derived key does not match account");
                return Err(CryptoError::SignerMismatch {
                    expected: account.address(),
                    recovered: derived.address,
                }
                .into());
            }
            derived.private_key
        };

        let signed = EvmSigner::new(&key)?.sign_transaction(tx, chain_id)?;
        tracing::debug!(address = %account.address(), chain_id, "signed transaction");
        Ok(signed)
    }

    /// Key for `account` under `passphrase`, re-derived from the retained
    /// mnemonic. The stretched seed is computed outside any lock.
    fn passphrase_key(&self, account: &Account, passphrase: &str) -> WalletResult<PrivateKey> {
        let (mnemonic, path) = {
            let secrets = self.open_secrets()?;
            let path = self.registered_path(account)?;
            let mnemonic = secrets
                .mnemonic
                .clone()
                .ok_or(WalletError::PassphraseUnsupported)?;
            (mnemonic, path)
        };

        let seed = Seed::from_mnemonic(&mnemonic, passphrase)?;
        let derived = DerivedKey::derive(self.kdf.as_ref(), &seed, &path)?;
        if derived.address != account.address() {
            tracing::warn!(address = %account.address(), %path, "passphrase does not reproduce account");
            return Err(WalletError::InvalidPassphrase(account.address()));
        }
        Ok(derived.private_key)
    }

    /// Like [`Wallet::sign_hash`], but the key is derived through `passphrase`.
    ///
    /// Fails with [`WalletError::InvalidPassphrase`] when the passphrase does
    /// not lead back to the account, and with
    /// [`WalletError::PassphraseUnsupported`] for wallets opened from a seed.
    pub fn sign_hash_with_passphrase(
        &self,
        account: &Account,
        hash: &B256,
        passphrase: &str,
    ) -> WalletResult<Signature> {
        let key = self.passphrase_key(account, passphrase)?;
        let signature = EvmSigner::new(&key)?.sign_hash(hash)?;
        tracing::debug!(address = %account.address(), "signed hash with passphrase");
        Ok(signature)
    }

    /// Like [`Wallet::sign_transaction`], but the key is derived through `passphrase`.
    pub fn sign_transaction_with_passphrase<T>(
        &self,
        account: &Account,
        tx: T,
        chain_id: u64,
        passphrase: &str,
    ) -> WalletResult<Signed<T>>
    where
        T: SignableTransaction<Signature>,
    {
        let key = self.passphrase_key(account, passphrase)?;
        let signed = EvmSigner::new(&key)?.sign_transaction(tx, chain_id)?;
        tracing::debug!(address = %account.address(), chain_id, "signed transaction with passphrase");
        Ok(signed)
    }

    /// `true` if `signature` over `hash` recovers to the account's address.
    pub fn verify_hash(account: &Account, hash: &B256, signature: &Signature) -> bool {
        signature
            .recover_address_from_prehash(hash)
            .map(|recovered| recovered == account.address())
            .unwrap_or(false)
    }

    /// `true` if `signature` is an EIP-191 signature of `message` by the account.
    pub fn verify_message(account: &Account, message: &[u8], signature: &Signature) -> bool {
        signature
            .recover_address_from_msg(message)
            .map(|recovered| recovered == account.address())
            .unwrap_or(false)
    }

    // =========================================================================
    // LIFECYCLE
    // =========================================================================

    /// Zero the seed, the retained mnemonic and every pinned key.
    ///
    /// Returns `true` on the call that actually closed the wallet; later
    /// calls do nothing and return `false`.
    pub fn close(&self) -> bool {
        let mut secrets = self.secrets.write();
        if secrets.closed {
            return false;
        }

        secrets.seed.zeroize();
        if let Some(mut mnemonic) = secrets.mnemonic.take() {
            mnemonic.zeroize();
        }
        let wiped = self.registry.wipe();
        secrets.closed = true;

        tracing::info!(scheme = self.kdf.name(), wiped, "wallet closed");
        true
    }
}

impl Drop for Wallet {
    fn drop(&mut self) {
        self.close();
    }
}

// =============================================================================
// UNIT TESTS
// =============================================================================
