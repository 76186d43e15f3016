// wallet-core/tests/wallet_flow.rs
//
// End-to-end scenarios through the public wallet API.

use alloy::consensus::{Transaction, TxLegacy};
use alloy::primitives::{TxKind, B256, U256};
use hdwallet_core::{
    CryptoError, DerivationPath, DerivationPaths, DerivationScheme, Wallet, WalletConfig,
    WalletError, WalletStatus,
};

const PHRASE: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";
const FIRST_ADDRESS: &str = "0x9858EfFD232B4033E47d90003D41EC34EcaEda94";

fn open(config: &WalletConfig) -> Wallet {
    Wallet::from_mnemonic(PHRASE, config).expect("open wallet")
}

fn transfer() -> TxLegacy {
    TxLegacy {
        chain_id: None,
        nonce: 7,
        gas_price: 2_000_000_000,
        gas_limit: 21_000,
        to: TxKind::Call(
            "0x70997970C51812dc3A010C7d01b50e0d17dc79C8"
                .parse()
                .unwrap(),
        ),
        value: U256::from(100_000_000_000_000_000u128),
        ..Default::default()
    }
}

#[test]
fn test_reference_account_is_stable() {
    let path: DerivationPath = DerivationPaths::EVM_0.parse().unwrap();

    let first = open(&WalletConfig::default());
    let second = open(&WalletConfig::default());

    let a = first.derive(&path, true).unwrap();
    let b = second.derive(&path, true).unwrap();
    let again = first.derive(&path, false).unwrap();

    assert_eq!(a.address_hex(), FIRST_ADDRESS);
    assert_eq!(a.address(), b.address());
    assert_eq!(a.address(), again.address());
    assert_eq!(a.public_key_hex(), b.public_key_hex());
    assert_eq!(
        *first.private_key_hex(&a).unwrap(),
        *second.private_key_hex(&b).unwrap()
    );
}

#[test]
fn test_hash_chain_scheme_is_stable_and_distinct() {
    let config = WalletConfig::default().with_derivation(DerivationScheme::HashChain);
    let first = open(&config);
    let second = open(&config);

    let a = first.derive_index(0, false).unwrap();
    let b = second.derive_index(0, false).unwrap();
    assert_eq!(a, b);

    let bip32 = open(&WalletConfig::default()).derive_index(0, false).unwrap();
    assert_ne!(a.address(), bip32.address());
}

#[test]
fn test_derive_without_pin_is_transient() {
    let wallet = open(&WalletConfig::default());
    let account = wallet.derive_index(3, false).unwrap();

    assert!(!wallet.contains(&account));
    assert!(wallet.accounts().unwrap().is_empty());
    assert_eq!(
        wallet.private_key_hex(&account).unwrap_err(),
        WalletError::UnknownAccount(account.address())
    );
    assert_eq!(
        wallet.sign_hash(&account, &B256::ZERO).unwrap_err(),
        WalletError::UnknownAccount(account.address())
    );
    assert_eq!(
        wallet.sign_transaction(&account, transfer(), 1).unwrap_err(),
        WalletError::UnknownAccount(account.address())
    );
}

#[test]
fn test_pin_is_idempotent() {
    let wallet = open(&WalletConfig::default());
    let first = wallet.derive_index(0, true).unwrap();
    let second = wallet.derive_index(0, true).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.created_at(), second.created_at());
    assert_eq!(wallet.accounts().unwrap().len(), 1);
}

#[test]
fn test_unpin() {
    let wallet = open(&WalletConfig::default());
    let a = wallet.derive_index(0, true).unwrap();
    let b = wallet.derive_index(1, true).unwrap();

    wallet.unpin(&a).unwrap();

    assert!(!wallet.contains(&a));
    assert!(wallet.contains(&b));
    assert_eq!(wallet.accounts().unwrap(), vec![b.clone()]);
    assert_eq!(wallet.path(&a).unwrap_err(), WalletError::UnknownAccount(a.address()));
    assert_eq!(wallet.unpin(&a).unwrap_err(), WalletError::AccountNotFound(a.address()));

    let never_pinned = wallet.derive_index(9, false).unwrap();
    assert_eq!(
        wallet.unpin(&never_pinned).unwrap_err(),
        WalletError::AccountNotFound(never_pinned.address())
    );
}

#[test]
fn test_accessors() {
    let wallet = open(&WalletConfig::default());
    let account = wallet.derive_index(2, true).unwrap();

    assert_eq!(wallet.address_hex(&account).unwrap(), account.address_hex());
    assert_eq!(wallet.public_key_hex(&account).unwrap().len(), 128);
    assert_eq!(wallet.private_key_hex(&account).unwrap().len(), 64);
    assert_eq!(wallet.path(&account).unwrap(), DerivationPaths::evm(2));
    assert_eq!(wallet.account(&account.address()), Some(account.clone()));
    assert_eq!(account.index(), 2);
}

#[test]
fn test_sign_hash_and_message() {
    let wallet = open(&WalletConfig::default());
    let account = wallet.derive_index(0, true).unwrap();
    let hash = B256::repeat_byte(0xAB);

    let signature = wallet.sign_hash(&account, &hash).unwrap();
    assert!(Wallet::verify_hash(&account, &hash, &signature));
    assert!(!Wallet::verify_hash(&account, &B256::repeat_byte(0xAC), &signature));

    let signature = wallet.sign_message(&account, b"hello").unwrap();
    assert!(Wallet::verify_message(&account, b"hello", &signature));
    assert!(!Wallet::verify_message(&account, b"goodbye", &signature));
}

#[test]
fn test_sign_transaction() {
    let wallet = open(&WalletConfig::default());
    let account = wallet.derive_index(0, true).unwrap();

    let signed = wallet.sign_transaction(&account, transfer(), 1).unwrap();

    assert_eq!(signed.tx().chain_id(), Some(1));
    let recovered = signed
        .signature()
        .recover_address_from_prehash(&signed.signature_hash())
        .unwrap();
    assert_eq!(recovered, account.address());
}

#[test]
fn test_sign_transaction_refuses_other_chain() {
    let wallet = open(&WalletConfig::default());
    let account = wallet.derive_index(0, true).unwrap();

    let mut tx = transfer();
    tx.chain_id = Some(5);
    let result = wallet.sign_transaction(&account, tx, 1);
    assert!(matches!(result, Err(WalletError::Validation(_))));
}

#[test]
fn test_sign_transaction_refuses_foreign_account() {
    let wallet = open(&WalletConfig::default());
    let other = Wallet::from_seed(&[0x42; 64], &WalletConfig::default()).unwrap();
    let foreign = other.derive_index(0, true).unwrap();
    let ours = wallet.derive_index(0, true).unwrap();
    assert_ne!(foreign.address(), ours.address());

    assert_eq!(
        wallet.sign_transaction(&foreign, transfer(), 1).unwrap_err(),
        WalletError::UnknownAccount(foreign.address())
    );
}

#[test]
fn test_passphrase_signing() {
    let config = WalletConfig::default().with_passphrase("TREZOR");
    let wallet = open(&config);
    let account = wallet.derive_index(0, true).unwrap();
    let hash = B256::repeat_byte(0x11);

    let plain = wallet.sign_hash(&account, &hash).unwrap();
    let with_passphrase = wallet
        .sign_hash_with_passphrase(&account, &hash, "TREZOR")
        .unwrap();
    assert_eq!(plain, with_passphrase);

    assert_eq!(
        wallet
            .sign_hash_with_passphrase(&account, &hash, "wrong")
            .unwrap_err(),
        WalletError::InvalidPassphrase(account.address())
    );
    assert_eq!(
        wallet
            .sign_transaction_with_passphrase(&account, transfer(), 1, "")
            .unwrap_err(),
        WalletError::InvalidPassphrase(account.address())
    );

    let signed = wallet
        .sign_transaction_with_passphrase(&account, transfer(), 1, "TREZOR")
        .unwrap();
    let recovered = signed
        .signature()
        .recover_address_from_prehash(&signed.signature_hash())
        .unwrap();
    assert_eq!(recovered, account.address());
}

#[test]
fn test_passphrase_changes_accounts() {
    let plain = open(&WalletConfig::default()).derive_index(0, false).unwrap();
    let salted = open(&WalletConfig::default().with_passphrase("TREZOR"))
        .derive_index(0, false)
        .unwrap();
    assert_ne!(plain.address(), salted.address());
}

#[test]
fn test_seed_wallet() {
    let seed = hdwallet_core::seed_from_mnemonic(PHRASE, "").unwrap();
    let wallet = Wallet::from_seed(seed.as_bytes(), &WalletConfig::default()).unwrap();
    let account = wallet.derive_index(0, true).unwrap();
    assert_eq!(account.address_hex(), FIRST_ADDRESS);

    assert_eq!(
        Wallet::from_seed(&[0u8; 32], &WalletConfig::default()).unwrap_err(),
        WalletError::Crypto(CryptoError::InvalidSeedLength(32))
    );
}

#[test]
fn test_invalid_mnemonic_is_rejected() {
    assert!(Wallet::from_mnemonic("", &WalletConfig::default()).is_err());
    assert!(Wallet::from_mnemonic("abandon abandon abandon", &WalletConfig::default()).is_err());
}

#[test]
fn test_close() {
    let wallet = open(&WalletConfig::default());
    let account = wallet.derive_index(0, true).unwrap();

    assert_eq!(wallet.status(), WalletStatus::Open);
    assert!(wallet.close());
    assert!(!wallet.close());
    assert!(wallet.is_closed());

    assert!(!wallet.contains(&account));
    assert_eq!(wallet.derive_index(0, true).unwrap_err(), WalletError::WalletClosed);
    assert_eq!(
        wallet.private_key_hex(&account).unwrap_err(),
        WalletError::WalletClosed
    );
}
