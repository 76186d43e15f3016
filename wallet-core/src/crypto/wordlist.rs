// wallet-core/src/crypto/wordlist.rs
//
// BIP-39 English dictionary (2048 words, 11 bits per word).
// The word table is static data from the `bip39` crate; the membership set is
// built once on first lookup and shared read-only by every thread.

use bip39::Language;
use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Number of entries in the dictionary (2^11).
pub const WORDLIST_LEN: usize = 2048;

static WORD_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| Language::English.word_list().iter().copied().collect());

/// The full English word table, in index order.
#[inline]
pub fn words() -> &'static [&'static str; WORDLIST_LEN] {
    Language::English.word_list()
}

#[inline]
pub fn contains(word: &str) -> bool {
    WORD_SET.contains(word)
}
