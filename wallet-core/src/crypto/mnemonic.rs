// wallet-core/src/crypto/mnemonic.rs
//
// Mnemonic Module - BIP-39 generation and validation
// Entropy: OS CSPRNG. Validation: word count, dictionary membership, checksum.

use crate::crypto::wordlist;
use crate::error::{CryptoError, MnemonicError, WalletError, WalletResult};
use bip39::Mnemonic;
use rand::{rngs::OsRng, RngCore};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Supported mnemonic lengths
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordCount {
    /// 12 words (128-bit entropy)
    Twelve = 12,
    /// 15 words (160-bit entropy)
    Fifteen = 15,
    /// 18 words (192-bit entropy)
    Eighteen = 18,
    /// 21 words (224-bit entropy)
    TwentyOne = 21,
    /// 24 words (256-bit entropy)
    TwentyFour = 24,
}

impl WordCount {
    /// Map an entropy size in bits to its word count.
    ///
    /// Only 128, 160, 192, 224 and 256 are accepted.
    pub fn from_entropy_bits(bits: usize) -> WalletResult<Self> {
        match bits {
            128 => Ok(WordCount::Twelve),
            160 => Ok(WordCount::Fifteen),
            192 => Ok(WordCount::Eighteen),
            224 => Ok(WordCount::TwentyOne),
            256 => Ok(WordCount::TwentyFour),
            other => Err(MnemonicError::InvalidEntropy(other).into()),
        }
    }

    pub fn from_words(count: usize) -> WalletResult<Self> {
        match count {
            12 => Ok(WordCount::Twelve),
            15 => Ok(WordCount::Fifteen),
            18 => Ok(WordCount::Eighteen),
            21 => Ok(WordCount::TwentyOne),
            24 => Ok(WordCount::TwentyFour),
            other => Err(MnemonicError::InvalidWordCount(other).into()),
        }
    }

    #[inline]
    pub const fn entropy_bytes(self) -> usize {
        self.entropy_bits() / 8
    }

    /// `words / 3 * 32`
    #[inline]
    pub const fn entropy_bits(self) -> usize {
        (self as usize) / 3 * 32
    }
}

/// A validated BIP-39 phrase.
///
/// The phrase is kept whitespace-normalised and is overwritten with zeros
/// on drop. `Debug` never prints the words.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct WalletMnemonic {
    phrase: String,
    word_count: usize,
}

impl std::fmt::Debug for WalletMnemonic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletMnemonic")
            .field("word_count", &self.word_count)
            .field("phrase", &"[REDACTED]")
            .finish()
    }
}

impl WalletMnemonic {
    // =========================================================================
    // CONSTRUCTORS
    // =========================================================================

    /// Generate a fresh phrase of the given length.
    pub fn generate(word_count: WordCount) -> WalletResult<Self> {
        let entropy_size = word_count.entropy_bytes();

        let mut entropy = [0u8; 32];
        let filled = OsRng.try_fill_bytes(&mut entropy[..entropy_size]);
        if let Err(e) = filled {
            entropy.zeroize();
            return Err(CryptoError::RandomSource(e.to_string()).into());
        }

        let mnemonic = Mnemonic::from_entropy(&entropy[..entropy_size]);
        entropy.zeroize();
        let mnemonic =
            mnemonic.map_err(|e| WalletError::Mnemonic(MnemonicError::Bip39Error(e.to_string())))?;

        Ok(Self {
            phrase: mnemonic.to_string(),
            word_count: word_count as usize,
        })
    }

    /// Parse and fully validate a phrase.
    ///
    /// Checks, in order: non-empty, word count, every word in the
    /// dictionary, BIP-39 checksum.
    pub fn from_phrase(phrase: &str) -> WalletResult<Self> {
        let words = phrase.split_whitespace().collect::<Vec<_>>();
        if words.is_empty() {
            return Err(MnemonicError::Empty.into());
        }
        let count = WordCount::from_words(words.len())? as usize;

        if let Some(position) = words.iter().position(|w| !wordlist::contains(w)) {
            return Err(MnemonicError::UnknownWord { position }.into());
        }

        let normalized = words.join(" ");
        Mnemonic::parse(normalized.as_str()).map_err(map_bip39_error)?;

        Ok(Self {
            phrase: normalized,
            word_count: count,
        })
    }

    // =========================================================================
    // GETTERS
    // =========================================================================

    /// The phrase. Handle with care: never log it.
    #[inline]
    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    #[inline]
    pub fn word_count(&self) -> usize {
        self.word_count
    }

    pub fn words(&self) -> Vec<&str> {
        self.phrase.split_whitespace().collect()
    }

    pub fn strength_bits(&self) -> usize {
        WordCount::from_words(self.word_count)
            .map(WordCount::entropy_bits)
            .unwrap_or(0)
    }
}

fn map_bip39_error(e: bip39::Error) -> WalletError {
    let err = match e {
        bip39::Error::BadWordCount(n) => MnemonicError::InvalidWordCount(n),
        bip39::Error::UnknownWord(position) => MnemonicError::UnknownWord { position },
        bip39::Error::InvalidChecksum => MnemonicError::ChecksumFailed,
        other => MnemonicError::Bip39Error(other.to_string()),
    };
    WalletError::Mnemonic(err)
}

// =============================================================================
// GENERATION & VALIDATION
// =============================================================================

/// Generate a new mnemonic from `entropy_bits` of OS randomness.
///
/// Produces `entropy_bits / 32 * 3` words. Each 11-bit word index is an
/// unbiased slice of the entropy (2048 = 2^11), the last word carries the
/// checksum bits.
pub fn generate_mnemonic(entropy_bits: usize) -> WalletResult<WalletMnemonic> {
    let word_count = WordCount::from_entropy_bits(entropy_bits)?;
    WalletMnemonic::generate(word_count)
}

/// `true` iff the phrase has a valid length, only dictionary words and a
/// correct checksum.
pub fn validate_mnemonic(phrase: &str) -> bool {
    WalletMnemonic::from_phrase(phrase).is_ok()
}

/// Dictionary membership check for a single word.
#[inline]
pub fn is_valid_word(word: &str) -> bool {
    wordlist::contains(word)
}

// =============================================================================
// UNIT TESTS
// =============================================================================
