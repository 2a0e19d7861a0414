use crate::SparseVector;
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;
use unicode_segmentation::UnicodeSegmentation;
use xxhash_rust::xxh3::xxh3_64_with_seed;

/// Turns free text into a numeric vector of fixed dimensionality.
/// Implementations must be deterministic functions of the input text.
pub trait Featurizer {
    /// Length of every produced vector
    fn dim(&self) -> usize;

    fn featurize(&self, text: &str) -> SparseVector;

    /// Rejects configurations `dim` and `featurize` cannot work with,
    /// e.g. ones read back from a hand-edited model file
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

const WORD_NGRAM_SEED: u64 = 0x5744;
const CHAR_NGRAM_SEED: u64 = 0x4348;

/// Bag of word n-grams and character n-grams hashed into `2^hash_bits` buckets.
/// Term counts are L2-normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextFeaturizer {
    pub hash_bits: u8,
    /// Longest word n-gram, `1` means only single words
    pub word_ngram_len: usize,
    /// Length of character n-grams extracted from each word, `0` disables them
    pub char_ngram_len: usize,
}

impl Default for TextFeaturizer {
    fn default() -> Self {
        Self {
            hash_bits: 16,
            word_ngram_len: 2,
            char_ngram_len: 3,
        }
    }
}

impl TextFeaturizer {
    /// Largest supported `hash_bits`, buckets must fit into `u32` indices of the concatenated columns
    pub const MAX_HASH_BITS: u8 = 24;

    pub fn with_hash_bits(hash_bits: u8) -> Self {
        Self {
            hash_bits,
            ..Self::default()
        }
    }

    fn bucket(&self, seed: u64, term: &str) -> u32 {
        let mask = (1u64 << self.hash_bits) - 1;
        (xxh3_64_with_seed(term.as_bytes(), seed) & mask) as u32
    }
}

impl Featurizer for TextFeaturizer {
    fn dim(&self) -> usize {
        1 << self.hash_bits
    }

    fn validate(&self) -> Result<(), String> {
        if !(1..=Self::MAX_HASH_BITS).contains(&self.hash_bits) {
            return Err(format!(
                "hash_bits must be in 1..={}, got {}",
                Self::MAX_HASH_BITS,
                self.hash_bits
            ));
        }
        Ok(())
    }

    fn featurize(&self, text: &str) -> SparseVector {
        let normalized = normalize(text);
        let words: Vec<&str> = normalized.unicode_words().collect();

        let mut terms = Vec::new();

        for n in 1..=self.word_ngram_len {
            for ngram in words.windows(n) {
                terms.push(self.bucket(WORD_NGRAM_SEED + n as u64, &ngram.join(" ")));
            }
        }

        if self.char_ngram_len > 0 {
            for word in &words {
                let padded: Vec<char> = format!("<{}>", word).chars().collect();
                for ngram in padded.windows(self.char_ngram_len) {
                    let ngram: String = ngram.iter().collect();
                    terms.push(self.bucket(CHAR_NGRAM_SEED, &ngram));
                }
            }
        }

        SparseVector::from_pairs(terms.into_iter().map(|bucket| (bucket, 1.0))).l2_normalized()
    }
}

fn normalize(text: &str) -> String {
    text.nfkc().flat_map(char::to_lowercase).collect()
}
