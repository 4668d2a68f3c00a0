//! A pattern of at most 32 IUPAC characters, packed with four bits per character.

use crate::error::{ErrorKind, Result};
use crate::implementation::kmer::KmerKey;
use crate::implementation::{packing, pattern_matcher, text};
use crate::interface::alphabet::iupac_alphabet::{IupacAlphabet, IupacCharacter};
use crate::interface::{PackedSequence, MAX_KMER_LENGTH};
use std::fmt;
use std::str::FromStr;

const TYPE_NAME: &str = "query pattern";
const PATTERN_WORDS: usize = MAX_KMER_LENGTH / 16;

/// A query pattern over the IUPAC nucleotide alphabet, of length `1..=32`.
///
/// The characters are packed into two words with four bits each, see
/// [IupacCharacter](crate::interface::alphabet::iupac_alphabet::IupacCharacter) for the code.
#[derive(Clone, Copy, Eq, PartialEq, Hash)]
pub struct QueryPattern {
    len: u8,
    words: [u64; PATTERN_WORDS],
}

impl QueryPattern {
    /// Constructs a pattern from a slice of ASCII characters.
    /// The slice must be non-empty, at most 32 characters long, and consist of uppercase IUPAC characters only.
    pub fn from_slice_u8(text: &[u8]) -> Result<Self> {
        if text.is_empty() {
            return Err(ErrorKind::EmptyInput(TYPE_NAME).into());
        }
        if text.len() > MAX_KMER_LENGTH {
            return Err(ErrorKind::CapacityExceeded(text.len(), MAX_KMER_LENGTH).into());
        }

        let mut words = [0; PATTERN_WORDS];
        packing::encode_into::<IupacAlphabet>(text, &mut words, TYPE_NAME)?;
        Ok(Self {
            len: text.len() as u8,
            words,
        })
    }

    /// Returns true if the pattern matches the given key at every position.
    /// Fails with `LengthMismatch` if the key has a different length than this pattern.
    pub fn matches(&self, key: &KmerKey) -> Result<bool> {
        pattern_matcher::matches(self, key)
    }

    /// Returns true if the given key is at most as long as this pattern,
    /// and the pattern matches the key at each of the key's positions.
    pub fn matches_prefix_of(&self, key: &KmerKey) -> bool {
        key.len() <= self.len() && pattern_matcher::matches_prefix(self, key)
    }

    /// Returns a stable 32-bit hash of the length and the packed characters.
    pub fn stable_hash(&self) -> u32 {
        let mut bytes = [0; 1 + PATTERN_WORDS * 8];
        bytes[0] = self.len;
        for (chunk, word) in bytes[1..].chunks_exact_mut(8).zip(self.words.iter()) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
        xxhash_rust::xxh32::xxh32(&bytes, 0)
    }
}

impl PackedSequence for QueryPattern {
    type AlphabetType = IupacAlphabet;

    fn len(&self) -> usize {
        self.len as usize
    }

    fn character(&self, index: usize) -> IupacCharacter {
        assert!(index < self.len(), "index {} out of range for pattern of length {}", index, self.len);
        packing::load_character::<IupacAlphabet>(&self.words, index)
    }
}

impl fmt::Debug for QueryPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QueryPattern({:?})", self.as_string())
    }
}

impl fmt::Display for QueryPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_string())
    }
}

impl FromStr for QueryPattern {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_slice_u8(text::single_token(s, TYPE_NAME)?.as_bytes())
    }
}
