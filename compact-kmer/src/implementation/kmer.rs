//! A k-mer of at most 32 nucleotides, packed into a single word.

use crate::error::{ErrorKind, Result};
use crate::implementation::packing::{self, low_bits_mask};
use crate::implementation::text;
use crate::interface::alphabet::dna_alphabet::{DnaAlphabet, DnaCharacter};
use crate::interface::alphabet::AlphabetCharacter;
use crate::interface::{PackedSequence, MAX_KMER_LENGTH};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

const TYPE_NAME: &str = "kmer sequence";

/// A k-mer key of length at most 32, packed into one 64-bit word with two bits per character.
///
/// The character at index `i` occupies the bits `2 * i` and `2 * i + 1` of the word, using the
/// same translation table as [Sequence](crate::implementation::sequence::Sequence).
/// Bits behind the last character are zero, so two keys are equal if and only if their
/// lengths and words are equal.
///
/// Keys are ordered lexicographically by their decoded characters.
#[derive(Default, Clone, Copy, Eq, PartialEq, Hash)]
pub struct KmerKey {
    len: u8,
    word: u64,
}

impl KmerKey {
    /// Returns the key of length zero.
    pub const fn empty() -> Self {
        Self { len: 0, word: 0 }
    }

    /// Constructs a key from a slice of ASCII characters.
    /// The slice must be non-empty, at most 32 characters long, and consist of the characters `A`, `T`, `C` and `G` only.
    pub fn from_slice_u8(text: &[u8]) -> Result<Self> {
        if text.is_empty() {
            return Err(ErrorKind::EmptyInput(TYPE_NAME).into());
        }
        if text.len() > MAX_KMER_LENGTH {
            return Err(ErrorKind::CapacityExceeded(text.len(), MAX_KMER_LENGTH).into());
        }

        let mut word = [0u64];
        packing::encode_into::<DnaAlphabet>(text, &mut word, TYPE_NAME)?;
        Ok(Self::from_packed(text.len(), word[0]))
    }

    /// Constructs a key from its length and packed word.
    /// Fails if the length exceeds 32, or if bits behind the last character are set.
    pub fn from_parts(len: usize, word: u64) -> Result<Self> {
        if len > MAX_KMER_LENGTH {
            return Err(ErrorKind::CapacityExceeded(len, MAX_KMER_LENGTH).into());
        }
        if word & !low_bits_mask(len * 2) != 0 {
            return Err(ErrorKind::MalformedWire(
                "the bits behind the last character of the kmer are set".to_string(),
            )
            .into());
        }
        Ok(Self::from_packed(len, word))
    }

    pub(crate) fn from_packed(len: usize, word: u64) -> Self {
        debug_assert!(len <= MAX_KMER_LENGTH);
        debug_assert_eq!(word & !low_bits_mask(len * 2), 0);
        Self {
            len: len as u8,
            word,
        }
    }

    /// Returns the packed word of this key.
    pub fn word(&self) -> u64 {
        self.word
    }

    /// Returns the length of the longest common prefix of this and the other key.
    pub fn common_prefix_len(&self, other: &Self) -> usize {
        let limit = self.len().min(other.len());
        let difference = self.word ^ other.word;
        if difference == 0 {
            limit
        } else {
            limit.min(difference.trailing_zeros() as usize / 2)
        }
    }

    /// Returns true if the given key is a prefix of this key.
    /// Fails with `PrefixTooLong` if the given key is longer than this key.
    pub fn starts_with(&self, prefix: &Self) -> Result<bool> {
        if prefix.len() > self.len() {
            return Err(ErrorKind::PrefixTooLong(prefix.len(), self.len()).into());
        }
        Ok(self.has_prefix(prefix))
    }

    /// Returns true if the given key is a prefix of this key.
    /// A key longer than this key is never a prefix.
    pub fn has_prefix(&self, prefix: &Self) -> bool {
        prefix.len() <= self.len() && self.common_prefix_len(prefix) == prefix.len()
    }

    /// Returns the prefix of this key with the given length.
    /// Panics if `len > self.len()`.
    pub fn prefix(&self, len: usize) -> Self {
        assert!(len <= self.len(), "prefix of length {} of a kmer of length {}", len, self.len());
        Self::from_packed(len, self.word & low_bits_mask(len * 2))
    }

    /// Returns the suffix of this key starting at the given index.
    /// Panics if `start > self.len()`.
    pub fn suffix_from(&self, start: usize) -> Self {
        assert!(start <= self.len(), "suffix from {} of a kmer of length {}", start, self.len());
        Self::from_packed(
            self.len() - start,
            self.word.checked_shr(start as u32 * 2).unwrap_or(0),
        )
    }

    /// Returns the concatenation of this and the other key.
    /// Panics if the result would be longer than 32 characters.
    pub fn concat(&self, other: &Self) -> Self {
        let len = self.len() + other.len();
        assert!(
            len <= MAX_KMER_LENGTH,
            "concatenation of kmers {:?} and {:?} exceeds the maximum length",
            self,
            other
        );
        Self::from_packed(
            len,
            self.word | other.word.checked_shl(self.len() as u32 * 2).unwrap_or(0),
        )
    }

    /// Returns this key with the given character appended.
    /// Panics if this key is already 32 characters long.
    pub fn push(&self, character: DnaCharacter) -> Self {
        self.concat(&Self::from_packed(1, u64::from(character.code())))
    }

    /// Returns the reverse complement of this key.
    pub fn reverse_complement(&self) -> Self {
        let word = self
            .characters()
            .rev()
            .enumerate()
            .fold(0, |word, (index, character)| {
                word | (u64::from(character.complement().code()) << (index * 2))
            });
        Self::from_packed(self.len(), word)
    }

    /// Returns the lexicographically smaller one of this key and its reverse complement.
    pub fn canonical(&self) -> Self {
        let reverse_complement = self.reverse_complement();
        if reverse_complement < *self {
            reverse_complement
        } else {
            *self
        }
    }

    /// Returns true if this key is lexicographically smaller or equal to its reverse complement.
    pub fn is_canonical(&self) -> bool {
        *self <= self.reverse_complement()
    }

    /// Returns a stable 32-bit hash of the length and the packed characters.
    pub fn stable_hash(&self) -> u32 {
        let mut bytes = [0; 9];
        bytes[0] = self.len;
        bytes[1..].copy_from_slice(&self.word.to_le_bytes());
        xxhash_rust::xxh32::xxh32(&bytes, 0)
    }
}

impl PackedSequence for KmerKey {
    type AlphabetType = DnaAlphabet;

    fn len(&self) -> usize {
        self.len as usize
    }

    fn character(&self, index: usize) -> DnaCharacter {
        assert!(index < self.len(), "index {} out of range for kmer of length {}", index, self.len);
        DnaCharacter::from_code(((self.word >> (index * 2)) & 0b11) as u8)
            .expect("two-bit code outside of the alphabet")
    }
}

impl Ord for KmerKey {
    fn cmp(&self, other: &Self) -> Ordering {
        let common = self.common_prefix_len(other);
        if common == self.len() || common == other.len() {
            self.len().cmp(&other.len())
        } else {
            self.character(common).cmp(&other.character(common))
        }
    }
}

impl PartialOrd for KmerKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for KmerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KmerKey({:?})", self.as_string())
    }
}

impl fmt::Display for KmerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_string())
    }
}

impl FromStr for KmerKey {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_slice_u8(text::single_token(s, TYPE_NAME)?.as_bytes())
    }
}
