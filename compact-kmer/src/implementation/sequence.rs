//! A nucleotide sequence of arbitrary length, stored as vector of two-bit characters.

use crate::error::{ErrorKind, Result};
use crate::implementation::kmer::KmerKey;
use crate::implementation::kmer_iterator::KmerIterator;
use crate::implementation::packing;
use crate::implementation::query_pattern::QueryPattern;
use crate::implementation::text;
use crate::interface::alphabet::dna_alphabet::{DnaAlphabet, DnaCharacter};
use crate::interface::alphabet::{Alphabet, AlphabetCharacter};
use crate::interface::{PackedSequence, MAX_KMER_LENGTH};
use bitvec::prelude::*;
use ref_cast::RefCast;
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Index, Range, RangeFrom, RangeFull, RangeTo};
use std::str::FromStr;

const TYPE_NAME: &str = "DNA sequence";

/// A DNA sequence stored as vector of two-bit characters.
///
/// Translation table:
/// ```txt
/// 00 - A
/// 01 - T
/// 10 - C
/// 11 - G
/// ```
///
/// Each word holds 32 characters, the tail of the last word is zero.
/// A sequence is never empty.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Sequence {
    len: usize,
    words: Vec<u64>,
}

/// The subsequence of a [Sequence].
#[derive(RefCast, Debug, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct SubSequence {
    bits: BitSlice<u64, Lsb0>,
}

impl Sequence {
    /// Constructs a sequence from a slice of ASCII characters.
    /// The slice must be non-empty and consist of the characters `A`, `T`, `C` and `G` only.
    pub fn from_slice_u8(text: &[u8]) -> Result<Self> {
        if text.is_empty() {
            return Err(ErrorKind::EmptyInput(TYPE_NAME).into());
        }

        Ok(Self {
            len: text.len(),
            words: packing::encode::<DnaAlphabet>(text, TYPE_NAME)?,
        })
    }

    /// Checks that the given text is a valid DNA sequence, without constructing it.
    pub fn validate(text: &str) -> Result<()> {
        if text.is_empty() {
            return Err(ErrorKind::EmptyInput(TYPE_NAME).into());
        }
        match text
            .bytes()
            .find(|&ascii| DnaAlphabet::ascii_to_character(ascii).is_none())
        {
            Some(ascii) => Err(ErrorKind::InvalidSymbol(char::from(ascii), TYPE_NAME).into()),
            None => Ok(()),
        }
    }

    /// Constructs a sequence from its length and packed words, as read from the binary form.
    pub(crate) fn from_words(len: usize, words: Vec<u64>) -> Result<Self> {
        if len == 0 {
            return Err(ErrorKind::EmptyInput(TYPE_NAME).into());
        }
        if words.len() != DnaAlphabet::word_count(len) {
            return Err(ErrorKind::MalformedWire(format!(
                "a sequence of length {} needs {} words, but {} were given",
                len,
                DnaAlphabet::word_count(len),
                words.len()
            ))
            .into());
        }
        if !packing::is_padding_clear::<DnaAlphabet>(&words, len) {
            return Err(ErrorKind::MalformedWire(
                "the bits behind the last character of the sequence are set".to_string(),
            )
            .into());
        }

        Ok(Self { len, words })
    }

    /// Returns the packed words of this sequence.
    pub fn words(&self) -> &[u64] {
        &self.words
    }

    /// Returns a reference to this sequence as its subsequence type.
    pub fn as_subsequence(&self) -> &SubSequence {
        SubSequence::ref_cast(&self.words.view_bits::<Lsb0>()[..self.len * 2])
    }

    /// Returns an iterator over all k-mers of this sequence, in order of their position.
    /// Fails with `InvalidK` if `k` is not in `1..=32`.
    /// If the sequence is shorter than `k`, the iterator is empty.
    pub fn kmers(&self, k: usize) -> Result<KmerIterator<'_>> {
        KmerIterator::new(self, k)
    }

    /// Returns true if the given k-mer occurs in this sequence.
    pub fn contains_kmer(&self, kmer: &KmerKey) -> bool {
        if kmer.is_empty() {
            return true;
        }
        match self.kmers(kmer.len()) {
            Ok(mut kmers) => kmers.any(|candidate| &candidate == kmer),
            Err(_) => false,
        }
    }

    /// Returns the amount of k-mers of this sequence that are matched by the given pattern,
    /// where `k` is the length of the pattern.
    pub fn count_matches(&self, pattern: &QueryPattern) -> usize {
        match self.kmers(pattern.len()) {
            Ok(kmers) => kmers
                .filter(|kmer| matches!(pattern.matches(kmer), Ok(true)))
                .count(),
            Err(_) => 0,
        }
    }

    /// Returns the reverse complement of this sequence.
    pub fn reverse_complement(&self) -> Self {
        let mut words = vec![0; self.words.len()];
        {
            let bits = words.view_bits_mut::<Lsb0>();
            for (index, character) in self
                .characters()
                .rev()
                .map(|character| character.complement())
                .enumerate()
            {
                bits[index * 2..index * 2 + 2].store_le(character.code());
            }
        }

        Self {
            len: self.len,
            words,
        }
    }

    /// Returns a stable 32-bit hash of the length and the packed characters.
    pub fn stable_hash(&self) -> u32 {
        let bytes: Vec<u8> = std::iter::once(self.len as u64)
            .chain(self.words.iter().copied())
            .flat_map(|word| word.to_le_bytes())
            .collect();
        xxhash_rust::xxh32::xxh32(&bytes, 0)
    }

    /// Returns the amount of memory this sequence uses in bytes.
    /// This is meant to be accurate, but might be off by a constant number of bytes.
    pub fn size_in_memory(&self) -> usize {
        std::mem::size_of::<Self>() + self.words.capacity() * std::mem::size_of::<u64>()
    }
}

impl SubSequence {
    /// Converts this subsequence into a k-mer key.
    /// Fails with `CapacityExceeded` if it is longer than 32 characters.
    pub fn to_kmer(&self) -> Result<KmerKey> {
        let len = self.len();
        if len > MAX_KMER_LENGTH {
            return Err(ErrorKind::CapacityExceeded(len, MAX_KMER_LENGTH).into());
        }
        let word = if len == 0 { 0 } else { self.bits.load_le::<u64>() };
        Ok(KmerKey::from_packed(len, word))
    }
}

impl PackedSequence for Sequence {
    type AlphabetType = DnaAlphabet;

    fn len(&self) -> usize {
        self.len
    }

    fn character(&self, index: usize) -> DnaCharacter {
        assert!(index < self.len, "index {} out of range for sequence of length {}", index, self.len);
        packing::load_character::<DnaAlphabet>(&self.words, index)
    }
}

impl PackedSequence for SubSequence {
    type AlphabetType = DnaAlphabet;

    fn len(&self) -> usize {
        self.bits.len() / 2
    }

    fn character(&self, index: usize) -> DnaCharacter {
        let code: u8 = self.bits[index * 2..index * 2 + 2].load_le();
        DnaCharacter::from_code(code).expect("bitvec contains invalid character")
    }
}

impl Index<Range<usize>> for Sequence {
    type Output = SubSequence;

    fn index(&self, index: Range<usize>) -> &Self::Output {
        self.as_subsequence().index(index)
    }
}

impl Index<RangeFrom<usize>> for Sequence {
    type Output = SubSequence;

    fn index(&self, index: RangeFrom<usize>) -> &Self::Output {
        self.as_subsequence().index(index)
    }
}

impl Index<RangeTo<usize>> for Sequence {
    type Output = SubSequence;

    fn index(&self, index: RangeTo<usize>) -> &Self::Output {
        self.as_subsequence().index(index)
    }
}

impl Index<RangeFull> for Sequence {
    type Output = SubSequence;

    fn index(&self, _index: RangeFull) -> &Self::Output {
        self.as_subsequence()
    }
}

impl Index<Range<usize>> for SubSequence {
    type Output = SubSequence;

    fn index(&self, index: Range<usize>) -> &Self::Output {
        SubSequence::ref_cast(&self.bits[index.start * 2..index.end * 2])
    }
}

impl Index<RangeFrom<usize>> for SubSequence {
    type Output = SubSequence;

    fn index(&self, index: RangeFrom<usize>) -> &Self::Output {
        self.index(index.start..self.len())
    }
}

impl Index<RangeTo<usize>> for SubSequence {
    type Output = SubSequence;

    fn index(&self, index: RangeTo<usize>) -> &Self::Output {
        self.index(0..index.end)
    }
}

impl Borrow<SubSequence> for Sequence {
    fn borrow(&self) -> &SubSequence {
        self.as_subsequence()
    }
}

// Has to agree with the hash of the borrowed form.
impl Hash for Sequence {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_subsequence().hash(state)
    }
}

impl ToOwned for SubSequence {
    type Owned = Sequence;

    fn to_owned(&self) -> Self::Owned {
        let mut words = vec![0; DnaAlphabet::word_count(self.len())];
        words.view_bits_mut::<Lsb0>()[..self.bits.len()].copy_from_bitslice(&self.bits);
        Sequence {
            len: self.len(),
            words,
        }
    }
}

impl Ord for Sequence {
    fn cmp(&self, other: &Self) -> Ordering {
        self.lexicographic_cmp(other)
    }
}

impl PartialOrd for Sequence {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SubSequence {
    fn cmp(&self, other: &Self) -> Ordering {
        self.lexicographic_cmp(other)
    }
}

impl PartialOrd for SubSequence {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_string())
    }
}

impl fmt::Display for SubSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_string())
    }
}

impl FromStr for Sequence {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_slice_u8(text::single_token(s, TYPE_NAME)?.as_bytes())
    }
}
