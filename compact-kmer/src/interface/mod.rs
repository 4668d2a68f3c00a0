//! The traits providing the abstractions of this crate.

use crate::interface::alphabet::Alphabet;
use std::cmp::Ordering;

pub mod alphabet;

/// The maximum number of symbols of a k-mer key or a query pattern.
pub const MAX_KMER_LENGTH: usize = 32;

/// A sequence of alphabet characters stored in a packed representation.
///
/// While the internal representation is implementation specific, externally packed sequences are represented as sequences of `u8`,
/// which ASCII encode the characters of the alphabet.
/// The ordering of the ASCII characters is the lexical order of the sequence.
pub trait PackedSequence {
    /// The alphabet of the characters of this sequence.
    type AlphabetType: Alphabet;

    /// Returns the amount of characters in this sequence.
    fn len(&self) -> usize;

    /// Returns the character at the given index.
    /// Panics if `index >= self.len()`.
    fn character(&self, index: usize) -> <Self::AlphabetType as Alphabet>::CharacterType;

    /// Returns true if this sequence contains no characters.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns an iterator over the characters of this sequence.
    fn characters(&self) -> Characters<'_, Self> {
        Characters {
            sequence: self,
            front: 0,
            back: self.len(),
        }
    }

    /// Copies this sequence into a `Vec` of ASCII characters.
    fn clone_as_vec(&self) -> Vec<u8> {
        self.characters()
            .map(Self::AlphabetType::character_to_ascii)
            .collect()
    }

    /// Returns the sequence as string of ASCII characters.
    fn as_string(&self) -> String {
        self.characters()
            .map(|character| char::from(Self::AlphabetType::character_to_ascii(character)))
            .collect()
    }

    /// Compares the decoded characters of this and the other sequence lexicographically.
    fn lexicographic_cmp<Other: PackedSequence<AlphabetType = Self::AlphabetType> + ?Sized>(
        &self,
        other: &Other,
    ) -> Ordering {
        self.characters().cmp(other.characters())
    }
}

/// An iterator over the characters of a [PackedSequence].
pub struct Characters<'a, Sequence: PackedSequence + ?Sized> {
    sequence: &'a Sequence,
    front: usize,
    back: usize,
}

impl<'a, Sequence: PackedSequence + ?Sized> Iterator for Characters<'a, Sequence> {
    type Item = <Sequence::AlphabetType as Alphabet>::CharacterType;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front < self.back {
            let result = self.sequence.character(self.front);
            self.front += 1;
            Some(result)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<'a, Sequence: PackedSequence + ?Sized> DoubleEndedIterator for Characters<'a, Sequence> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front < self.back {
            self.back -= 1;
            Some(self.sequence.character(self.back))
        } else {
            None
        }
    }
}

impl<'a, Sequence: PackedSequence + ?Sized> ExactSizeIterator for Characters<'a, Sequence> {}
