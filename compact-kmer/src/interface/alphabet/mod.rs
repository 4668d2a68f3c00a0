//! Alphabets for packed sequences.

use std::convert::TryFrom;
use std::fmt::Debug;

pub mod dna_alphabet;
pub mod iupac_alphabet;

/// The number of bits of a packed word.
pub const WORD_BITS: usize = 64;

/// A character in an alphabet.
///
/// Characters are ordered by their ASCII representation, not by their code.
pub trait AlphabetCharacter: Into<u8> + TryFrom<u8> + Copy + Eq + Ord + Debug {
    /// The code of this character, i.e. the value stored in the packed representation.
    fn code(&self) -> u8;

    /// Constructs the character from the given code, returning `None` if it is invalid.
    fn from_code(code: u8) -> Option<Self>;
}

/// An alphabet as a subset of the ASCII alphabet, together with a fixed-width binary code.
pub trait Alphabet: Sized {
    /// The internal character type used by the alphabet.
    type CharacterType: AlphabetCharacter;

    /// The amount of characters in the alphabet.
    const SIZE: usize;

    /// The width of the code of a character in bits.
    const BITS_PER_SYMBOL: usize;

    /// The amount of characters packed into one 64-bit word.
    const SYMBOLS_PER_WORD: usize = WORD_BITS / Self::BITS_PER_SYMBOL;

    /// Converts the given ASCII character into an alphabet character.
    /// If the ASCII character is not mapped to an alphabet character, then `None` is returned.
    fn ascii_to_character(ascii: u8) -> Option<Self::CharacterType> {
        Self::CharacterType::try_from(ascii).ok()
    }

    /// Converts this alphabet character into an ASCII character.
    fn character_to_ascii(character: Self::CharacterType) -> u8 {
        character.into()
    }

    /// Returns the number of words needed to pack `len` characters.
    fn word_count(len: usize) -> usize {
        (len * Self::BITS_PER_SYMBOL + WORD_BITS - 1) / WORD_BITS
    }

    /// Returns the number of words needed to pack `len` characters,
    /// or `None` if the number of bits does not fit into a `usize`.
    fn checked_word_count(len: usize) -> Option<usize> {
        len.checked_mul(Self::BITS_PER_SYMBOL)
            .and_then(|bits| bits.checked_add(WORD_BITS - 1))
            .map(|bits| bits / WORD_BITS)
    }
}
