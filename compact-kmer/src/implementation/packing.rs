//! Packing of alphabet characters into 64-bit words.
//!
//! Characters are packed low-bit-first: the character at index `i` occupies the bits
//! `(i % SYMBOLS_PER_WORD) * BITS_PER_SYMBOL ..` of word `i / SYMBOLS_PER_WORD`.
//! All bits behind the last character are zero.

use crate::error::{ErrorKind, Result};
use crate::interface::alphabet::{Alphabet, AlphabetCharacter};
use bitvec::prelude::*;

/// Encodes the given ASCII text into the given words.
/// The words must be zeroed and large enough to hold `text.len()` characters.
///
/// Returns an `InvalidSymbol` error for the first character that is not part of the alphabet.
/// In this case, the content of `words` is unspecified.
pub fn encode_into<AlphabetType: Alphabet>(
    text: &[u8],
    words: &mut [u64],
    type_name: &'static str,
) -> Result<()> {
    debug_assert!(words.len() >= AlphabetType::word_count(text.len()));
    let bits = words.view_bits_mut::<Lsb0>();
    let width = AlphabetType::BITS_PER_SYMBOL;

    for (index, &ascii) in text.iter().enumerate() {
        let character = AlphabetType::ascii_to_character(ascii)
            .ok_or_else(|| ErrorKind::InvalidSymbol(char::from(ascii), type_name))?;
        bits[index * width..(index + 1) * width].store_le(character.code());
    }

    Ok(())
}

/// Encodes the given ASCII text into a vector of words.
pub fn encode<AlphabetType: Alphabet>(text: &[u8], type_name: &'static str) -> Result<Vec<u64>> {
    let mut words = vec![0; AlphabetType::word_count(text.len())];
    encode_into::<AlphabetType>(text, &mut words, type_name)?;
    Ok(words)
}

/// Returns the character at the given index of the packed words.
/// Panics if the index is outside of the words.
pub fn load_character<AlphabetType: Alphabet>(
    words: &[u64],
    index: usize,
) -> AlphabetType::CharacterType {
    let width = AlphabetType::BITS_PER_SYMBOL;
    let code: u8 = words.view_bits::<Lsb0>()[index * width..(index + 1) * width].load_le();
    AlphabetType::CharacterType::from_code(code).expect("packed word contains an invalid code")
}

/// Decodes the first `len` characters of the packed words into ASCII.
/// Bits behind the `len`th character are never read.
pub fn decode<AlphabetType: Alphabet>(words: &[u64], len: usize) -> Vec<u8> {
    (0..len)
        .map(|index| AlphabetType::character_to_ascii(load_character::<AlphabetType>(words, index)))
        .collect()
}

/// Returns true if all bits behind the first `len` characters are zero.
pub fn is_padding_clear<AlphabetType: Alphabet>(words: &[u64], len: usize) -> bool {
    let used_bits = len * AlphabetType::BITS_PER_SYMBOL;
    let bits = words.view_bits::<Lsb0>();
    used_bits >= bits.len() || bits[used_bits..].not_any()
}

/// Returns a mask selecting the lowest `bit_count` bits of a word.
pub(crate) const fn low_bits_mask(bit_count: usize) -> u64 {
    if bit_count >= 64 {
        u64::MAX
    } else {
        (1u64 << bit_count) - 1
    }
}
