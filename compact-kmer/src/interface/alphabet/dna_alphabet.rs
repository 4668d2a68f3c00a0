//! The DNA alphabet, consisting of characters A, T, C and G.

use crate::interface::alphabet::{Alphabet, AlphabetCharacter};
use std::cmp::Ordering;
use std::convert::TryFrom;

/// A character of a DNA alphabet: A, T, C or G.
///
/// The two-bit code is `A = 00`, `T = 01`, `C = 10`, `G = 11`.
/// This code order differs from the lexical order, so characters are compared by their ASCII value.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct DnaCharacter {
    code: u8,
}

/// The DNA alphabet, consisting of characters A, T, C and G.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub struct DnaAlphabet;

static DNA_CODE_TO_ASCII_TABLE: [u8; DnaAlphabet::SIZE] = [b'A', b'T', b'C', b'G'];

const INVALID_CODE: u8 = 4;

static ASCII_TO_DNA_CODE_TABLE: [u8; 256] = [
    4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4,
    4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4,
    4, 0, 4, 2, 4, 4, 4, 3, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 1, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4,
    4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4,
    4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4,
    4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4,
    4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4,
    4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4,
];

impl DnaCharacter {
    /// Returns the Watson-Crick complement of this character.
    pub fn complement(&self) -> Self {
        // A <-> T and C <-> G only differ in the lowest bit.
        Self {
            code: self.code ^ 1,
        }
    }
}

impl From<DnaCharacter> for u8 {
    fn from(character: DnaCharacter) -> u8 {
        DNA_CODE_TO_ASCII_TABLE[character.code as usize]
    }
}

impl TryFrom<u8> for DnaCharacter {
    type Error = ();

    fn try_from(ascii: u8) -> Result<Self, Self::Error> {
        let code = ASCII_TO_DNA_CODE_TABLE[ascii as usize];
        if code == INVALID_CODE {
            Err(())
        } else {
            Ok(Self { code })
        }
    }
}

impl Ord for DnaCharacter {
    fn cmp(&self, other: &Self) -> Ordering {
        u8::from(*self).cmp(&u8::from(*other))
    }
}

impl PartialOrd for DnaCharacter {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl AlphabetCharacter for DnaCharacter {
    fn code(&self) -> u8 {
        self.code
    }

    fn from_code(code: u8) -> Option<Self> {
        if (code as usize) < DnaAlphabet::SIZE {
            Some(Self { code })
        } else {
            None
        }
    }
}

impl Alphabet for DnaAlphabet {
    type CharacterType = DnaCharacter;
    const SIZE: usize = 4;
    const BITS_PER_SYMBOL: usize = 2;
}
