//! The IUPAC nucleotide alphabet, consisting of the four bases, uracil and the eleven ambiguity codes.

use crate::interface::alphabet::dna_alphabet::DnaCharacter;
use crate::interface::alphabet::{Alphabet, AlphabetCharacter};
use std::cmp::Ordering;
use std::convert::TryFrom;

/// A character of the IUPAC nucleotide alphabet.
///
/// Translation table of the four-bit code:
/// ```txt
/// 0 - A    4 - W    8 - R    C - H
/// 1 - C    5 - S    9 - Y    D - V
/// 2 - G    6 - M    A - B    E - N
/// 3 - T    7 - K    B - D    F - U
/// ```
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct IupacCharacter {
    code: u8,
}

/// The IUPAC nucleotide alphabet.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub struct IupacAlphabet;

static IUPAC_CODE_TO_ASCII_TABLE: [u8; IupacAlphabet::SIZE] = [
    b'A', b'C', b'G', b'T', b'W', b'S', b'M', b'K', b'R', b'Y', b'B', b'D', b'H', b'V', b'N', b'U',
];

// Bit masks over DNA character codes (A = 1, T = 2, C = 4, G = 8).
const A: u8 = 0b0001;
const T: u8 = 0b0010;
const C: u8 = 0b0100;
const G: u8 = 0b1000;

static IUPAC_CODE_TO_BASE_SET_TABLE: [u8; IupacAlphabet::SIZE] = [
    A,
    C,
    G,
    T,
    A | T,
    C | G,
    A | C,
    G | T,
    A | G,
    C | T,
    C | G | T,
    A | G | T,
    A | C | T,
    A | C | G,
    A | C | G | T,
    T,
];

const INVALID_CODE: u8 = 16;

static ASCII_TO_IUPAC_CODE_TABLE: [u8; 256] = [
    16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16,
    16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16,
    16, 0, 10, 1, 11, 16, 16, 2, 12, 16, 16, 7, 16, 6, 14, 16, 16, 16, 8, 5, 3, 15, 13, 4, 16, 9, 16, 16, 16, 16, 16, 16,
    16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16,
    16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16,
    16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16,
    16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16,
    16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16, 16,
];

impl IupacCharacter {
    /// Returns true if the given nucleotide is in the set of bases represented by this character.
    /// `U` represents uracil, which stands in for thymine.
    pub fn matches(&self, nucleotide: DnaCharacter) -> bool {
        IUPAC_CODE_TO_BASE_SET_TABLE[self.code as usize] & (1 << nucleotide.code()) != 0
    }

    /// Returns the number of nucleotides represented by this character.
    pub fn base_count(&self) -> u32 {
        IUPAC_CODE_TO_BASE_SET_TABLE[self.code as usize].count_ones()
    }

    /// Returns true if this character represents exactly one nucleotide.
    pub fn is_unambiguous(&self) -> bool {
        self.base_count() == 1
    }
}

impl From<IupacCharacter> for u8 {
    fn from(character: IupacCharacter) -> u8 {
        IUPAC_CODE_TO_ASCII_TABLE[character.code as usize]
    }
}

impl From<DnaCharacter> for IupacCharacter {
    fn from(character: DnaCharacter) -> Self {
        Self {
            code: ASCII_TO_IUPAC_CODE_TABLE[u8::from(character) as usize],
        }
    }
}

impl TryFrom<u8> for IupacCharacter {
    type Error = ();

    fn try_from(ascii: u8) -> Result<Self, Self::Error> {
        let code = ASCII_TO_IUPAC_CODE_TABLE[ascii as usize];
        if code == INVALID_CODE {
            Err(())
        } else {
            Ok(Self { code })
        }
    }
}

impl Ord for IupacCharacter {
    fn cmp(&self, other: &Self) -> Ordering {
        u8::from(*self).cmp(&u8::from(*other))
    }
}

impl PartialOrd for IupacCharacter {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl AlphabetCharacter for IupacCharacter {
    fn code(&self) -> u8 {
        self.code
    }

    fn from_code(code: u8) -> Option<Self> {
        if (code as usize) < IupacAlphabet::SIZE {
            Some(Self { code })
        } else {
            None
        }
    }
}

impl Alphabet for IupacAlphabet {
    type CharacterType = IupacCharacter;
    const SIZE: usize = 16;
    const BITS_PER_SYMBOL: usize = 4;
}
