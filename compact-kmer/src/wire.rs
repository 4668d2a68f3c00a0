//! The binary form of the value types.
//!
//! All integers are written in network byte order:
//! ```txt
//! Sequence:     [length: u64][ceil(length / 32) packed words: u64]
//! KmerKey:      [length: i32][packed word: u64]
//! QueryPattern: [length: i32][length ASCII characters]
//! ```

use crate::error::{ErrorKind, Result};
use crate::implementation::kmer::KmerKey;
use crate::implementation::query_pattern::QueryPattern;
use crate::implementation::sequence::Sequence;
use crate::interface::alphabet::dna_alphabet::DnaAlphabet;
use crate::interface::alphabet::Alphabet;
use crate::interface::{PackedSequence, MAX_KMER_LENGTH};
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use std::convert::TryFrom;
use std::io::{Read, Write};

/// A value with a binary form.
pub trait WireFormat: Sized {
    /// Writes the binary form of this value.
    fn write_wire<W: Write>(&self, writer: &mut W) -> Result<()>;

    /// Reads a value from its binary form.
    /// A truncated input fails with an `Io` error.
    fn read_wire<R: Read>(reader: &mut R) -> Result<Self>;

    /// Returns the binary form of this value.
    fn to_wire_bytes(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.write_wire(&mut bytes)?;
        Ok(bytes)
    }

    /// Reads a value from the given bytes, failing with `MalformedWire` if bytes are left over.
    fn from_wire_bytes(bytes: &[u8]) -> Result<Self> {
        let mut reader = bytes;
        let value = Self::read_wire(&mut reader)?;
        if !reader.is_empty() {
            return Err(ErrorKind::MalformedWire(format!(
                "{} bytes left after the value",
                reader.len()
            ))
            .into());
        }
        Ok(value)
    }
}

fn read_signed_len<R: Read>(reader: &mut R) -> Result<usize> {
    let len = reader.read_i32::<BigEndian>()?;
    usize::try_from(len)
        .map_err(|_| ErrorKind::MalformedWire(format!("negative length {}", len)).into())
}

fn write_signed_len<W: Write>(writer: &mut W, len: usize) -> Result<()> {
    // Lengths of keys and patterns are at most 32.
    writer.write_i32::<BigEndian>(len as i32)?;
    Ok(())
}

impl WireFormat for Sequence {
    fn write_wire<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_u64::<BigEndian>(self.len() as u64)?;
        for &word in self.words() {
            writer.write_u64::<BigEndian>(word)?;
        }
        Ok(())
    }

    fn read_wire<R: Read>(reader: &mut R) -> Result<Self> {
        let wire_len = reader.read_u64::<BigEndian>()?;
        let (len, word_count) = usize::try_from(wire_len)
            .ok()
            .and_then(|len| Some((len, DnaAlphabet::checked_word_count(len)?)))
            .ok_or_else(|| {
                ErrorKind::MalformedWire(format!("sequence length {} is too large", wire_len))
            })?;

        // The length is untrusted, do not preallocate.
        let mut words = Vec::new();
        for _ in 0..word_count {
            words.push(reader.read_u64::<BigEndian>()?);
        }
        Sequence::from_words(len, words)
    }
}

impl WireFormat for KmerKey {
    fn write_wire<W: Write>(&self, writer: &mut W) -> Result<()> {
        write_signed_len(writer, self.len())?;
        writer.write_u64::<BigEndian>(self.word())?;
        Ok(())
    }

    fn read_wire<R: Read>(reader: &mut R) -> Result<Self> {
        let len = read_signed_len(reader)?;
        let word = reader.read_u64::<BigEndian>()?;
        KmerKey::from_parts(len, word)
    }
}

impl WireFormat for QueryPattern {
    fn write_wire<W: Write>(&self, writer: &mut W) -> Result<()> {
        write_signed_len(writer, self.len())?;
        writer.write_all(&self.clone_as_vec())?;
        Ok(())
    }

    fn read_wire<R: Read>(reader: &mut R) -> Result<Self> {
        let len = read_signed_len(reader)?;
        if len > MAX_KMER_LENGTH {
            return Err(ErrorKind::CapacityExceeded(len, MAX_KMER_LENGTH).into());
        }
        let mut text = vec![0; len];
        reader.read_exact(&mut text)?;
        QueryPattern::from_slice_u8(&text)
    }
}
