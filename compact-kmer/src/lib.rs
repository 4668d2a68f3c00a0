//! Compact representations of nucleotide sequences, k-mers and IUPAC query patterns.
//!
//! Sequences and k-mers are stored with two bits per nucleotide, query patterns with four bits per IUPAC character.
//! All values can be parsed from and printed as uppercase text, and have a binary form (see [wire]).
#![warn(missing_docs)]
#![recursion_limit = "1024"]
#[macro_use]
extern crate error_chain;

/// Contains the error types used by this crate.
pub mod error;
/// The packed value types and the algorithms over them.
pub mod implementation;
pub mod interface;
pub mod wire;

pub use implementation::kmer::KmerKey;
pub use implementation::kmer_iterator::KmerIterator;
pub use implementation::query_pattern::QueryPattern;
pub use implementation::sequence::{Sequence, SubSequence};
pub use interface::PackedSequence;
pub use wire::WireFormat;
