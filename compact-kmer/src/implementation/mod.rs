/// A k-mer key packed into a single word.
pub mod kmer;
/// Enumeration of the k-mers of a sequence.
pub mod kmer_iterator;
pub mod packing;
/// Matching of query patterns against k-mer keys.
pub mod pattern_matcher;
/// A packed IUPAC query pattern.
pub mod query_pattern;
/// A packed DNA sequence of arbitrary length.
pub mod sequence;
mod text;
