//! Search predicates over k-mer keys.

use crate::error::{Error, ErrorKind, Result};
use compact_kmer::{KmerKey, PackedSequence, QueryPattern};
use std::convert::TryFrom;

/// The kind of a search predicate, identified by the strategy number the host uses for it.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Strategy {
    /// The key equals the argument.
    Equal = 3,
    /// The query pattern argument matches the key.
    Matches = 7,
    /// The key starts with the argument.
    StartsWith = 28,
}

impl TryFrom<u16> for Strategy {
    type Error = Error;

    fn try_from(strategy: u16) -> Result<Self> {
        match strategy {
            3 => Ok(Strategy::Equal),
            7 => Ok(Strategy::Matches),
            28 => Ok(Strategy::StartsWith),
            other => Err(ErrorKind::UnsupportedStrategy(other).into()),
        }
    }
}

impl From<Strategy> for u16 {
    fn from(strategy: Strategy) -> u16 {
        strategy as u16
    }
}

/// A search predicate together with its argument.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum ScanKey {
    /// The key equals the given key.
    Equal(KmerKey),
    /// The key starts with the given key.
    StartsWith(KmerKey),
    /// The key has the length of the given pattern and is matched by it.
    Matches(QueryPattern),
}

impl ScanKey {
    /// Creates a scan key from a strategy number and the text form of its argument.
    pub fn from_text(strategy: u16, argument: &str) -> Result<Self> {
        Ok(match Strategy::try_from(strategy)? {
            Strategy::Equal => ScanKey::Equal(argument.parse()?),
            Strategy::StartsWith => ScanKey::StartsWith(argument.parse()?),
            Strategy::Matches => ScanKey::Matches(argument.parse()?),
        })
    }

    /// Returns the strategy of this scan key.
    pub fn strategy(&self) -> Strategy {
        match self {
            ScanKey::Equal(_) => Strategy::Equal,
            ScanKey::StartsWith(_) => Strategy::StartsWith,
            ScanKey::Matches(_) => Strategy::Matches,
        }
    }

    /// Returns true if the subtree of a child link may contain keys satisfying this predicate.
    ///
    /// `reconstructed` is the key represented by the path to the child.
    /// If `exhausted` is true, all keys in the subtree are equal to `reconstructed`,
    /// otherwise they start with it.
    pub(crate) fn is_consistent_with_path(&self, reconstructed: &KmerKey, exhausted: bool) -> bool {
        match self {
            ScanKey::Equal(query) => {
                query.has_prefix(reconstructed) && (!exhausted || query.len() == reconstructed.len())
            }
            ScanKey::StartsWith(query) => {
                let compatible = reconstructed.common_prefix_len(query)
                    == reconstructed.len().min(query.len());
                compatible && (!exhausted || query.len() <= reconstructed.len())
            }
            ScanKey::Matches(pattern) => {
                pattern.matches_prefix_of(reconstructed)
                    && (!exhausted || pattern.len() == reconstructed.len())
            }
        }
    }

    /// Returns true if the given full key satisfies this predicate.
    ///
    /// `level` is the number of characters of the key that were already checked while descending.
    pub(crate) fn is_satisfied_by(&self, key: &KmerKey, level: usize) -> bool {
        match self {
            ScanKey::Equal(query) => key == query,
            ScanKey::StartsWith(query) => level >= query.len() || key.has_prefix(query),
            ScanKey::Matches(pattern) => matches!(pattern.matches(key), Ok(true)),
        }
    }
}
