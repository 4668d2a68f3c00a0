//! Enumeration of all k-mers of a sequence.

use crate::error::{ErrorKind, Result};
use crate::implementation::kmer::KmerKey;
use crate::implementation::sequence::Sequence;
use crate::interface::{PackedSequence, MAX_KMER_LENGTH};
use std::iter::FusedIterator;

/// An iterator over the k-mers of a [Sequence], in order of their starting position.
///
/// Each k-mer is loaded directly from the packed words of the sequence.
/// The iterator is single-pass; to enumerate again, create a new one with [Sequence::kmers].
#[derive(Debug, Clone)]
pub struct KmerIterator<'a> {
    sequence: &'a Sequence,
    k: usize,
    state: KmerIteratorState,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
enum KmerIteratorState {
    Emitting { current: usize, total: usize },
    Done,
}

impl<'a> KmerIterator<'a> {
    /// Creates an iterator over the k-mers of the given sequence.
    /// Fails with `InvalidK` if `k` is not in `1..=32`.
    pub fn new(sequence: &'a Sequence, k: usize) -> Result<Self> {
        if k == 0 || k > MAX_KMER_LENGTH {
            return Err(ErrorKind::InvalidK(k).into());
        }

        let state = if sequence.len() < k {
            KmerIteratorState::Done
        } else {
            KmerIteratorState::Emitting {
                current: 0,
                total: sequence.len() - k + 1,
            }
        };
        Ok(Self { sequence, k, state })
    }

    /// Returns the length of the k-mers produced by this iterator.
    pub fn k(&self) -> usize {
        self.k
    }
}

impl<'a> Iterator for KmerIterator<'a> {
    type Item = KmerKey;

    fn next(&mut self) -> Option<Self::Item> {
        match self.state {
            KmerIteratorState::Emitting { current, total } => {
                let kmer = self.sequence[current..current + self.k]
                    .to_kmer()
                    .expect("k is at most the maximum kmer length");
                self.state = if current + 1 == total {
                    KmerIteratorState::Done
                } else {
                    KmerIteratorState::Emitting {
                        current: current + 1,
                        total,
                    }
                };
                Some(kmer)
            }
            KmerIteratorState::Done => None,
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = match self.state {
            KmerIteratorState::Emitting { current, total } => total - current,
            KmerIteratorState::Done => 0,
        };
        (remaining, Some(remaining))
    }
}

impl<'a> ExactSizeIterator for KmerIterator<'a> {}

impl<'a> FusedIterator for KmerIterator<'a> {}
