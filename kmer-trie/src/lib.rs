//! A radix tree index over packed k-mer keys.
//!
//! The index is split the way SP-GiST splits it: [interface::RadixOperatorClass] defines the five operations
//! an operator class provides, [kmer_ops::KmerRadixOps] implements them for [compact_kmer::KmerKey]s,
//! and [tree::RadixTree] is an in-memory host that calls them to insert and search keys.
#![warn(missing_docs)]
#![recursion_limit = "1024"]
#[macro_use]
extern crate error_chain;
#[macro_use]
extern crate log;

/// Contains the error types used by this crate.
pub mod error;
pub mod interface;
pub mod kmer_ops;
pub mod strategy;
pub mod tree;

pub use compact_kmer;
pub use kmer_ops::KmerRadixOps;
pub use strategy::{ScanKey, Strategy};
pub use tree::{RadixTree, TreeOptions};
