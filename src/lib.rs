//! dnacst library
//!
//! A compressed suffix trie over DNA texts, built on-line with Ukkonen's
//! method and queried in time proportional to the pattern, plus an LCS-based
//! similarity analyser over the same kind of input files.

pub mod alphabet;
pub mod emit;
pub mod similarity;
pub mod text_source;
pub mod trie;

pub use similarity::{
    analyse_files, lcs, lcs_length, similarity, similarity_analyser, Lcs, SimilarityError,
    SimilarityReport,
};
pub use text_source::{load, load_or_report, TextSourceError};
pub use trie::{BuildAlgorithm, InvariantViolation, SuffixTrie, TrieError, TrieStats};
