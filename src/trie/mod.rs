//! Compressed suffix trie over a DNA text.
//!
//! Nodes live in an index-addressed arena owned by the trie; callers only
//! see the text and the lookup operations.

mod builder;
mod locate;
mod node_store;
mod suffix_trie;

pub use self::builder::BuildAlgorithm;
pub use self::suffix_trie::{InvariantViolation, SuffixTrie, TrieError, TrieStats};
