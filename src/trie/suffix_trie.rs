//! The public compressed suffix trie over a single DNA text.

use std::path::Path;

use serde::Serialize;

use super::builder::BuildAlgorithm;
use super::node_store::{NodeId, NodeStore, ROOT};
use crate::alphabet;
use crate::text_source::{self, TextSourceError};

/// Errors returned while constructing a trie.
#[derive(thiserror::Error, Debug)]
pub enum TrieError {
    #[error(transparent)]
    Source(#[from] TextSourceError),
    #[error("symbol {symbol:?} at position {position} is not one of ACGT")]
    InvalidSymbol { position: usize, symbol: char },
}

/// A structural invariant that a built trie failed to satisfy.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("node {0} has an empty edge label")]
    EmptyEdge(NodeId),
    #[error("node {node} sits in slot {slot} but its edge starts with slot {first}")]
    MisplacedChild { node: NodeId, slot: usize, first: usize },
    #[error("node {node} records parent {recorded:?} but hangs under {actual}")]
    WrongParent {
        node: NodeId,
        recorded: Option<NodeId>,
        actual: NodeId,
    },
    #[error("internal node {0} has a single child")]
    Uncompressed(NodeId),
    #[error("leaf {node} ends at {end}, expected {len}")]
    OpenLeaf { node: NodeId, end: usize, len: usize },
    #[error("edge of node {0} is not preceded in the text by its parent's path label")]
    DetachedLabel(NodeId),
    #[error("node {0} is not reachable from the root")]
    Unreachable(NodeId),
}

/// Summary counts describing a built trie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrieStats {
    pub text_len: usize,
    pub nodes: usize,
    pub leaves: usize,
    pub internal: usize,
    pub root_degree: usize,
}

/// Compressed suffix trie over a text drawn from `ACGT`.
///
/// Built once, then read-only: lookups take `&self`, so a trie can be shared
/// across threads without synchronisation.
#[derive(Debug, Clone)]
pub struct SuffixTrie {
    text: Vec<u8>,
    pub(super) store: NodeStore,
}

impl SuffixTrie {
    /// Load `path` and build its trie with Ukkonen's method.
    ///
    /// Never fails: a missing, unreadable, empty or non-DNA input is reported
    /// on the diagnostics stream and yields a root-only trie.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        let Some(text) = text_source::load_or_report(path) else {
            return Self::empty();
        };
        if text.is_empty() {
            log::warn!("{} contains no sequence", path.display());
        }
        Self::from_text(text).unwrap_or_else(|error| {
            log::warn!("{error}; using an empty trie");
            Self::empty()
        })
    }

    /// Load `path` and build its trie with the chosen algorithm.
    pub fn from_path<P: AsRef<Path>>(path: P, algorithm: BuildAlgorithm) -> Result<Self, TrieError> {
        let text = text_source::load(path)?;
        Self::with_algorithm(text, algorithm)
    }

    /// Build the trie of an in-memory text with Ukkonen's method.
    pub fn from_text<T: Into<Vec<u8>>>(text: T) -> Result<Self, TrieError> {
        Self::with_algorithm(text, BuildAlgorithm::default())
    }

    pub fn with_algorithm<T: Into<Vec<u8>>>(
        text: T,
        algorithm: BuildAlgorithm,
    ) -> Result<Self, TrieError> {
        let text = text.into();
        let codes = alphabet::encode(&text).map_err(|(position, symbol)| {
            TrieError::InvalidSymbol {
                position,
                symbol: symbol as char,
            }
        })?;

        let store = algorithm.build(&codes);
        log::info!(
            "built suffix trie ({:?}) over {} symbols with {} nodes",
            algorithm,
            text.len(),
            store.len()
        );
        Ok(Self { text, store })
    }

    /// A trie holding only the root.
    pub fn empty() -> Self {
        Self {
            text: Vec::new(),
            store: NodeStore::new(),
        }
    }

    /// The indexed text.
    pub fn text(&self) -> &[u8] {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn stats(&self) -> TrieStats {
        let leaves = self
            .store
            .iter()
            .skip(1)
            .filter(|(_, node)| node.is_leaf())
            .count();
        TrieStats {
            text_len: self.text.len(),
            nodes: self.store.len(),
            leaves,
            internal: self.store.len() - 1 - leaves,
            root_degree: self.store.node(ROOT).degree(),
        }
    }

    /// Verify the structural invariants of the built trie.
    ///
    /// Checks that every non-root edge is non-empty and filed under the slot
    /// of its first symbol, parent pointers agree with child slots, no
    /// internal node other than the root has a single child, leaves end at
    /// the text length, and each edge is preceded in the text by the path
    /// label of its parent.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let n = self.text.len();
        let mut visited = vec![false; self.store.len()];
        // (node, string depth of the node's parent)
        let mut stack: Vec<(NodeId, usize)> = vec![(ROOT, 0)];
        visited[ROOT] = true;

        while let Some((id, parent_depth)) = stack.pop() {
            let node = self.store.node(id);
            let depth = if id == ROOT {
                0
            } else {
                if node.edge_len() == 0 {
                    return Err(InvariantViolation::EmptyEdge(id));
                }
                if node.start < parent_depth
                    || self.text[node.start - parent_depth..node.start]
                        != self.path_label(node.parent.unwrap_or(ROOT))[..]
                {
                    return Err(InvariantViolation::DetachedLabel(id));
                }
                if node.is_leaf() && node.end != n {
                    return Err(InvariantViolation::OpenLeaf {
                        node: id,
                        end: node.end,
                        len: n,
                    });
                }
                if node.degree() == 1 {
                    return Err(InvariantViolation::Uncompressed(id));
                }
                parent_depth + node.edge_len()
            };

            for (slot, child) in node.children.iter().enumerate() {
                let Some(child) = *child else { continue };
                let child_node = self.store.node(child);
                if child_node.parent != Some(id) {
                    return Err(InvariantViolation::WrongParent {
                        node: child,
                        recorded: child_node.parent,
                        actual: id,
                    });
                }
                let first = self
                    .text
                    .get(child_node.start)
                    .and_then(|&symbol| alphabet::rank(symbol));
                if first != Some(slot) {
                    return Err(InvariantViolation::MisplacedChild {
                        node: child,
                        slot,
                        first: first.unwrap_or(usize::MAX),
                    });
                }
                visited[child] = true;
                stack.push((child, depth));
            }
        }

        match visited.iter().position(|seen| !seen) {
            Some(id) => Err(InvariantViolation::Unreachable(id)),
            None => Ok(()),
        }
    }

    /// Concatenated edge labels from the root down to `id`.
    fn path_label(&self, id: NodeId) -> Vec<u8> {
        let mut edges = Vec::new();
        let mut current = id;
        while current != ROOT {
            let node = self.store.node(current);
            edges.push(&self.text[node.start..node.end]);
            current = node.parent.unwrap_or(ROOT);
        }
        edges.into_iter().rev().flatten().copied().collect()
    }

    /// Every string spelled from the root to a leaf, in alphabet order.
    pub fn leaf_labels(&self) -> Vec<Vec<u8>> {
        let mut labels = Vec::new();
        let mut stack = vec![ROOT];
        while let Some(id) = stack.pop() {
            let node = self.store.node(id);
            if id != ROOT && node.is_leaf() {
                labels.push(self.path_label(id));
            }
            // Reverse so the smallest symbol is popped first.
            stack.extend(node.child_ids().rev());
        }
        labels
    }
}

impl Default for SuffixTrie {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn rejects_foreign_symbols() {
        let err = SuffixTrie::from_text("ACGNT").unwrap_err();
        assert!(matches!(
            err,
            TrieError::InvalidSymbol {
                position: 3,
                symbol: 'N'
            }
        ));
    }

    #[test]
    fn new_degrades_to_root_only() {
        let dir = tempfile::tempdir().expect("tmpdir");
        let trie = SuffixTrie::new(dir.path().join("missing.txt"));
        assert!(trie.is_empty());
        assert_eq!(trie.stats().nodes, 1);

        let mut bad = tempfile::NamedTempFile::new().expect("tmpfile");
        writeln!(bad, "ACGU").unwrap();
        let trie = SuffixTrie::new(bad.path());
        assert!(trie.is_empty());
        assert!(trie.check_invariants().is_ok());
    }

    #[test]
    fn new_loads_tokens_from_file() {
        let mut tmp = tempfile::NamedTempFile::new().expect("tmpfile");
        writeln!(tmp, "ACG T").unwrap();
        let trie = SuffixTrie::new(tmp.path());
        assert_eq!(trie.text(), b"ACGT");
        assert_eq!(trie.stats().leaves, 4);
    }

    #[test]
    fn stats_count_leaves_and_internal_nodes() {
        let trie = SuffixTrie::from_text("ACACAG").unwrap();
        let stats = trie.stats();
        assert_eq!(stats.text_len, 6);
        assert_eq!(stats.leaves, 6);
        assert_eq!(stats.internal, 3);
        assert_eq!(stats.nodes, 10);
        assert_eq!(stats.root_degree, 3);
    }

    #[test]
    fn leaf_labels_are_suffixes() {
        let trie = SuffixTrie::from_text("GATTACA").unwrap();
        let text = trie.text().to_vec();
        for label in trie.leaf_labels() {
            assert!(text.ends_with(&label), "{:?} is not a suffix", label);
        }
        assert!(trie.check_invariants().is_ok());
    }

    #[test]
    fn detects_uncompressed_node() {
        let mut trie = SuffixTrie::from_text("ACGT").unwrap();
        let leaf = trie.store.child(ROOT, 0).unwrap();
        trie.store.split(leaf, 1, 0, 1);
        assert!(matches!(
            trie.check_invariants(),
            Err(InvariantViolation::Uncompressed(_))
        ));
    }
}
