//! Pattern lookup over a built [`SuffixTrie`].

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::node_store::ROOT;
use super::suffix_trie::SuffixTrie;
use crate::alphabet;

impl SuffixTrie {
    /// Position of an occurrence of `pattern` in the text, or `None`.
    ///
    /// Runs in O(|pattern|) regardless of the text length. The position
    /// reported is the one recorded on the edge where the pattern is used up:
    /// that edge's start minus the symbols matched above it. An empty pattern
    /// matches at 0. Patterns containing symbols outside `ACGT` never match.
    pub fn find(&self, pattern: &[u8]) -> Option<usize> {
        if pattern.is_empty() {
            return Some(0);
        }

        let text = self.text();
        let mut node = ROOT;
        let mut j = 0;
        loop {
            let symbol = alphabet::rank(pattern[j])?;
            let child = self.store.child(node, symbol as u8)?;
            let edge = self.store.node(child);

            let k = edge.edge_len().min(pattern.len() - j);
            if pattern[j..j + k] != text[edge.start..edge.start + k] {
                return None;
            }
            if j + k == pattern.len() {
                return Some(edge.start - j);
            }
            j += k;
            node = child;
        }
    }

    /// [`find`](Self::find) with the `-1` sentinel for "not found".
    pub fn find_string(&self, pattern: &str) -> isize {
        self.find(pattern.as_bytes())
            .map_or(-1, |position| position as isize)
    }

    /// Whether `pattern` occurs anywhere in the text.
    pub fn contains(&self, pattern: &[u8]) -> bool {
        self.find(pattern).is_some()
    }

    /// Look up several patterns at once, preserving their order.
    pub fn find_many<P>(&self, patterns: &[P]) -> Vec<Option<usize>>
    where
        P: AsRef<[u8]> + Sync,
    {
        #[cfg(feature = "parallel")]
        {
            patterns
                .par_iter()
                .map(|pattern| self.find(pattern.as_ref()))
                .collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            patterns
                .iter()
                .map(|pattern| self.find(pattern.as_ref()))
                .collect()
        }
    }
}
