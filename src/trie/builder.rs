//! Construction of the compressed suffix trie.
//!
//! Both builders work on the ranked text (each symbol already mapped into
//! `0..SIGMA`) and give every leaf `end == n` up front, so leaf extension is
//! implicit. No terminator is appended: a suffix that is a prefix of another
//! suffix stays implicit inside an edge.

use super::node_store::{NodeId, NodeStore, ROOT};

/// Which construction routine populates the node store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BuildAlgorithm {
    /// Ukkonen's on-line method with suffix links, O(n).
    #[default]
    Ukkonen,
    /// Insert every suffix from the root, O(n^2). Kept as a reference oracle.
    Quadratic,
}

impl BuildAlgorithm {
    pub(crate) fn build(self, codes: &[u8]) -> NodeStore {
        match self {
            Self::Ukkonen => build_ukkonen(codes),
            Self::Quadratic => build_quadratic(codes),
        }
    }
}

/// Ukkonen's on-line construction.
///
/// The active point is kept as `(active, remainder)`: `remainder` counts the
/// suffixes still to be made explicit, including the one ending at the
/// current symbol, and the pending suffix continues `remainder - 1` symbols
/// below `active` along the edge starting with `codes[i - (remainder - 1)]`.
pub(crate) fn build_ukkonen(codes: &[u8]) -> NodeStore {
    let n = codes.len();
    let mut store = NodeStore::with_capacity(2 * n);
    let mut active: NodeId = ROOT;
    let mut remainder: usize = 0;

    for i in 0..n {
        remainder += 1;
        // Internal node created by the last split of this phase, awaiting its suffix link.
        let mut pending_link: Option<NodeId> = None;

        while remainder > 0 {
            let mut offset = remainder - 1;
            let mut child = store.child(active, codes[i - offset]);

            // Canonize: walk down whole edges the pending suffix already spans.
            while let Some(c) = child {
                let len = store.node(c).edge_len();
                if offset < len {
                    break;
                }
                offset -= len;
                active = c;
                child = store.child(active, codes[i - offset]);
            }
            remainder = offset + 1;

            match child {
                None => {
                    debug_assert_eq!(offset, 0);
                    store.attach(active, codes[i], i, n);
                    if let Some(split) = pending_link.take() {
                        store.node_mut(split).suffix_link = Some(active);
                    }
                }
                Some(c) => {
                    let split_at = store.node(c).start + offset;
                    if codes[split_at] == codes[i] {
                        // Already implicit; the rest of this phase is too.
                        if let Some(split) = pending_link.take() {
                            store.node_mut(split).suffix_link = Some(active);
                        }
                        break;
                    }

                    let head = codes[store.node(c).start];
                    let middle = store.split(c, offset, head, codes[split_at]);
                    store.attach(middle, codes[i], i, n);
                    if let Some(split) = pending_link.replace(middle) {
                        store.node_mut(split).suffix_link = Some(middle);
                    }
                }
            }

            if active == ROOT {
                remainder -= 1;
            } else {
                active = store.node(active).suffix_link.unwrap_or(ROOT);
            }
        }
    }

    log::trace!(
        "ukkonen: {} symbols, {} nodes, {} suffixes left implicit",
        n,
        store.len(),
        remainder
    );
    store
}

/// Insert each suffix, longest first, splitting an edge at the first mismatch.
pub(crate) fn build_quadratic(codes: &[u8]) -> NodeStore {
    let n = codes.len();
    let mut store = NodeStore::with_capacity(2 * n);

    for suffix in 0..n {
        let mut node = ROOT;
        // Text position of the next unmatched symbol on `node`'s edge.
        let mut cursor = store.node(node).start;
        let mut j = suffix;

        while j < n {
            if cursor >= store.node(node).end {
                match store.child(node, codes[j]) {
                    Some(c) => {
                        node = c;
                        cursor = store.node(c).start;
                    }
                    None => {
                        store.attach(node, codes[j], j, n);
                        break;
                    }
                }
            } else if codes[j] == codes[cursor] {
                j += 1;
                cursor += 1;
            } else {
                let start = store.node(node).start;
                let middle = store.split(node, cursor - start, codes[start], codes[cursor]);
                store.attach(middle, codes[j], j, n);
                break;
            }
        }
    }

    store
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::encode;

    fn shape(store: &NodeStore, node: NodeId, out: &mut Vec<(usize, usize, usize)>) {
        for child in store.node(node).child_ids() {
            let n = store.node(child);
            out.push((n.start, n.end, n.degree()));
            shape(store, child, out);
        }
    }

    #[test]
    fn empty_text_yields_root_only() {
        for algorithm in [BuildAlgorithm::Ukkonen, BuildAlgorithm::Quadratic] {
            let store = algorithm.build(&[]);
            assert_eq!(store.len(), 1);
            assert!(store.node(ROOT).is_leaf());
        }
    }

    #[test]
    fn repeated_symbol_stays_single_leaf() {
        let codes = encode(b"AAAA").unwrap();
        let store = build_ukkonen(&codes);
        assert_eq!(store.len(), 2);
        assert_eq!(store.node(ROOT).degree(), 1);
        let leaf = store.child(ROOT, 0).unwrap();
        assert_eq!((store.node(leaf).start, store.node(leaf).end), (0, 4));
    }

    #[test]
    fn splits_on_repeat_boundary() {
        // ACACAG branches after "A", "ACA" and "CA".
        let codes = encode(b"ACACAG").unwrap();
        let store = build_ukkonen(&codes);

        let a = store.child(ROOT, 0).unwrap();
        assert_eq!(store.node(a).edge_len(), 1);
        assert_eq!(store.node(a).degree(), 2);

        let aca = store.child(a, 1).unwrap();
        assert_eq!(store.node(aca).edge_len(), 2);
        assert_eq!(store.node(aca).degree(), 2);

        let ca = store.child(ROOT, 1).unwrap();
        assert_eq!(store.node(ca).edge_len(), 2);
        assert_eq!(store.node(ca).degree(), 2);

        let root = store.node(ROOT);
        assert_eq!(root.degree(), 3);
        assert!(store.child(ROOT, 3).is_none());
    }

    #[test]
    fn internal_nodes_receive_suffix_links() {
        let codes = encode(b"ACACAG").unwrap();
        let store = build_ukkonen(&codes);
        for (id, node) in store.iter().skip(1) {
            if !node.is_leaf() {
                assert!(node.suffix_link.is_some(), "node {id} lacks a suffix link");
            }
        }
    }

    #[test]
    fn builders_agree_on_edge_multiset() {
        for text in [&b"ACGTACGT"[..], b"GATTACA", b"CCCCGCCCC", b"ACACAG", b"T"] {
            let codes = encode(text).unwrap();
            let mut online = Vec::new();
            let mut reference = Vec::new();
            shape(&build_ukkonen(&codes), ROOT, &mut online);
            shape(&build_quadratic(&codes), ROOT, &mut reference);

            let label = |v: &Vec<(usize, usize, usize)>| {
                let mut labels: Vec<(Vec<u8>, usize)> = v
                    .iter()
                    .map(|&(s, e, d)| (text[s..e].to_vec(), d))
                    .collect();
                labels.sort();
                labels
            };
            assert_eq!(label(&online), label(&reference), "text {:?}", text);
        }
    }
}
