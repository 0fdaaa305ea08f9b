//! Arena owning every node of a suffix trie.
//!
//! Nodes are addressed by [`NodeId`] indices into a growable vector, so the
//! parent and suffix-link back-edges never own anything. Nodes are never
//! removed; an edge split allocates a fresh internal node and retargets the
//! existing one beneath it.

use crate::alphabet::SIGMA;

/// Index of a node inside a [`NodeStore`].
pub type NodeId = usize;

/// The root is always the first node allocated.
pub const ROOT: NodeId = 0;

/// A node together with the edge leading into it.
///
/// The edge is labelled by `text[start..end)`. The root has `start == end == 0`.
#[derive(Debug, Clone)]
pub struct Node {
    pub start: usize,
    pub end: usize,
    pub parent: Option<NodeId>,
    /// One slot per alphabet symbol, keyed by the first symbol of the child edge.
    pub children: [Option<NodeId>; SIGMA],
    /// Only meaningful during Ukkonen construction.
    pub suffix_link: Option<NodeId>,
}

impl Node {
    fn new(start: usize, end: usize, parent: Option<NodeId>) -> Self {
        Self {
            start,
            end,
            parent,
            children: [None; SIGMA],
            suffix_link: None,
        }
    }

    /// Length of the edge label.
    #[inline]
    pub fn edge_len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.iter().all(Option::is_none)
    }

    pub fn degree(&self) -> usize {
        self.children.iter().filter(|c| c.is_some()).count()
    }

    /// Children in alphabet order.
    pub fn child_ids(&self) -> impl DoubleEndedIterator<Item = NodeId> + '_ {
        self.children.iter().filter_map(|c| *c)
    }
}

#[derive(Debug, Clone)]
pub struct NodeStore {
    nodes: Vec<Node>,
}

impl NodeStore {
    /// A store holding only the root.
    pub fn new() -> Self {
        Self::with_capacity(1)
    }

    /// A suffix trie over `n` symbols never exceeds `2n` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity.max(1));
        nodes.push(Node::new(0, 0, None));
        Self { nodes }
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    #[inline]
    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id]
    }

    #[inline]
    pub fn child(&self, id: NodeId, symbol: u8) -> Option<NodeId> {
        self.nodes[id].children[symbol as usize]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.nodes.iter().enumerate()
    }

    /// Allocate a node labelled `[start, end)` and hang it under `parent`
    /// in the slot for `symbol`.
    pub fn attach(&mut self, parent: NodeId, symbol: u8, start: usize, end: usize) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node::new(start, end, Some(parent)));
        self.nodes[parent].children[symbol as usize] = Some(id);
        id
    }

    /// Split the edge into `child` after `offset` symbols.
    ///
    /// `head` is the first symbol of the edge and `tail` the symbol at
    /// `offset`. Returns the new internal node, which takes `child`'s place
    /// under its parent and adopts `child` in the `tail` slot.
    pub fn split(&mut self, child: NodeId, offset: usize, head: u8, tail: u8) -> NodeId {
        let (start, parent) = {
            let node = &self.nodes[child];
            debug_assert!(offset > 0 && offset < node.edge_len());
            (node.start, node.parent.unwrap_or(ROOT))
        };

        let middle = self.attach(parent, head, start, start + offset);
        self.nodes[middle].children[tail as usize] = Some(child);

        let node = &mut self.nodes[child];
        node.start += offset;
        node.parent = Some(middle);
        middle
    }
}

impl Default for NodeStore {
    fn default() -> Self {
        Self::new()
    }
}
