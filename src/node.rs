//! Trie vertices and the read-only handle used to inspect them.
//!
//! Nodes live in an [`crate::arena::Arena`] and refer to each other by
//! [`NodeId`]. A node owns its children through the arena and remembers its
//! parent as an index, which keeps upward walks O(1) without shared
//! ownership.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use crate::arena::Arena;

/// Atoms which we wish to store in a Trie must implement
/// TrieAtom.
pub trait TrieAtom: Copy + Eq + Hash {}

// Blanket implementation which satisfies the compiler
impl<A> TrieAtom for A where A: Copy + Eq + Hash {}

/// Index of a node inside its trie.
///
/// Ids of pruned nodes are recycled, so an id is only meaningful until the
/// next removal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub(crate) const ROOT: NodeId = NodeId(0);

    /// Position of the node in the arena.
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Node<A: TrieAtom, V> {
    /// Edge label from the parent. `None` only for the root.
    pub(crate) atom: Option<A>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: HashMap<A, NodeId>,
    pub(crate) depth: usize,
    /// Present iff the node terminates a key.
    pub(crate) value: Option<V>,
}

impl<A: TrieAtom, V> Node<A, V> {
    pub(crate) fn root() -> Self {
        Self {
            atom: None,
            parent: None,
            children: HashMap::new(),
            depth: 0,
            value: None,
        }
    }

    pub(crate) fn child_of(atom: A, parent: NodeId, depth: usize) -> Self {
        Self {
            atom: Some(atom),
            parent: Some(parent),
            children: HashMap::new(),
            depth,
            value: None,
        }
    }

    #[inline]
    pub(crate) fn is_terminal(&self) -> bool {
        self.value.is_some()
    }

    #[inline]
    pub(crate) fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Mark the node terminal with `Some(value)` or clear it with `None`.
    /// Returns the value previously held.
    pub(crate) fn set_terminal(&mut self, value: Option<V>) -> Option<V> {
        std::mem::replace(&mut self.value, value)
    }

    pub(crate) fn find(&self, atom: &A) -> Option<NodeId> {
        self.children.get(atom).copied()
    }

    /// Detach the child for `atom`. Does not touch the child's subtree.
    pub(crate) fn remove(&mut self, atom: &A) -> Option<NodeId> {
        self.children.remove(atom)
    }
}

/// Borrowed view of a node.
///
/// Returned by lookups on [`crate::trie::Trie`]; lets callers walk up to the
/// parent or down to the children of the node they found.
pub struct NodeRef<'a, A: TrieAtom, V> {
    arena: &'a Arena<A, V>,
    id: NodeId,
}

impl<'a, A: TrieAtom, V> NodeRef<'a, A, V> {
    pub(crate) fn new(arena: &'a Arena<A, V>, id: NodeId) -> Self {
        Self { arena, id }
    }

    fn node(&self) -> &'a Node<A, V> {
        &self.arena[self.id]
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The atom on the edge leading into this node, `None` for the root.
    pub fn atom(&self) -> Option<A> {
        self.node().atom
    }

    pub fn parent(&self) -> Option<NodeRef<'a, A, V>> {
        self.node().parent.map(|id| NodeRef::new(self.arena, id))
    }

    /// Children in no particular order.
    pub fn children(&self) -> impl Iterator<Item = NodeRef<'a, A, V>> + 'a {
        let arena = self.arena;
        self.node()
            .children
            .values()
            .map(move |&id| NodeRef::new(arena, id))
    }

    /// Length of the key prefix this node represents.
    pub fn depth(&self) -> usize {
        self.node().depth
    }

    pub fn is_terminal(&self) -> bool {
        self.node().is_terminal()
    }

    /// The stored value, present only on terminal nodes.
    pub fn value(&self) -> Option<&'a V> {
        self.node().value.as_ref()
    }

    pub fn is_root(&self) -> bool {
        self.node().depth == 0
    }

    /// A non-root node with at least one child.
    pub fn is_branch(&self) -> bool {
        let node = self.node();
        node.depth > 0 && !node.is_leaf()
    }

    pub fn is_leaf(&self) -> bool {
        self.node().is_leaf()
    }

    /// Rebuild the key leading to this node by walking up to the root.
    pub fn key(&self) -> Vec<A> {
        let mut key = Vec::with_capacity(self.depth());
        let mut current = Some(*self);
        while let Some(node) = current {
            if let Some(atom) = node.atom() {
                key.push(atom);
            }
            current = node.parent();
        }
        key.reverse();
        key
    }
}

impl<'a, A: TrieAtom, V> Clone for NodeRef<'a, A, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, A: TrieAtom, V> Copy for NodeRef<'a, A, V> {}

impl<'a, A: TrieAtom + fmt::Debug, V: fmt::Debug> fmt::Debug for NodeRef<'a, A, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("index", &self.id.index())
            .field("atom", &self.atom())
            .field("depth", &self.depth())
            .field("value", &self.value())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_sets_and_clears_terminal() {
        let mut node: Node<char, usize> = Node::child_of('a', NodeId::ROOT, 1);
        assert!(!node.is_terminal());
        assert_eq!(node.set_terminal(Some(3)), None);
        assert!(node.is_terminal());
        assert_eq!(node.value, Some(3));
        assert_eq!(node.set_terminal(None), Some(3));
        assert!(!node.is_terminal());
        assert!(node.value.is_none());
    }

    #[test]
    fn it_finds_and_removes_children() {
        let mut node: Node<char, usize> = Node::root();
        node.children.insert('x', NodeId(4));
        assert_eq!(node.find(&'x'), Some(NodeId(4)));
        assert_eq!(node.find(&'y'), None);
        assert_eq!(node.remove(&'y'), None);
        assert_eq!(node.remove(&'x'), Some(NodeId(4)));
        assert!(node.is_leaf());
    }

    #[test]
    fn it_describes_node_shape() {
        let mut arena: Arena<char, usize> = Arena::new();
        let a = arena.add(NodeId::ROOT, 'a');
        let b = arena.add(a, 'b');

        let root = NodeRef::new(&arena, NodeId::ROOT);
        assert_eq!(root.id().index(), 0);
        assert!(root.is_root());
        assert!(!root.is_branch());
        assert!(!root.is_leaf());
        assert!(root.parent().is_none());
        assert_eq!(root.atom(), None);

        let a_ref = NodeRef::new(&arena, a);
        assert!(a_ref.is_branch());
        assert_eq!(a_ref.parent().map(|p| p.id()), Some(NodeId::ROOT));
        assert_eq!(a_ref.children().map(|c| c.id()).collect::<Vec<_>>(), vec![b]);

        let b_ref = NodeRef::new(&arena, b);
        assert!(b_ref.is_leaf());
        assert!(!b_ref.is_branch());
        assert_eq!(b_ref.depth(), 2);
        assert_eq!(b_ref.key(), vec!['a', 'b']);
        assert!(b_ref.value().is_none());
        assert_eq!(b_ref.id().index(), 2);
        assert!(format!("{b_ref:?}").contains("index: 2"));
    }
}
