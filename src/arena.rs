//! Slot storage for trie nodes.
//!
//! Released slots are threaded onto a free list and reused by later
//! insertions. The root always occupies slot 0 and is never released.

use std::ops::{Index, IndexMut};

use tracing::trace;

use crate::node::{Node, NodeId, TrieAtom};

#[derive(Clone, Debug)]
pub(crate) enum Slot<A: TrieAtom, V> {
    Occupied(Node<A, V>),
    /// Link to the next free slot.
    Vacant(Option<NodeId>),
}

#[derive(Clone, Debug)]
pub(crate) struct Arena<A: TrieAtom, V> {
    slots: Vec<Slot<A, V>>,
    free: Option<NodeId>,
}

impl<A: TrieAtom, V> Arena<A, V> {
    pub(crate) fn new() -> Self {
        Self {
            slots: vec![Slot::Occupied(Node::root())],
            free: None,
        }
    }

    pub(crate) fn get(&self, id: NodeId) -> Option<&Node<A, V>> {
        match self.slots.get(id.0) {
            Some(Slot::Occupied(node)) => Some(node),
            _ => None,
        }
    }

    /// Return the child of `parent` for `atom`, creating it if missing.
    pub(crate) fn add(&mut self, parent: NodeId, atom: A) -> NodeId {
        if let Some(child) = self[parent].find(&atom) {
            return child;
        }
        let depth = self[parent].depth + 1;
        let child = self.alloc(Node::child_of(atom, parent, depth));
        self[parent].children.insert(atom, child);
        trace!(depth, index = child.0, "created node");
        child
    }

    /// Drop the node in `id`. The caller must already have detached it from
    /// its parent.
    pub(crate) fn release(&mut self, id: NodeId) {
        debug_assert_ne!(id, NodeId::ROOT, "the root is never released");
        self.slots[id.0] = Slot::Vacant(self.free);
        self.free = Some(id);
    }

    /// Number of live nodes, root included.
    #[cfg(test)]
    pub(crate) fn live(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| matches!(slot, Slot::Occupied(_)))
            .count()
    }

    fn alloc(&mut self, node: Node<A, V>) -> NodeId {
        match self.free {
            Some(id) => {
                match std::mem::replace(&mut self.slots[id.0], Slot::Occupied(node)) {
                    Slot::Vacant(next) => self.free = next,
                    Slot::Occupied(_) => panic!("free list points at occupied slot {}", id.0),
                }
                id
            }
            None => {
                self.slots.push(Slot::Occupied(node));
                NodeId(self.slots.len() - 1)
            }
        }
    }
}

impl<A: TrieAtom, V> Index<NodeId> for Arena<A, V> {
    type Output = Node<A, V>;

    fn index(&self, id: NodeId) -> &Self::Output {
        match &self.slots[id.0] {
            Slot::Occupied(node) => node,
            Slot::Vacant(_) => panic!("node {} has been released", id.0),
        }
    }
}

impl<A: TrieAtom, V> IndexMut<NodeId> for Arena<A, V> {
    fn index_mut(&mut self, id: NodeId) -> &mut Self::Output {
        match &mut self.slots[id.0] {
            Slot::Occupied(node) => node,
            Slot::Vacant(_) => panic!("node {} has been released", id.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_adds_children_idempotently() {
        let mut arena: Arena<char, ()> = Arena::new();
        let first = arena.add(NodeId::ROOT, 'a');
        let second = arena.add(NodeId::ROOT, 'a');
        assert_eq!(first, second);
        assert_eq!(arena.live(), 2);
        assert_eq!(arena[first].depth, 1);
        assert_eq!(arena[first].parent, Some(NodeId::ROOT));
    }

    #[test]
    fn it_recycles_released_slots() {
        let mut arena: Arena<char, ()> = Arena::new();
        let a = arena.add(NodeId::ROOT, 'a');
        let b = arena.add(a, 'b');
        arena[a].remove(&'b');
        arena.release(b);
        assert!(arena.get(b).is_none());
        assert_eq!(arena.live(), 2);

        let c = arena.add(a, 'c');
        assert_eq!(c, b);
        assert_eq!(arena[c].atom, Some('c'));
        assert_eq!(arena[c].depth, 2);
    }

    #[test]
    #[should_panic(expected = "has been released")]
    fn it_panics_on_released_index() {
        let mut arena: Arena<char, ()> = Arena::new();
        let a = arena.add(NodeId::ROOT, 'a');
        arena[NodeId::ROOT].remove(&'a');
        arena.release(a);
        let node = &arena[a];
        assert!(node.is_leaf());
    }
}
