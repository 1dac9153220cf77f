//! Provides a Trie for storing keys composed of sequences of atoms, each
//! key carrying a value.
//!
//! Atoms must support the TrieAtom trait. Values are unconstrained.
//!
//! Every edge consumes exactly one atom, so the interface takes any
//! iterator of atoms as a key. It is up to the user to decide what kind
//! of atoms make the most sense for the keys being stored: chars, grapheme
//! clusters, words, numbers...
//!
//! Besides exact lookup the trie answers "which stored key is the longest
//! prefix of this input" ([`Trie::find`] with partial matching) and "which
//! stored key is the longest one occurring anywhere in this text"
//! ([`Trie::search`]).
//!
//! Example 1
//! ```
//! use spotting::trie::Trie;
//!
//! let mut trie = Trie::new();
//! trie.add("cat".chars(), 1).unwrap();
//! trie.add("car".chars(), 2).unwrap();
//! trie.add("card".chars(), 3).unwrap();
//!
//! assert!(!trie.contains_key("ca".chars()).unwrap());
//! let card = trie.find("card".chars(), false).unwrap().unwrap();
//! assert_eq!(card.value(), Some(&3));
//! assert_eq!(card.depth(), 4);
//!
//! assert!(trie.remove("car".chars()).unwrap());
//! assert!(!trie.contains_key("car".chars()).unwrap());
//! assert!(trie.contains_key("card".chars()).unwrap());
//! ```
//!
//! Example 2
//! ```
//! use spotting::trie::Trie;
//!
//! let mut trie = Trie::new();
//! trie.add("he".chars(), 1).unwrap();
//! trie.add("hello".chars(), 2).unwrap();
//!
//! // Longest stored key that prefixes the input
//! let node = trie.find("help".chars(), true).unwrap().unwrap();
//! assert_eq!(node.value(), Some(&1));
//!
//! // Longest stored key found anywhere in the text
//! let (start, node) = trie.search("say hello world".chars()).unwrap().unwrap();
//! assert_eq!(start, 4);
//! assert_eq!(node.value(), Some(&2));
//! ```
//!
//! Example 3
//! ```
//! use spotting::error::TrieError;
//! use spotting::trie::Trie;
//!
//! let mut trie = Trie::new();
//! let input = "the quick brown fox".split_whitespace();
//! trie.add(input.clone(), 4).unwrap();
//!
//! assert_eq!(trie.add(input.clone(), 5).unwrap_err(), TrieError::KeyAlreadyExists);
//! assert_eq!(trie.set(input.clone(), 5).unwrap().value(), Some(&5));
//! assert_eq!(trie.take(input.clone()).unwrap(), Some(5));
//! assert!(trie.is_empty());
//! ```
//!
//! Typical usages for this data structure:
//!  - Tokenizing input against a vocabulary (longest match wins)
//!  - Spotting known terms inside free text
//!  - Routing on the longest registered prefix

use std::iter::Peekable;

use tracing::{debug, trace};

use crate::arena::Arena;
use crate::error::{TrieError, TrieResult};
use crate::iterator::{Iter, KeyValue, KeyValueRef};
use crate::node::{NodeId, NodeRef, TrieAtom};

#[cfg(feature = "serde")]
use serde_crate::{de, Deserialize, Deserializer, Serialize, Serializer};

const EMPTY_KEY: &str = "key cannot be empty";
const EMPTY_TEXT: &str = "text cannot be empty";

/// Stores a key of atoms as individual nodes.
///
/// With the `serde` feature a Trie serializes as its list of key/value
/// pairs and is rebuilt key by key on deserialization, so node ids never
/// appear in serialized form.
#[derive(Clone, Debug)]
pub struct Trie<A: TrieAtom, V> {
    pub(crate) arena: Arena<A, V>,
    count: usize,
}

fn non_empty<A, K: IntoIterator<Item = A>>(
    key: K,
    reason: &'static str,
) -> TrieResult<Peekable<K::IntoIter>> {
    let mut atoms = key.into_iter().peekable();
    if atoms.peek().is_none() {
        return Err(TrieError::InvalidArgument(reason));
    }
    Ok(atoms)
}

impl<A: TrieAtom, V> Default for Trie<A, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: TrieAtom, V> Trie<A, V> {
    /// Create a new Trie.
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            count: 0,
        }
    }

    /// Clear the Trie.
    pub fn clear(&mut self) {
        self.arena = Arena::new();
        self.count = 0;
    }

    /// How many keys does the Trie contain?
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Is the Trie empty?
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// The root node: depth 0, no atom, no parent.
    pub fn root(&self) -> NodeRef<'_, A, V> {
        NodeRef::new(&self.arena, NodeId::ROOT)
    }

    /// Look up a node by id. `None` if the slot has been released.
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_, A, V>> {
        self.arena.get(id).map(|_| NodeRef::new(&self.arena, id))
    }

    /// Walk the key from the root and return the deepest node reached,
    /// which is the root itself if the first atom has no edge.
    pub fn find_prefix<K: IntoIterator<Item = A>>(&self, key: K) -> TrieResult<NodeRef<'_, A, V>> {
        let atoms = non_empty(key, EMPTY_KEY)?;
        let (id, _) = self.descend(atoms);
        Ok(NodeRef::new(&self.arena, id))
    }

    /// Insert the key with its value. Fails with
    /// [`TrieError::KeyAlreadyExists`] if the key is already present.
    pub fn add<K: IntoIterator<Item = A>>(
        &mut self,
        key: K,
        value: V,
    ) -> TrieResult<NodeRef<'_, A, V>> {
        let id = self.add_internal(key, value, false)?;
        Ok(NodeRef::new(&self.arena, id))
    }

    /// Insert the key with its value, replacing the value of an existing key.
    pub fn set<K: IntoIterator<Item = A>>(
        &mut self,
        key: K,
        value: V,
    ) -> TrieResult<NodeRef<'_, A, V>> {
        let id = self.add_internal(key, value, true)?;
        Ok(NodeRef::new(&self.arena, id))
    }

    /// Find the terminal node for the key.
    ///
    /// With `allow_partial_match` the deepest node reached is rolled back
    /// towards the root until a terminal node is found, yielding the
    /// longest stored key that is a prefix of `key`.
    pub fn find<K: IntoIterator<Item = A>>(
        &self,
        key: K,
        allow_partial_match: bool,
    ) -> TrieResult<Option<NodeRef<'_, A, V>>> {
        let atoms = non_empty(key, EMPTY_KEY)?;
        Ok(self
            .locate(atoms, allow_partial_match)
            .map(|id| NodeRef::new(&self.arena, id)))
    }

    /// Search the text for the longest stored key occurring in it.
    ///
    /// Returns the start offset (in atoms) and the matching node. Among
    /// matches of equal length the leftmost one wins.
    pub fn search<T: IntoIterator<Item = A>>(
        &self,
        text: T,
    ) -> TrieResult<Option<(usize, NodeRef<'_, A, V>)>> {
        let text: Vec<A> = non_empty(text, EMPTY_TEXT)?.collect();
        let mut selected: Option<(usize, NodeId, usize)> = None;

        for start in 0..text.len() {
            if matches!(selected, Some((_, _, best)) if best >= text.len() - start) {
                // No remaining suffix can be strictly longer
                break;
            }
            let Some(id) = self.locate(text[start..].iter().copied(), true) else {
                continue;
            };
            let depth = self.arena[id].depth;
            if matches!(selected, Some((_, _, best)) if best >= depth) {
                continue;
            }
            selected = Some((start, id, depth));
        }

        Ok(selected.map(|(start, id, _)| (start, NodeRef::new(&self.arena, id))))
    }

    /// Does the Trie contain the supplied key?
    pub fn contains_key<K: IntoIterator<Item = A>>(&self, key: K) -> TrieResult<bool> {
        let atoms = non_empty(key, EMPTY_KEY)?;
        Ok(self.locate(atoms, false).is_some())
    }

    /// Get a reference to a key's associated value.
    pub fn get<K: IntoIterator<Item = A>>(&self, key: K) -> TrieResult<Option<&V>> {
        let atoms = non_empty(key, EMPTY_KEY)?;
        Ok(self
            .locate(atoms, false)
            .and_then(|id| self.arena[id].value.as_ref()))
    }

    /// Get a mutable reference to a key's associated value.
    pub fn get_mut<K: IntoIterator<Item = A>>(&mut self, key: K) -> TrieResult<Option<&mut V>> {
        let atoms = non_empty(key, EMPTY_KEY)?;
        Ok(match self.locate(atoms, false) {
            Some(id) => self.arena[id].value.as_mut(),
            None => None,
        })
    }

    /// Remove the key from the Trie. Returns false if it was not present.
    pub fn remove<K: IntoIterator<Item = A>>(&mut self, key: K) -> TrieResult<bool> {
        Ok(self.take(key)?.is_some())
    }

    /// Remove the key from the Trie and return its value.
    ///
    /// Nodes left without children or a value are pruned on the way back
    /// to the root.
    pub fn take<K: IntoIterator<Item = A>>(&mut self, key: K) -> TrieResult<Option<V>> {
        let atoms = non_empty(key, EMPTY_KEY)?;
        let Some(id) = self.locate(atoms, false) else {
            return Ok(None);
        };
        let value = self.arena[id].set_terminal(None);
        self.count -= 1;
        debug!(depth = self.arena[id].depth, "removed key");
        self.prune(id);
        Ok(value)
    }

    /// Create an iterator over the Trie.
    pub fn iter(&self) -> Iter<'_, A, V> {
        Iter::new(&self.arena, self.count)
    }

    /// Create a sorted iterator over the Trie.
    pub fn iter_sorted(&self) -> impl Iterator<Item = KeyValueRef<'_, A, V>>
    where
        A: Ord,
    {
        let mut v = self.iter().collect::<Vec<KeyValueRef<'_, A, V>>>();
        v.sort_by(|x, y| x.key.cmp(&y.key));
        v.into_iter()
    }

    fn add_internal<K: IntoIterator<Item = A>>(
        &mut self,
        key: K,
        value: V,
        replace_existing: bool,
    ) -> TrieResult<NodeId> {
        let atoms = non_empty(key, EMPTY_KEY)?;
        let mut current = NodeId::ROOT;
        for atom in atoms {
            current = self.arena.add(current, atom);
        }

        let node = &mut self.arena[current];
        if node.is_terminal() {
            if !replace_existing {
                debug!(depth = node.depth, "rejected duplicate key");
                return Err(TrieError::KeyAlreadyExists);
            }
            debug!(depth = node.depth, "replaced value of existing key");
        } else {
            self.count += 1;
        }
        node.set_terminal(Some(value));
        Ok(current)
    }

    /// Descend from the root one atom at a time. Returns the deepest node
    /// reached and whether every atom found an edge.
    fn descend<I: Iterator<Item = A>>(&self, atoms: I) -> (NodeId, bool) {
        let mut current = NodeId::ROOT;
        for atom in atoms {
            match self.arena[current].find(&atom) {
                Some(child) => current = child,
                None => return (current, false),
            }
        }
        (current, true)
    }

    fn locate<I: Iterator<Item = A>>(&self, atoms: I, allow_partial_match: bool) -> Option<NodeId> {
        let (mut current, exhausted) = self.descend(atoms);
        if allow_partial_match {
            // roll back to nearest terminal node
            loop {
                let node = &self.arena[current];
                if node.is_terminal() {
                    return Some(current);
                }
                current = node.parent?;
            }
        }
        (exhausted && self.arena[current].is_terminal()).then_some(current)
    }

    fn prune(&mut self, mut current: NodeId) {
        loop {
            let node = &self.arena[current];
            if node.is_terminal() || !node.is_leaf() {
                break;
            }
            let (Some(parent), Some(atom)) = (node.parent, node.atom) else {
                break;
            };
            let depth = node.depth;
            self.arena[parent].remove(&atom);
            self.arena.release(current);
            trace!(depth, "pruned dangling node");
            current = parent;
        }
    }
}

impl<A: TrieAtom, V: PartialEq> PartialEq for Trie<A, V> {
    /// Two tries are equal when they hold the same keys with equal values,
    /// however their nodes happen to be laid out.
    fn eq(&self, other: &Self) -> bool {
        self.count == other.count
            && self.iter().all(|kv| {
                other
                    .locate(kv.key.into_iter(), false)
                    .and_then(|id| other.arena[id].value.as_ref())
                    == Some(kv.value)
            })
    }
}

/// Build a Trie from key/value pairs. Fails on an empty or repeated key.
impl<A: TrieAtom, V> TryFrom<Vec<KeyValue<A, V>>> for Trie<A, V> {
    type Error = TrieError;

    fn try_from(entries: Vec<KeyValue<A, V>>) -> TrieResult<Self> {
        let mut trie = Trie::new();
        for entry in entries {
            trie.add(entry.key, entry.value)?;
        }
        Ok(trie)
    }
}

#[cfg(feature = "serde")]
impl<A: TrieAtom + Serialize, V: Serialize> Serialize for Trie<A, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

#[cfg(feature = "serde")]
impl<'de, A: TrieAtom + Deserialize<'de>, V: Deserialize<'de>> Deserialize<'de> for Trie<A, V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = Vec::<KeyValue<A, V>>::deserialize(deserializer)?;
        Trie::try_from(entries).map_err(de::Error::custom)
    }
}
