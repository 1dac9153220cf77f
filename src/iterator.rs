//! Provides Trie iterators.
//!
//! Keys are yielded in depth-first order; within a node the order of its
//! children is unspecified. Use [`crate::trie::Trie::iter_sorted`] when a
//! stable order matters.
use crate::arena::Arena;
use crate::node::{NodeId, TrieAtom};
use crate::trie::Trie;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// Iterator Item
#[derive(Debug)]
#[cfg_attr(
    feature = "serde",
    derive(Deserialize),
    serde(crate = "serde_crate")
)]
pub struct KeyValue<A, V> {
    pub key: Vec<A>,
    pub value: V,
}

/// Iterator Item
#[derive(Debug)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize),
    serde(crate = "serde_crate")
)]
pub struct KeyValueRef<'a, A, V> {
    pub key: Vec<A>,
    pub value: &'a V,
}

/// Iterator over a borrowed Trie.
#[derive(Debug)]
pub struct Iter<'a, A: TrieAtom, V> {
    arena: &'a Arena<A, V>,
    stack: Vec<NodeId>,
    path: Vec<A>,
    remaining: usize,
}

impl<'a, A: TrieAtom, V> Iter<'a, A, V> {
    pub(crate) fn new(arena: &'a Arena<A, V>, count: usize) -> Self {
        Self {
            arena,
            stack: vec![NodeId::ROOT],
            path: vec![],
            remaining: count,
        }
    }
}

impl<'a, A: TrieAtom, V> Iterator for Iter<'a, A, V> {
    type Item = KeyValueRef<'a, A, V>;

    fn next(&mut self) -> Option<Self::Item> {
        let arena = self.arena;
        while let Some(id) = self.stack.pop() {
            let node = &arena[id];
            if let Some(atom) = node.atom {
                // Everything deeper than our parent belongs to a finished subtree
                self.path.truncate(node.depth - 1);
                self.path.push(atom);
            }
            self.stack.extend(node.children.values().copied());
            if let Some(value) = node.value.as_ref() {
                self.remaining -= 1;
                return Some(KeyValueRef {
                    key: self.path.clone(),
                    value,
                });
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, A: TrieAtom, V> ExactSizeIterator for Iter<'a, A, V> {}

/// Iterator over an owned Trie.
#[derive(Debug)]
pub struct TrieIntoIterator<A, V> {
    results: std::vec::IntoIter<KeyValue<A, V>>,
}

impl<A: TrieAtom, V> IntoIterator for Trie<A, V> {
    type Item = KeyValue<A, V>;
    type IntoIter = TrieIntoIterator<A, V>;

    fn into_iter(self) -> Self::IntoIter {
        let count = self.len();
        let mut arena = self.arena;
        let mut results = Vec::with_capacity(count);
        let mut stack = vec![NodeId::ROOT];
        let mut path = vec![];

        // Same walk as Iter, but values are moved out of the nodes
        while let Some(id) = stack.pop() {
            let node = &mut arena[id];
            if let Some(atom) = node.atom {
                path.truncate(node.depth - 1);
                path.push(atom);
            }
            stack.extend(node.children.values().copied());
            if let Some(value) = node.value.take() {
                results.push(KeyValue {
                    key: path.clone(),
                    value,
                });
            }
        }

        TrieIntoIterator {
            results: results.into_iter(),
        }
    }
}

impl<A, V> Iterator for TrieIntoIterator<A, V> {
    type Item = KeyValue<A, V>;

    fn next(&mut self) -> Option<Self::Item> {
        self.results.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.results.size_hint()
    }
}

impl<A, V> ExactSizeIterator for TrieIntoIterator<A, V> {}

// Iterator
impl<'a, A: TrieAtom, V> IntoIterator for &'a Trie<A, V> {
    type Item = KeyValueRef<'a, A, V>;
    type IntoIter = Iter<'a, A, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;
    use rand::{distr::Alphanumeric, rng, Rng};
    use std::iter::FromIterator;

    #[test]
    fn it_iterates_over_empty_trie() {
        let trie: Trie<char, usize> = Trie::new();
        assert_eq!(trie.iter().count(), 0);
        assert_eq!(trie.into_iter().count(), 0);
    }

    #[test]
    fn it_iterates_and_re_assembles_trie() {
        let mut trie = Trie::new();
        let input = "the quick brown fox".split_whitespace();
        trie.add(input, 4).unwrap();

        for kv_pair in trie.into_iter() {
            assert_eq!(
                "the quick brown fox",
                Itertools::intersperse(kv_pair.key.into_iter(), " ").collect::<String>()
            );
            assert_eq!(kv_pair.value, 4);
        }
    }

    fn populated() -> Trie<char, usize> {
        let mut trie: Trie<char, usize> = Trie::new();
        for word in ["abcdef", "abcdefg", "abd", "ez", "z", "ze", "abdd"] {
            trie.add(word.chars(), word.len()).unwrap();
        }
        trie
    }

    #[test]
    fn it_iterates_over_owned_populated_trie() {
        let trie = populated();
        let mut words: Vec<(String, usize)> = trie
            .into_iter()
            .map(|kv| (String::from_iter(kv.key), kv.value))
            .collect();
        words.sort();
        assert_eq!(
            words,
            vec![
                ("abcdef".to_string(), 6),
                ("abcdefg".to_string(), 7),
                ("abd".to_string(), 3),
                ("abdd".to_string(), 4),
                ("ez".to_string(), 2),
                ("z".to_string(), 1),
                ("ze".to_string(), 2),
            ]
        );
    }

    #[test]
    fn it_iterates_over_populated_trie() {
        let trie = populated();
        let iter = (&trie).into_iter();
        assert_eq!(iter.len(), 7);
        for kv_pair in iter {
            assert_eq!(kv_pair.key.len(), *kv_pair.value);
            assert!(trie.contains_key(kv_pair.key.iter().copied()).unwrap());
        }
    }

    #[test]
    fn it_can_iter_sorted() {
        let trie = populated();
        let sorted_words: Vec<String> = trie
            .iter_sorted()
            .map(|x| x.key.iter().collect())
            .collect();
        assert_eq!(
            sorted_words,
            vec!["abcdef", "abcdefg", "abd", "abdd", "ez", "z", "ze"]
        );
    }

    #[test]
    fn it_skips_removed_keys() {
        let mut trie = populated();
        trie.remove("abcdef".chars()).unwrap();
        trie.remove("z".chars()).unwrap();
        let sorted_words: Vec<String> = trie
            .iter_sorted()
            .map(|x| x.key.iter().collect())
            .collect();
        assert_eq!(sorted_words, vec!["abcdefg", "abd", "abdd", "ez", "ze"]);
    }

    #[test]
    fn it_finds_in_populated_trie() {
        static POPULATION_SIZE: usize = 1000;
        static SIZE: usize = 64;
        let mut trie: Trie<char, usize> = Trie::new();
        let mut searches: Vec<Vec<char>> = vec![];
        for _i in 0..POPULATION_SIZE {
            let entry: Vec<char> = rng()
                .sample_iter(&Alphanumeric)
                .take(rng().random_range(1..=SIZE))
                .map(char::from)
                .collect();
            let len = entry.len();
            trie.set(entry.iter().copied(), len).unwrap();
            searches.push(entry);
        }
        let keys: Vec<Vec<char>> = trie.iter().map(|x| x.key).collect();
        for entry in &searches {
            assert!(keys.contains(entry));
        }
        assert_eq!(keys.len(), trie.len());
    }
}
