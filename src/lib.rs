//! Provides a Trie for storing keys composed of sequences of atoms, where
//! every key carries a value, with longest-match lookups on top.
//!
//! Keys may be any iterator of atoms supporting the
//! [`crate::node::TrieAtom`] trait (`Copy + Eq + Hash`). Values are
//! unconstrained.
//!
//! Each edge of the tree consumes exactly one atom. Nodes are kept in an
//! arena and link to their parent by index, so a lookup can walk back up
//! from the deepest node it reached. That gives three kinds of match:
//!  - exact: [`crate::trie::Trie::find`] without partial matching
//!  - longest stored prefix of an input: [`crate::trie::Trie::find`] with
//!    partial matching
//!  - longest stored key anywhere inside a text:
//!    [`crate::trie::Trie::search`]
//!
//! Removing a key prunes the branch nodes it no longer needs.
//!
//! Examples:
//! * trie : [`crate::trie`]
//! * iterator : [`crate::iterator`]
//!
//! The trie is not synchronised. Wrap it in a lock if it is shared between
//! threads.

#[cfg(feature = "serde")]
extern crate serde_crate;

mod arena;

pub mod error;

pub mod iterator;

pub mod node;

pub mod trie;
