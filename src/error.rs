//! Errors reported by [`crate::trie::Trie`] operations.
//!
//! Absence is never an error: lookups report it with `Option` or `bool`.

/// Result type for trie operations.
pub type TrieResult<T> = Result<T, TrieError>;

/// Errors that can occur in trie operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TrieError {
    /// An empty key or empty search text was supplied. Raised before the
    /// tree is touched.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// `add` found the key already terminal. Intermediate nodes created on
    /// the way down are kept.
    #[error("key already exists")]
    KeyAlreadyExists,
}
