//! Core type definitions for the record store.

use serde::{Deserialize, Serialize};
use std::fmt;

/// External key of a node.
///
/// Keys are caller-supplied integers, unique across a store. Every public
/// operation addresses nodes by key; storage identities never serve as
/// external handles.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct NodeKey(pub i64);

impl NodeKey {
    /// Creates a key from a raw integer.
    #[must_use]
    pub const fn new(key: i64) -> Self {
        Self(key)
    }

    /// Returns the raw integer value.
    #[must_use]
    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for NodeKey {
    fn from(key: i64) -> Self {
        Self(key)
    }
}

impl From<NodeKey> for i64 {
    fn from(key: NodeKey) -> Self {
        key.0
    }
}
