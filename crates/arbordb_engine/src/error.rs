//! Error types for tree engine operations.

use arbordb_store::{NodeKey, StoreError};
use thiserror::Error;

/// Result type for tree engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur during tree operations.
///
/// The first three variants are outcomes of the tree contract itself and
/// map to client mistakes at the boundary; `Store` covers everything the
/// record store reports outside tree logic and is never retried here.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Insert of a key that already exists.
    #[error("key {key} already exists in the tree")]
    KeyConflict {
        /// The conflicting key.
        key: NodeKey,
    },

    /// Operation addressed a key that is not in the tree.
    #[error("node with key {key} not found")]
    NotFound {
        /// The missing key.
        key: NodeKey,
    },

    /// Delete of a node that still has children.
    #[error("cannot delete node {key} because it has children")]
    HasChildren {
        /// The non-leaf key.
        key: NodeKey,
    },

    /// The record store failed.
    #[error("record store unavailable: {0}")]
    Store(#[from] StoreError),
}

impl EngineError {
    /// True for errors caused by the request (conflicting, missing, or
    /// non-leaf key), false for store failures.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::KeyConflict { .. } | Self::NotFound { .. } | Self::HasChildren { .. }
        )
    }
}
