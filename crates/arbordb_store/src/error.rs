//! Error types for record store operations.

use crate::record::NodeId;
use crate::types::NodeKey;
use std::io;
use thiserror::Error;

/// Result type for record store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur during record store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The snapshot file is damaged or has an unsupported format.
    #[error("store corrupted: {0}")]
    Corrupted(String),

    /// Snapshot encoding or decoding failed.
    #[error("snapshot codec error: {0}")]
    Codec(String),

    /// Another process holds the store lock.
    #[error("store is locked by another process")]
    Locked,

    /// An insert would duplicate an existing key.
    #[error("duplicate key: {key}")]
    DuplicateKey {
        /// The conflicting key.
        key: NodeKey,
    },

    /// An insert referenced a parent identity that is not in the table.
    #[error("unknown parent identity: {parent}")]
    UnknownParent {
        /// The dangling parent reference.
        parent: NodeId,
    },

    /// An insert would create a second parentless record.
    #[error("a root record already exists")]
    RootOccupied,
}

impl StoreError {
    /// Creates a corruption error.
    pub fn corrupted(reason: impl Into<String>) -> Self {
        Self::Corrupted(reason.into())
    }

    /// True for refusals that enforce table integrity (duplicate key,
    /// dangling parent, second root), false for availability failures.
    #[must_use]
    pub const fn is_integrity(&self) -> bool {
        matches!(
            self,
            Self::DuplicateKey { .. } | Self::UnknownParent { .. } | Self::RootOccupied
        )
    }
}
