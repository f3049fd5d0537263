//! Node identity and record types.

use crate::types::NodeKey;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Storage-assigned identity of a node record.
///
/// Identities are random UUIDs that are:
/// - Unique within a store
/// - Immutable once assigned
/// - Never reused, even after the record is deleted
///
/// They are internal handles. The external contract addresses nodes by
/// [`NodeKey`]; identities cross the store boundary only inside records.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(Uuid);

impl NodeId {
    /// Creates a new random identity.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an identity from a UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for NodeId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<NodeId> for Uuid {
    fn from(id: NodeId) -> Self {
        id.0
    }
}

/// A stored node record.
///
/// The tree shape lives entirely in `parent` pointers. Left/right
/// orientation is never stored; readers derive it by sorting a node's
/// children by key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    /// External key, unique across the store.
    pub key: NodeKey,
    /// Storage-assigned identity.
    pub id: NodeId,
    /// Identity of the parent record. `None` exactly for the root.
    pub parent: Option<NodeId>,
    /// Display label rendered when the record was created.
    pub label: String,
    /// Creation timestamp. Immutable.
    pub created_at: DateTime<Utc>,
}

impl NodeRecord {
    /// True when this record is the tree root.
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// Payload for inserting a new record.
///
/// The store assigns the identity; everything else comes from the caller.
#[derive(Debug, Clone)]
pub struct NewNode {
    /// External key. Must be unique across the store.
    pub key: NodeKey,
    /// Parent identity, `None` to create the root.
    pub parent: Option<NodeId>,
    /// Display label to store with the record.
    pub label: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl NewNode {
    /// Creates an insert payload stamped with the current time.
    #[must_use]
    pub fn new(key: NodeKey, parent: Option<NodeId>, label: impl Into<String>) -> Self {
        Self {
            key,
            parent,
            label: label.into(),
            created_at: Utc::now(),
        }
    }
}
