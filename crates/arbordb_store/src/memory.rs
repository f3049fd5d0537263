//! In-memory record store.

use crate::error::StoreResult;
use crate::index::TreeIndex;
use crate::record::{NewNode, NodeId, NodeRecord};
use crate::store::RecordStore;
use crate::types::NodeKey;
use parking_lot::RwLock;

/// An in-memory record store.
///
/// This is the reference implementation of [`RecordStore`], suitable for:
/// - Unit tests
/// - Integration tests
/// - Ephemeral servers that don't need persistence
///
/// [`crate::FileStore`] wraps the same indexed table with durability.
///
/// # Thread Safety
///
/// Thread-safe: the table sits behind a `parking_lot::RwLock`; share the
/// store as `Arc<dyn RecordStore>`.
///
/// # Example
///
/// ```rust
/// use arbordb_store::{MemoryStore, NewNode, NodeKey, RecordStore};
///
/// let store = MemoryStore::new();
/// let root = store
///     .insert(NewNode::new(NodeKey::new(50), None, "fifty"))
///     .unwrap();
/// assert!(root.is_root());
/// assert!(store.exists_key(NodeKey::new(50)).unwrap());
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    index: RwLock<TreeIndex>,
}

impl MemoryStore {
    /// Creates a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryStore {
    fn find_by_key(&self, key: NodeKey) -> StoreResult<Option<NodeRecord>> {
        Ok(self.index.read().find_by_key(key))
    }

    fn find_by_id(&self, id: NodeId) -> StoreResult<Option<NodeRecord>> {
        Ok(self.index.read().find_by_id(id))
    }

    fn children_of(&self, id: NodeId) -> StoreResult<Vec<NodeRecord>> {
        Ok(self.index.read().children_of(id))
    }

    fn exists_key(&self, key: NodeKey) -> StoreResult<bool> {
        Ok(self.index.read().exists_key(key))
    }

    fn insert(&self, new: NewNode) -> StoreResult<NodeRecord> {
        self.index.write().insert(new)
    }

    fn delete_by_id(&self, id: NodeId) -> StoreResult<bool> {
        Ok(self.index.write().delete(id))
    }

    fn root(&self) -> StoreResult<Option<NodeRecord>> {
        Ok(self.index.read().root())
    }

    fn scan(&self) -> StoreResult<Vec<NodeRecord>> {
        Ok(self.index.read().scan())
    }

    fn clear(&self) -> StoreResult<usize> {
        Ok(self.index.write().clear())
    }

    fn count(&self) -> StoreResult<usize> {
        Ok(self.index.read().len())
    }
}
