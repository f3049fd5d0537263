//! Record store trait definition.

use crate::error::StoreResult;
use crate::record::{NewNode, NodeId, NodeRecord};
use crate::types::NodeKey;

/// Flat storage for node records.
///
/// A record store is a table of [`NodeRecord`]s addressed by identity and
/// indexed by key and by parent. It knows nothing about placement or
/// traversal; the tree engine owns all shape decisions. Stores take `&self`
/// everywhere and are shared as `Arc<dyn RecordStore>`.
///
/// # Invariants
///
/// - Keys are unique: `insert` refuses a duplicate key.
/// - Parent references resolve: `insert` refuses a parent identity that is
///   not present in the table. Parent pointers never change after creation,
///   so cycles are unrepresentable.
/// - At most one record is parentless: `insert` refuses a second root.
/// - `children_of` and `scan` return records ordered ascending by key.
///
/// `delete_by_id` is a plain table operation; it does not check for
/// children. Callers that need leaf-only deletion enforce it above this
/// trait.
///
/// # Implementors
///
/// - [`crate::MemoryStore`] - In-memory reference implementation
/// - [`crate::FileStore`] - Durable snapshot-backed implementation
pub trait RecordStore: Send + Sync {
    /// Looks up a record by its external key.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage fails.
    fn find_by_key(&self, key: NodeKey) -> StoreResult<Option<NodeRecord>>;

    /// Looks up a record by its identity.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage fails.
    fn find_by_id(&self, id: NodeId) -> StoreResult<Option<NodeRecord>>;

    /// Returns the children of the given record, ordered ascending by key.
    ///
    /// An identity with no children (or no record at all) yields an empty
    /// vector.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage fails.
    fn children_of(&self, id: NodeId) -> StoreResult<Vec<NodeRecord>>;

    /// True if a record with the given key exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage fails.
    fn exists_key(&self, key: NodeKey) -> StoreResult<bool>;

    /// Inserts a new record and returns it with its assigned identity.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The key already exists (`DuplicateKey`)
    /// - The parent identity does not resolve (`UnknownParent`)
    /// - The payload is parentless but a root already exists (`RootOccupied`)
    /// - The underlying storage fails
    fn insert(&self, new: NewNode) -> StoreResult<NodeRecord>;

    /// Deletes a record by identity.
    ///
    /// Returns `true` if a record was removed, `false` if the identity was
    /// unknown.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage fails.
    fn delete_by_id(&self, id: NodeId) -> StoreResult<bool>;

    /// Returns the parentless record, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage fails.
    fn root(&self) -> StoreResult<Option<NodeRecord>>;

    /// Returns every record, ordered ascending by key.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage fails.
    fn scan(&self) -> StoreResult<Vec<NodeRecord>>;

    /// Removes every record, returning how many were removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage fails.
    fn clear(&self) -> StoreResult<usize>;

    /// Number of records in the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage fails.
    fn count(&self) -> StoreResult<usize>;
}
