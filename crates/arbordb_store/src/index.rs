//! In-memory indexed node table.

use crate::error::{StoreError, StoreResult};
use crate::record::{NewNode, NodeId, NodeRecord};
use crate::types::NodeKey;
use std::collections::{BTreeMap, HashMap};

/// Indexed table of node records.
///
/// This is the storage engine shared by [`crate::MemoryStore`] and
/// [`crate::FileStore`]: a primary identity map plus key and parent indexes,
/// so key lookups and child listings avoid scans. All integrity checks live
/// here. The table carries no locking of its own; stores wrap it in a
/// `parking_lot::RwLock`.
#[derive(Debug, Clone, Default)]
pub(crate) struct TreeIndex {
    /// Primary table: identity -> record.
    records: HashMap<NodeId, NodeRecord>,
    /// Key index. The BTreeMap keeps scans key-ordered.
    by_key: BTreeMap<NodeKey, NodeId>,
    /// Parent index: parent identity -> child key -> child identity,
    /// key-ordered so child listings come out sorted.
    children: HashMap<NodeId, BTreeMap<NodeKey, NodeId>>,
    /// Identity of the parentless record, if any.
    root: Option<NodeId>,
}

impl TreeIndex {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a table from raw records, validating integrity.
    ///
    /// Violations (duplicate keys or identities, dangling parents, more
    /// than one root) are reported as corruption: this path only runs when
    /// loading a snapshot.
    pub(crate) fn from_records(records: Vec<NodeRecord>) -> StoreResult<Self> {
        let mut index = Self::default();

        for record in records {
            if index.by_key.contains_key(&record.key) {
                return Err(StoreError::corrupted(format!(
                    "duplicate key in snapshot: {}",
                    record.key
                )));
            }
            if index.records.contains_key(&record.id) {
                return Err(StoreError::corrupted(format!(
                    "duplicate identity in snapshot: {}",
                    record.id
                )));
            }
            index.by_key.insert(record.key, record.id);
            index.records.insert(record.id, record);
        }

        for record in index.records.values() {
            match record.parent {
                Some(parent) => {
                    if !index.records.contains_key(&parent) {
                        return Err(StoreError::corrupted(format!(
                            "record {} references missing parent {parent}",
                            record.key
                        )));
                    }
                    index
                        .children
                        .entry(parent)
                        .or_default()
                        .insert(record.key, record.id);
                }
                None => {
                    if index.root.is_some() {
                        return Err(StoreError::corrupted(
                            "snapshot contains more than one root record",
                        ));
                    }
                    index.root = Some(record.id);
                }
            }
        }

        Ok(index)
    }

    pub(crate) fn find_by_key(&self, key: NodeKey) -> Option<NodeRecord> {
        self.by_key
            .get(&key)
            .and_then(|id| self.records.get(id))
            .cloned()
    }

    pub(crate) fn find_by_id(&self, id: NodeId) -> Option<NodeRecord> {
        self.records.get(&id).cloned()
    }

    pub(crate) fn children_of(&self, id: NodeId) -> Vec<NodeRecord> {
        match self.children.get(&id) {
            Some(bucket) => bucket
                .values()
                .filter_map(|child| self.records.get(child))
                .cloned()
                .collect(),
            None => Vec::new(),
        }
    }

    pub(crate) fn exists_key(&self, key: NodeKey) -> bool {
        self.by_key.contains_key(&key)
    }

    /// Inserts a new record, assigning its identity.
    pub(crate) fn insert(&mut self, new: NewNode) -> StoreResult<NodeRecord> {
        if self.by_key.contains_key(&new.key) {
            return Err(StoreError::DuplicateKey { key: new.key });
        }
        match new.parent {
            Some(parent) if !self.records.contains_key(&parent) => {
                return Err(StoreError::UnknownParent { parent });
            }
            None if self.root.is_some() => return Err(StoreError::RootOccupied),
            _ => {}
        }

        let record = NodeRecord {
            key: new.key,
            id: NodeId::new(),
            parent: new.parent,
            label: new.label,
            created_at: new.created_at,
        };

        self.by_key.insert(record.key, record.id);
        match record.parent {
            Some(parent) => {
                self.children
                    .entry(parent)
                    .or_default()
                    .insert(record.key, record.id);
            }
            None => self.root = Some(record.id),
        }
        self.records.insert(record.id, record.clone());

        Ok(record)
    }

    /// Removes a record by identity. Returns `false` for unknown identities.
    pub(crate) fn delete(&mut self, id: NodeId) -> bool {
        let Some(record) = self.records.remove(&id) else {
            return false;
        };

        self.by_key.remove(&record.key);
        if let Some(parent) = record.parent {
            if let Some(bucket) = self.children.get_mut(&parent) {
                bucket.remove(&record.key);
                if bucket.is_empty() {
                    self.children.remove(&parent);
                }
            }
        }
        if self.root == Some(id) {
            self.root = None;
        }
        // Keep a non-empty child bucket: callers enforce leaf-only deletion,
        // but if a parent ever goes first the index must keep matching the
        // records that still reference it.
        if let Some(bucket) = self.children.get(&id) {
            if bucket.is_empty() {
                self.children.remove(&id);
            }
        }

        true
    }

    pub(crate) fn root(&self) -> Option<NodeRecord> {
        self.root.and_then(|id| self.records.get(&id)).cloned()
    }

    pub(crate) fn scan(&self) -> Vec<NodeRecord> {
        self.by_key
            .values()
            .filter_map(|id| self.records.get(id))
            .cloned()
            .collect()
    }

    pub(crate) fn clear(&mut self) -> usize {
        let removed = self.records.len();
        self.records.clear();
        self.by_key.clear();
        self.children.clear();
        self.root = None;
        removed
    }

    pub(crate) fn len(&self) -> usize {
        self.records.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
