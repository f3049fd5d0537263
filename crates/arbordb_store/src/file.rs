//! Durable snapshot-backed record store.

use crate::dir::StoreDir;
use crate::error::StoreResult;
use crate::index::TreeIndex;
use crate::record::{NewNode, NodeId, NodeRecord};
use crate::store::RecordStore;
use crate::types::NodeKey;
use parking_lot::RwLock;
use std::path::Path;

/// A durable record store backed by a directory.
///
/// The full record table lives in memory (the same indexed table
/// [`crate::MemoryStore`] uses) and is persisted to the `NODES` snapshot on
/// every mutation with write-then-rename, so a crash mid-write leaves the
/// previous snapshot intact. An exclusive `LOCK` file keeps other processes
/// out of the directory.
///
/// Mutations are staged on a copy of the table and the copy is persisted
/// before it replaces the live table. If persisting fails, the live table
/// is untouched and memory stays in agreement with disk.
///
/// # Example
///
/// ```rust,ignore
/// use arbordb_store::{FileStore, NewNode, NodeKey, RecordStore};
/// use std::path::Path;
///
/// let store = FileStore::open(Path::new("my_tree"))?;
/// store.insert(NewNode::new(NodeKey::new(50), None, "fifty"))?;
/// ```
#[derive(Debug)]
pub struct FileStore {
    dir: StoreDir,
    index: RwLock<TreeIndex>,
}

impl FileStore {
    /// Opens or creates a store directory.
    ///
    /// An existing snapshot is loaded and validated; an empty or missing
    /// snapshot yields an empty store.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Another process holds the store lock (`Locked`)
    /// - The snapshot is damaged or fails integrity checks (`Corrupted`)
    /// - An I/O error occurs
    pub fn open(path: &Path) -> StoreResult<Self> {
        let dir = StoreDir::open(path)?;
        let index = match dir.load_snapshot()? {
            Some(records) => TreeIndex::from_records(records)?,
            None => TreeIndex::new(),
        };

        Ok(Self {
            dir,
            index: RwLock::new(index),
        })
    }

    /// Stages a mutation on a copy of the table, persists the copy, then
    /// swaps it in. A failed persist leaves the live table unchanged.
    fn commit<T>(&self, mutate: impl FnOnce(&mut TreeIndex) -> StoreResult<T>) -> StoreResult<T> {
        let mut index = self.index.write();
        let mut staged = index.clone();
        let out = mutate(&mut staged)?;
        self.dir.save_snapshot(staged.scan())?;
        *index = staged;
        Ok(out)
    }
}

impl RecordStore for FileStore {
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
        self.commit(|index| index.insert(new))
    }

    fn delete_by_id(&self, id: NodeId) -> StoreResult<bool> {
        self.commit(|index| Ok(index.delete(id)))
    }

    fn root(&self) -> StoreResult<Option<NodeRecord>> {
        Ok(self.index.read().root())
    }

    fn scan(&self) -> StoreResult<Vec<NodeRecord>> {
        Ok(self.index.read().scan())
    }

    fn clear(&self) -> StoreResult<usize> {
        self.commit(|index| Ok(index.clear()))
    }

    fn count(&self) -> StoreResult<usize> {
        Ok(self.index.read().len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use tempfile::tempdir;

    fn draft(key: i64, parent: Option<NodeId>) -> NewNode {
        NewNode::new(NodeKey::new(key), parent, format!("node {key}"))
    }

    #[test]
    fn file_open_creates_directory() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("tree");

        let store = FileStore::open(&path).unwrap();
        assert!(path.is_dir());
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn file_lock_prevents_second_open() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("tree");

        let _store = FileStore::open(&path).unwrap();
        let result = FileStore::open(&path);
        assert!(matches!(result, Err(StoreError::Locked)));
    }

    #[test]
    fn file_records_survive_reopen() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("tree");

        let (root_id, child_id) = {
            let store = FileStore::open(&path).unwrap();
            let root = store.insert(draft(50, None)).unwrap();
            let child = store.insert(draft(30, Some(root.id))).unwrap();
            (root.id, child.id)
        };

        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.count().unwrap(), 2);

        // Identities are stable across restarts
        let root = store.root().unwrap().unwrap();
        assert_eq!(root.id, root_id);
        let children = store.children_of(root_id).unwrap();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].id, child_id);
        assert_eq!(children[0].key, NodeKey::new(30));
    }

    #[test]
    fn file_refused_insert_persists_nothing() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("tree");

        {
            let store = FileStore::open(&path).unwrap();
            store.insert(draft(50, None)).unwrap();
            let result = store.insert(draft(50, None));
            assert!(matches!(result, Err(StoreError::DuplicateKey { .. })));
        }

        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn file_delete_and_clear_persist() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("tree");

        {
            let store = FileStore::open(&path).unwrap();
            let root = store.insert(draft(50, None)).unwrap();
            let child = store.insert(draft(30, Some(root.id))).unwrap();
            assert!(store.delete_by_id(child.id).unwrap());
        }

        {
            let store = FileStore::open(&path).unwrap();
            assert_eq!(store.count().unwrap(), 1);
            assert_eq!(store.clear().unwrap(), 1);
        }

        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn file_damaged_snapshot_refused_on_open() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("tree");

        {
            let store = FileStore::open(&path).unwrap();
            store.insert(draft(50, None)).unwrap();
        }

        std::fs::write(path.join("NODES"), b"garbage").unwrap();

        let result = FileStore::open(&path);
        assert!(matches!(result, Err(StoreError::Corrupted(_))));
    }

    #[test]
    fn file_inconsistent_snapshot_refused_on_open() {
        use crate::snapshot;
        use chrono::Utc;

        let temp = tempdir().unwrap();
        let path = temp.path().join("tree");
        std::fs::create_dir_all(&path).unwrap();

        // A child whose parent is not in the table
        let orphan = NodeRecord {
            key: NodeKey::new(30),
            id: NodeId::new(),
            parent: Some(NodeId::new()),
            label: "thirty".to_owned(),
            created_at: Utc::now(),
        };
        let bytes = snapshot::encode(vec![orphan]).unwrap();
        std::fs::write(path.join("NODES"), bytes).unwrap();

        let result = FileStore::open(&path);
        assert!(matches!(result, Err(StoreError::Corrupted(_))));
    }
}
