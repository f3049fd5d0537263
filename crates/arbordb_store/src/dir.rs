//! Store directory management.
//!
//! File system layout:
//!
//! ```text
//! <store_path>/
//! ├─ NODES    # Snapshot of the record table
//! └─ LOCK     # Advisory lock for single-writer access
//! ```
//!
//! The LOCK file ensures only one process opens the store at a time. The
//! NODES snapshot is replaced atomically on every save.

use crate::error::{StoreError, StoreResult};
use crate::record::NodeRecord;
use crate::snapshot;
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// File names within the store directory.
const NODES_FILE: &str = "NODES";
const LOCK_FILE: &str = "LOCK";
/// Temporary file for atomic snapshot writes.
const NODES_TEMP: &str = "NODES.tmp";

/// Manages the store directory and file locking.
///
/// Only one `StoreDir` instance can exist per directory at a time; the
/// exclusive lock is released when the instance is dropped.
#[derive(Debug)]
pub(crate) struct StoreDir {
    /// Root directory path.
    path: PathBuf,
    /// Lock file handle (held for exclusive access).
    _lock_file: File,
}

impl StoreDir {
    /// Opens or creates a store directory and acquires its lock.
    pub(crate) fn open(path: &Path) -> StoreResult<Self> {
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        if !path.is_dir() {
            return Err(StoreError::corrupted(format!(
                "path is not a directory: {}",
                path.display()
            )));
        }

        let lock_path = path.join(LOCK_FILE);
        let lock_file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        // Non-blocking: a held lock means another process owns the store
        if lock_file.try_lock_exclusive().is_err() {
            return Err(StoreError::Locked);
        }

        Ok(Self {
            path: path.to_path_buf(),
            _lock_file: lock_file,
        })
    }

    /// Returns the path to the NODES snapshot file.
    pub(crate) fn nodes_path(&self) -> PathBuf {
        self.path.join(NODES_FILE)
    }

    /// Loads the snapshot from disk.
    ///
    /// Returns `None` if the snapshot file doesn't exist yet (new store).
    pub(crate) fn load_snapshot(&self) -> StoreResult<Option<Vec<NodeRecord>>> {
        let nodes_path = self.nodes_path();

        if !nodes_path.exists() {
            return Ok(None);
        }

        let mut file = File::open(&nodes_path)?;
        let mut data = Vec::new();
        file.read_to_end(&mut data)?;

        if data.is_empty() {
            return Ok(None);
        }

        Ok(Some(snapshot::decode(&data)?))
    }

    /// Saves the snapshot to disk atomically.
    ///
    /// Write-then-rename pattern for crash safety:
    /// 1. Write to a temporary file
    /// 2. Sync the temporary file to disk
    /// 3. Rename it over NODES
    /// 4. Fsync the directory so the rename itself is durable
    pub(crate) fn save_snapshot(&self, records: Vec<NodeRecord>) -> StoreResult<()> {
        let data = snapshot::encode(records)?;
        let temp_path = self.path.join(NODES_TEMP);

        let mut file = File::create(&temp_path)?;
        file.write_all(&data)?;
        file.sync_all()?;
        drop(file);

        fs::rename(&temp_path, self.nodes_path())?;
        self.sync_directory()?;

        Ok(())
    }

    /// Syncs the store directory so metadata updates are durable.
    #[cfg(unix)]
    fn sync_directory(&self) -> StoreResult<()> {
        // On Unix, fsync on a directory syncs the directory entries
        let dir = File::open(&self.path)?;
        dir.sync_all()?;
        Ok(())
    }

    #[cfg(not(unix))]
    fn sync_directory(&self) -> StoreResult<()> {
        // Windows NTFS journaling covers metadata durability; directory
        // fsync is not supported there
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{NodeId, NodeRecord};
    use crate::types::NodeKey;
    use chrono::Utc;
    use tempfile::tempdir;

    fn record(key: i64) -> NodeRecord {
        NodeRecord {
            key: NodeKey::new(key),
            id: NodeId::new(),
            parent: None,
            label: format!("node {key}"),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn open_creates_directory() {
        let temp = tempdir().unwrap();
        let store_path = temp.path().join("new_store");

        assert!(!store_path.exists());

        let dir = StoreDir::open(&store_path).unwrap();
        assert!(store_path.exists());
        assert!(store_path.is_dir());

        drop(dir);
    }

    #[test]
    fn lock_prevents_second_open() {
        let temp = tempdir().unwrap();
        let store_path = temp.path().join("locked_store");

        let _dir1 = StoreDir::open(&store_path).unwrap();

        let result = StoreDir::open(&store_path);
        assert!(matches!(result, Err(StoreError::Locked)));
    }

    #[test]
    fn lock_released_on_drop() {
        let temp = tempdir().unwrap();
        let store_path = temp.path().join("reopen_store");

        {
            let _dir = StoreDir::open(&store_path).unwrap();
        }

        let _dir2 = StoreDir::open(&store_path).unwrap();
    }

    #[test]
    fn snapshot_round_trip() {
        let temp = tempdir().unwrap();
        let store_path = temp.path().join("snapshot_store");

        let dir = StoreDir::open(&store_path).unwrap();
        assert!(dir.load_snapshot().unwrap().is_none());

        let records = vec![record(50)];
        dir.save_snapshot(records.clone()).unwrap();

        let loaded = dir.load_snapshot().unwrap().unwrap();
        assert_eq!(loaded, records);
    }

    #[test]
    fn save_replaces_previous_snapshot() {
        let temp = tempdir().unwrap();
        let store_path = temp.path().join("replace_store");

        let dir = StoreDir::open(&store_path).unwrap();
        dir.save_snapshot(vec![record(50)]).unwrap();
        dir.save_snapshot(vec![record(60)]).unwrap();

        let loaded = dir.load_snapshot().unwrap().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].key, NodeKey::new(60));
    }

    #[test]
    fn damaged_snapshot_is_corruption() {
        let temp = tempdir().unwrap();
        let store_path = temp.path().join("damaged_store");

        {
            let dir = StoreDir::open(&store_path).unwrap();
            std::fs::write(dir.nodes_path(), b"not a snapshot").unwrap();
        }

        let dir = StoreDir::open(&store_path).unwrap();
        let result = dir.load_snapshot();
        assert!(matches!(result, Err(StoreError::Corrupted(_))));
    }
}
