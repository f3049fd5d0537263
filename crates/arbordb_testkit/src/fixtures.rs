//! Engine fixtures with automatic cleanup.

use arbordb_engine::TreeEngine;
use arbordb_format::{render_label, Locale};
use arbordb_store::{FileStore, MemoryStore, NodeKey};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

/// The fixture key sequence. Inserted in this order it builds a complete
/// tree: root 50, a full second and third level, and eight leaves.
pub const FIXTURE_KEYS: [i64; 15] = [
    50, 30, 70, 20, 40, 60, 80, 10, 25, 35, 45, 55, 65, 75, 85,
];

/// A tree engine over a disposable store.
pub struct TestEngine {
    /// The engine under test.
    pub engine: TreeEngine,
    /// Kept alive so file-backed stores are cleaned up on drop.
    _temp_dir: Option<TempDir>,
}

impl TestEngine {
    /// Creates an engine over a fresh in-memory store.
    #[must_use]
    pub fn memory() -> Self {
        Self {
            engine: TreeEngine::new(Arc::new(MemoryStore::new())),
            _temp_dir: None,
        }
    }

    /// Creates an engine over a file store in a temporary directory.
    #[must_use]
    pub fn file() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = FileStore::open(temp_dir.path()).expect("Failed to open file store");
        Self {
            engine: TreeEngine::new(Arc::new(store)),
            _temp_dir: Some(temp_dir),
        }
    }

    /// Returns the store directory if file-backed, `None` if in-memory.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self._temp_dir.as_ref().map(TempDir::path)
    }

    /// Inserts the keys in order, labeled in English.
    pub fn seed(&self, keys: &[i64]) {
        for &key in keys {
            let node_key = NodeKey::new(key);
            self.engine
                .insert(node_key, render_label(node_key, Locale::En))
                .expect("Failed to seed key");
        }
    }

    /// An in-memory engine preloaded with [`FIXTURE_KEYS`].
    #[must_use]
    pub fn seeded() -> Self {
        let fixture = Self::memory();
        fixture.seed(&FIXTURE_KEYS);
        fixture
    }
}

impl std::ops::Deref for TestEngine {
    type Target = TreeEngine;

    fn deref(&self) -> &Self::Target {
        &self.engine
    }
}

/// Runs a test with a fresh in-memory engine.
///
/// # Example
///
/// ```rust,ignore
/// use arbordb_testkit::with_temp_engine;
/// use arbordb_store::NodeKey;
///
/// #[test]
/// fn my_test() {
///     with_temp_engine(|engine| {
///         engine.insert(NodeKey::new(50), "fifty").unwrap();
///         // ... test operations
///     });
/// }
/// ```
pub fn with_temp_engine<F, R>(f: F) -> R
where
    F: FnOnce(&TreeEngine) -> R,
{
    let fixture = TestEngine::memory();
    f(&fixture.engine)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_fixture_is_a_complete_tree() {
        let fixture = TestEngine::seeded();
        assert_eq!(fixture.node_count().unwrap(), 15);

        // root + two full inner levels
        let internal = fixture.list_internal_nodes().unwrap();
        assert_eq!(internal.len(), 7);
        assert!(internal.iter().all(|n| n.child_count == 2));

        let subtree = fixture.subtree(NodeKey::new(50), None).unwrap();
        assert_eq!(subtree.node_count(), 15);
    }

    #[test]
    fn file_fixture_reports_its_path() {
        let fixture = TestEngine::file();
        assert!(fixture.path().is_some());
        fixture.seed(&[50, 30]);
        assert_eq!(fixture.node_count().unwrap(), 2);

        assert!(TestEngine::memory().path().is_none());
    }

    #[test]
    fn temp_engine_runs_the_closure() {
        let count = with_temp_engine(|engine| {
            engine.insert(NodeKey::new(1), "one").unwrap();
            engine.node_count().unwrap()
        });
        assert_eq!(count, 1);
    }
}
