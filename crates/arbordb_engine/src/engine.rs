//! Tree engine operations.

use crate::error::{EngineError, EngineResult};
use crate::placement::resolve_placement;
use crate::view::{Deletion, InsertedNode, InternalNode, SubtreeNode};
use arbordb_store::{NewNode, NodeId, NodeKey, NodeRecord, RecordStore, StoreError};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

/// The tree maintenance engine.
///
/// Orchestrates the placement resolver and the record store to implement
/// ordered insertion, leaf-only deletion, the internal-node listing, and
/// depth-bounded subtree materialization. The engine holds no state of its
/// own: every operation recomputes from current store state, so successive
/// calls see whatever the store holds at that moment.
///
/// The engine performs no logging; outcomes are typed and the boundary
/// decides how to present them.
///
/// # Example
///
/// ```rust
/// use arbordb_engine::TreeEngine;
/// use arbordb_store::{MemoryStore, NodeKey};
/// use std::sync::Arc;
///
/// let engine = TreeEngine::new(Arc::new(MemoryStore::new()));
/// let root = engine.insert(NodeKey::new(50), "fifty").unwrap();
/// assert_eq!(root.parent_key, None);
///
/// let child = engine.insert(NodeKey::new(30), "thirty").unwrap();
/// assert_eq!(child.parent_key, Some(NodeKey::new(50)));
/// ```
pub struct TreeEngine {
    store: Arc<dyn RecordStore>,
}

impl TreeEngine {
    /// Creates an engine over the given record store.
    #[must_use]
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Inserts a new key into the tree.
    ///
    /// The first key into an empty store becomes the root. Every later key
    /// is placed by [`resolve_placement`] and created under the resolved
    /// parent. Returns the stored record together with the parent's
    /// external key.
    ///
    /// The existence pre-check gives the friendly conflict answer; the
    /// store's uniqueness constraint is the arbiter when two inserts race
    /// past it, and its refusal is reported as the same conflict.
    ///
    /// # Errors
    ///
    /// - [`EngineError::KeyConflict`] if the key is already present
    /// - [`EngineError::Store`] if the record store fails
    pub fn insert(&self, key: NodeKey, label: impl Into<String>) -> EngineResult<InsertedNode> {
        if self.store.exists_key(key)? {
            return Err(EngineError::KeyConflict { key });
        }

        let (parent_id, parent_key) = match self.store.root()? {
            Some(root) => {
                let parent = resolve_placement(self.store.as_ref(), &root, key)?;
                (Some(parent.id), Some(parent.key))
            }
            None => (None, None),
        };

        let record = match self.store.insert(NewNode::new(key, parent_id, label)) {
            Ok(record) => record,
            Err(StoreError::DuplicateKey { key }) => {
                return Err(EngineError::KeyConflict { key })
            }
            Err(err) => return Err(err.into()),
        };

        Ok(InsertedNode { record, parent_key })
    }

    /// Deletes a leaf node by key.
    ///
    /// Returns the removed key and its former parent's key. There is no
    /// cascade: a node with children is refused untouched.
    ///
    /// # Errors
    ///
    /// - [`EngineError::NotFound`] if the key is not in the tree
    /// - [`EngineError::HasChildren`] if the node is not a leaf
    /// - [`EngineError::Store`] if the record store fails
    pub fn delete_by_key(&self, key: NodeKey) -> EngineResult<Deletion> {
        let node = self
            .store
            .find_by_key(key)?
            .ok_or(EngineError::NotFound { key })?;

        if !self.store.children_of(node.id)?.is_empty() {
            return Err(EngineError::HasChildren { key });
        }

        let parent_key = self.parent_key_of(&node)?;
        self.store.delete_by_id(node.id)?;

        Ok(Deletion {
            deleted_key: key,
            parent_key,
        })
    }

    /// Lists every node that is the root or has at least one child,
    /// ascending by key.
    ///
    /// Each entry carries its child count and its parent's external key.
    /// An empty store yields an empty listing. The listing is recomputed
    /// from store state on every call.
    ///
    /// # Errors
    ///
    /// Returns an error if the record store fails.
    pub fn list_internal_nodes(&self) -> EngineResult<Vec<InternalNode>> {
        let records = self.store.scan()?;

        let key_of: HashMap<NodeId, NodeKey> = records.iter().map(|r| (r.id, r.key)).collect();
        let mut child_counts: HashMap<NodeId, usize> = HashMap::new();
        for record in &records {
            if let Some(parent) = record.parent {
                *child_counts.entry(parent).or_insert(0) += 1;
            }
        }

        // records come back key-ordered, so the listing is too
        let mut internal = Vec::new();
        for record in records {
            let child_count = child_counts.get(&record.id).copied().unwrap_or(0);
            if record.is_root() || child_count > 0 {
                let parent_key = record.parent.and_then(|p| key_of.get(&p).copied());
                internal.push(InternalNode {
                    record,
                    child_count,
                    parent_key,
                });
            }
        }

        Ok(internal)
    }

    /// Materializes the subtree rooted at `root_key`, depth-first,
    /// pre-order, children ascending by key.
    ///
    /// With `max_depth = Some(d)`, children are collected only for nodes
    /// fewer than `d` levels below the start; nodes at the bound come back
    /// with `children = None`. With `max_depth = None` the whole reachable
    /// subtree is walked. The walk is an explicit loop with an ancestor
    /// stack: chain-shaped trees cannot overflow the call stack however
    /// deep they grow.
    ///
    /// # Errors
    ///
    /// - [`EngineError::NotFound`] if `root_key` is not in the tree
    /// - [`EngineError::Store`] if the record store fails
    pub fn subtree(&self, root_key: NodeKey, max_depth: Option<u32>) -> EngineResult<SubtreeNode> {
        let root_record = self
            .store
            .find_by_key(root_key)?
            .ok_or(EngineError::NotFound { key: root_key })?;

        let mut ancestors: Vec<Frame> = Vec::new();
        let mut current = self.frame(root_record, 0, max_depth)?;

        loop {
            if let Some(child) = current.pending.pop_front() {
                let depth = ancestors.len() + 1;
                ancestors.push(current);
                current = self.frame(child, depth, max_depth)?;
                continue;
            }

            // current is fully materialized: fold into its parent, or
            // finish when it is the subtree root
            match ancestors.pop() {
                Some(mut parent) => {
                    if let Some(children) = parent.node.children.as_mut() {
                        children.push(current.node);
                    }
                    current = parent;
                }
                None => return Ok(current.node),
            }
        }
    }

    /// Removes every node, returning how many were removed.
    ///
    /// This is the development reset surface, not part of the regular tree
    /// contract.
    ///
    /// # Errors
    ///
    /// Returns an error if the record store fails.
    pub fn clear_all(&self) -> EngineResult<usize> {
        Ok(self.store.clear()?)
    }

    /// Number of nodes currently stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the record store fails.
    pub fn node_count(&self) -> EngineResult<usize> {
        Ok(self.store.count()?)
    }

    fn parent_key_of(&self, node: &NodeRecord) -> EngineResult<Option<NodeKey>> {
        match node.parent {
            Some(parent_id) => Ok(self.store.find_by_id(parent_id)?.map(|p| p.key)),
            None => Ok(None),
        }
    }

    fn frame(
        &self,
        record: NodeRecord,
        depth: usize,
        max_depth: Option<u32>,
    ) -> EngineResult<Frame> {
        let parent_key = self.parent_key_of(&record)?;

        let collect = max_depth.map_or(true, |d| depth < d as usize);
        let (children, pending) = if collect {
            let kids = self.store.children_of(record.id)?;
            (Some(Vec::with_capacity(kids.len())), VecDeque::from(kids))
        } else {
            (None, VecDeque::new())
        };

        Ok(Frame {
            node: SubtreeNode {
                record,
                parent_key,
                children,
            },
            pending,
        })
    }
}

/// One level of the iterative subtree walk: the node being materialized
/// plus the children still waiting to be descended into.
struct Frame {
    node: SubtreeNode,
    pending: VecDeque<NodeRecord>,
}
