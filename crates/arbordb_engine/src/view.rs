//! Engine operation results.
//!
//! These are domain views, not wire types: parents are reported by external
//! key, labels are the stored ones, and nothing here is serialized directly.
//! The boundary layer re-renders labels and timestamps per request before
//! anything leaves the process.

use arbordb_store::{NodeKey, NodeRecord};

/// Result of a successful insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertedNode {
    /// The stored record, including its assigned identity.
    pub record: NodeRecord,
    /// External key of the parent, `None` when the new node is the root.
    pub parent_key: Option<NodeKey>,
}

/// Result of a successful leaf deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deletion {
    /// Key of the removed node.
    pub deleted_key: NodeKey,
    /// Key of its former parent, `None` when the root was removed.
    pub parent_key: Option<NodeKey>,
}

/// One entry of the internal-node listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InternalNode {
    /// The node record.
    pub record: NodeRecord,
    /// Number of direct children.
    pub child_count: usize,
    /// External key of the parent, `None` for the root.
    pub parent_key: Option<NodeKey>,
}

/// A node of a materialized subtree.
///
/// `children` is `None` when the walk stopped at the depth bound without
/// looking, and `Some` (possibly empty) when children were actually
/// collected. Callers that need "has no children" must check for an empty
/// `Some`, not for `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtreeNode {
    /// The node record.
    pub record: NodeRecord,
    /// External key of this node's parent, `None` for the tree root.
    pub parent_key: Option<NodeKey>,
    /// Children ascending by key, or `None` past the depth bound.
    pub children: Option<Vec<SubtreeNode>>,
}

impl SubtreeNode {
    /// Number of nodes in this view, itself included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            if let Some(children) = &node.children {
                stack.extend(children.iter());
            }
        }
        count
    }
}
