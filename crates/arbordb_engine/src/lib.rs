//! Tree maintenance engine for ArborDB.
//!
//! This crate turns the flat parent-pointer records of [`arbordb_store`]
//! into an ordered tree. It owns the placement algorithm and the four tree
//! operations built on top of it:
//!
//! - [`TreeEngine::insert`]: place a new key and create it under the
//!   resolved parent
//! - [`TreeEngine::delete_by_key`]: remove a leaf, reporting its former
//!   parent
//! - [`TreeEngine::list_internal_nodes`]: the root plus every node with
//!   children, ascending by key
//! - [`TreeEngine::subtree`]: depth-first materialization with an optional
//!   depth bound
//!
//! # Design
//!
//! - **Flat storage, derived shape.** Records carry only a parent pointer.
//!   Child order and branch direction are derived from key order at read
//!   time, never stored.
//! - **Iterative everywhere.** Placement and the subtree walk are explicit
//!   loops with their own stacks. Degenerate chain-shaped trees are the
//!   common case under sorted input and must not exhaust the call stack.
//! - **No presentation.** The engine returns typed views over records and
//!   typed errors. Rendering, localization, and logging belong to the
//!   caller.
//!
//! # Example
//!
//! ```rust
//! use arbordb_engine::TreeEngine;
//! use arbordb_store::{MemoryStore, NodeKey};
//! use std::sync::Arc;
//!
//! let engine = TreeEngine::new(Arc::new(MemoryStore::new()));
//! for key in [50, 30, 70, 20] {
//!     engine.insert(NodeKey::new(key), format!("node {key}")).unwrap();
//! }
//!
//! let internal = engine.list_internal_nodes().unwrap();
//! let keys: Vec<i64> = internal.iter().map(|n| n.record.key.as_i64()).collect();
//! assert_eq!(keys, vec![30, 50]);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod engine;
mod error;
mod placement;
mod view;

pub use engine::TreeEngine;
pub use error::{EngineError, EngineResult};
pub use placement::resolve_placement;
pub use view::{Deletion, InsertedNode, InternalNode, SubtreeNode};

// Store types that appear in this crate's public API.
pub use arbordb_store::{NodeId, NodeKey, NodeRecord, RecordStore};
