//! # ArborDB Store
//!
//! Flat record storage for the ArborDB tree engine.
//!
//! Nodes live in a flat table of parent-pointer records: each record carries
//! its external key, a storage-assigned identity, an optional parent
//! identity, a display label, and its creation time. The store indexes
//! records by key and by parent but never interprets tree shape - placement
//! and traversal belong to the engine.
//!
//! ## Design Principles
//!
//! - Stores are tables, not trees: no placement logic, no traversal
//! - Integrity lives at the table: duplicate keys, dangling parents, and a
//!   second root are refused at insert time
//! - Listings (`children_of`, `scan`) always come back ordered ascending by
//!   key
//! - Implementations are `Send + Sync` and shared as `Arc<dyn RecordStore>`
//!
//! ## Available Stores
//!
//! - [`MemoryStore`] - For tests and ephemeral servers
//! - [`FileStore`] - Durable, snapshot-per-mutation, single-writer
//!
//! ## Example
//!
//! ```rust
//! use arbordb_store::{MemoryStore, NewNode, NodeKey, RecordStore};
//!
//! let store = MemoryStore::new();
//! let root = store
//!     .insert(NewNode::new(NodeKey::new(50), None, "fifty"))
//!     .unwrap();
//! let child = store
//!     .insert(NewNode::new(NodeKey::new(30), Some(root.id), "thirty"))
//!     .unwrap();
//! assert_eq!(store.children_of(root.id).unwrap(), vec![child]);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod dir;
mod error;
mod file;
mod index;
mod memory;
mod record;
mod snapshot;
mod store;
mod types;

pub use error::{StoreError, StoreResult};
pub use file::FileStore;
pub use memory::MemoryStore;
pub use record::{NewNode, NodeId, NodeRecord};
pub use store::RecordStore;
pub use types::NodeKey;
