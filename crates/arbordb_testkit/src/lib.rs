//! # ArborDB Testkit
//!
//! Test utilities for ArborDB.
//!
//! This crate provides:
//! - Engine fixtures over disposable memory and file stores
//! - The canonical seeded tree used across examples and manual testing
//! - Property-based test generators using proptest
//!
//! ## Usage
//!
//! ```rust,ignore
//! use arbordb_testkit::prelude::*;
//! use arbordb_store::NodeKey;
//!
//! #[test]
//! fn test_with_engine() {
//!     let fixture = TestEngine::seeded();
//!     let subtree = fixture.subtree(NodeKey::new(30), None).unwrap();
//!     // ... assertions
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
}

pub use fixtures::*;
pub use generators::*;
