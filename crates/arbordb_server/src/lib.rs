//! # ArborDB Server
//!
//! HTTP boundary for the ArborDB tree engine.
//!
//! This crate provides:
//! - The axum router over the engine's four tree operations plus the
//!   development reset
//! - Per-request locale/zone extraction with body-level overrides
//! - The error-to-status mapping and the `{ success, message }` envelope
//! - `ServerConfig` and the `arbordb` binary (`serve`, `seed`)
//!
//! # Architecture
//!
//! Handlers are thin: validate the body, call [`arbordb_engine::TreeEngine`],
//! render the typed outcome with [`arbordb_format`]. All tree decisions stay
//! in the engine; all rendering happens here, per request. Logging happens
//! here and nowhere below.
//!
//! ```rust,ignore
//! use arbordb_server::{router, AppState, ServerConfig};
//! use arbordb_engine::TreeEngine;
//! use arbordb_store::MemoryStore;
//! use std::sync::Arc;
//!
//! let state = AppState {
//!     engine: Arc::new(TreeEngine::new(Arc::new(MemoryStore::new()))),
//!     config: Arc::new(ServerConfig::default()),
//! };
//! let app = router(state);
//! // axum::serve(listener, app)
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
// Handlers propagate errors as responses; panics have no place here.
#![warn(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod app;
mod config;
pub mod dto;
mod error;
mod extract;
pub mod handlers;

pub use app::{router, AppState};
pub use config::ServerConfig;
pub use error::{ApiError, ApiResult};
pub use extract::RequestContext;
