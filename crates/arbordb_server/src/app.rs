//! Router assembly and shared state.

use crate::config::ServerConfig;
use crate::handlers;
use arbordb_engine::TreeEngine;
use axum::routing::{delete, post};
use axum::Router;
use std::sync::Arc;

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    /// The tree engine over the configured store.
    pub engine: Arc<TreeEngine>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

/// Builds the API router.
///
/// All routes are mounted regardless of configuration; the development
/// reset gates itself at request time so a disabled server answers 403
/// rather than 404.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/nodes", post(handlers::create_node))
        .route("/api/nodes/roots", post(handlers::list_internal))
        .route("/api/nodes/children", post(handlers::subtree))
        .route("/api/nodes/delete", delete(handlers::delete_node))
        .route("/api/nodes/clear-all", delete(handlers::clear_all))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbordb_store::MemoryStore;

    #[test]
    fn router_builds_with_either_configuration() {
        for dev_routes in [false, true] {
            let state = AppState {
                engine: Arc::new(TreeEngine::new(Arc::new(MemoryStore::new()))),
                config: Arc::new(ServerConfig::default().with_dev_routes(dev_routes)),
            };
            let _router = router(state);
        }
    }
}
