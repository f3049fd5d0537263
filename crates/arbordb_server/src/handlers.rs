//! Request handlers.
//!
//! Each handler validates its body, drives the engine, and renders the
//! outcome for the request's locale and zone. Handlers take the body as
//! `Result<Json<_>, JsonRejection>` so malformed or missing bodies answer
//! 400 in the API's own envelope instead of axum's default.

use crate::app::AppState;
use crate::dto::{
    render_subtree, CreateNodeRequest, CreatedResponse, DeleteRequest, DeletedResponse,
    InternalEntry, InternalListResponse, MessageResponse, RootsRequest, SubtreeRequest,
    SubtreeResponse,
};
use crate::error::{ApiError, ApiResult};
use crate::extract::RequestContext;
use arbordb_format::render_label;
use arbordb_store::NodeKey;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

/// `POST /api/nodes` - place and store a new key.
pub async fn create_node(
    State(state): State<AppState>,
    context: RequestContext,
    body: Result<Json<CreateNodeRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<CreatedResponse>)> {
    let Json(request) = body?;
    let id = request
        .id
        .ok_or_else(|| ApiError::BadRequest("The 'id' field is required".to_string()))?;

    let key = NodeKey::new(id);
    let label = render_label(key, context.locale);
    let inserted = state.engine.insert(key, label)?;

    tracing::info!(key = id, parent = ?inserted.parent_key, "node created");
    Ok((StatusCode::CREATED, Json(CreatedResponse::new(&inserted))))
}

/// `POST /api/nodes/roots` - list the root and every node with children.
pub async fn list_internal(
    State(state): State<AppState>,
    context: RequestContext,
    body: Result<Json<RootsRequest>, JsonRejection>,
) -> ApiResult<Json<InternalListResponse>> {
    let Json(request) = body?;
    let context = context.with_overrides(request.language.as_deref(), request.timezone.as_deref());

    let internal = state.engine.list_internal_nodes()?;
    let data: Vec<InternalEntry> = internal
        .iter()
        .map(|node| InternalEntry::render(node, context))
        .collect();

    tracing::info!(count = data.len(), "internal nodes listed");
    Ok(Json(InternalListResponse {
        success: true,
        count: data.len(),
        data,
    }))
}

/// `POST /api/nodes/children` - materialize a subtree.
pub async fn subtree(
    State(state): State<AppState>,
    context: RequestContext,
    body: Result<Json<SubtreeRequest>, JsonRejection>,
) -> ApiResult<Json<SubtreeResponse>> {
    let Json(request) = body?;
    let parent_id = request
        .parent_id
        .ok_or_else(|| ApiError::BadRequest("The 'parentId' field is required".to_string()))?;
    let context = context.with_overrides(request.language.as_deref(), request.timezone.as_deref());

    let node = state.engine.subtree(NodeKey::new(parent_id), request.depth)?;

    tracing::info!(key = parent_id, depth = ?request.depth, "subtree materialized");
    Ok(Json(SubtreeResponse {
        success: true,
        data: render_subtree(node, context),
    }))
}

/// `DELETE /api/nodes/delete` - remove a leaf.
pub async fn delete_node(
    State(state): State<AppState>,
    body: Result<Json<DeleteRequest>, JsonRejection>,
) -> ApiResult<Json<DeletedResponse>> {
    let Json(request) = body?;
    let id = request
        .id
        .ok_or_else(|| ApiError::BadRequest("The 'id' field is required".to_string()))?;

    let deletion = state.engine.delete_by_key(NodeKey::new(id))?;

    tracing::info!(key = id, parent = ?deletion.parent_key, "node deleted");
    Ok(Json(DeletedResponse::new(&deletion)))
}

/// `DELETE /api/nodes/clear-all` - development reset.
///
/// Mounted unconditionally; answers 403 unless the server was started
/// with development routes enabled.
pub async fn clear_all(State(state): State<AppState>) -> ApiResult<Json<MessageResponse>> {
    if !state.config.dev_routes {
        return Err(ApiError::Forbidden(
            "clear-all is only available in development mode".to_string(),
        ));
    }

    let removed = state.engine.clear_all()?;

    tracing::info!(removed, "all nodes cleared");
    Ok(Json(MessageResponse {
        success: true,
        message: "all nodes removed".to_string(),
    }))
}
