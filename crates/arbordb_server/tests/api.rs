//! Handler-level API tests over an in-memory engine. Requests are built
//! as the extractors would deliver them; responses are asserted as typed
//! bodies, the same values axum would serialize.

use arbordb_engine::TreeEngine;
use arbordb_format::Locale;
use arbordb_server::dto::{
    CreateNodeRequest, CreatedResponse, DeleteRequest, RootsRequest, SubtreeRequest,
};
use arbordb_server::{handlers, ApiError, AppState, RequestContext, ServerConfig};
use arbordb_store::{FileStore, MemoryStore};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono_tz::Tz;
use std::sync::Arc;

fn state(dev_routes: bool) -> AppState {
    AppState {
        engine: Arc::new(TreeEngine::new(Arc::new(MemoryStore::new()))),
        config: Arc::new(ServerConfig::default().with_dev_routes(dev_routes)),
    }
}

fn spanish() -> RequestContext {
    RequestContext {
        locale: Locale::Es,
        zone: Tz::UTC,
    }
}

async fn create_with(
    state: &AppState,
    context: RequestContext,
    id: i64,
) -> (StatusCode, CreatedResponse) {
    let (status, Json(body)) = handlers::create_node(
        State(state.clone()),
        context,
        Ok(Json(CreateNodeRequest { id: Some(id) })),
    )
    .await
    .unwrap();
    (status, body)
}

async fn create(state: &AppState, id: i64) -> (StatusCode, CreatedResponse) {
    create_with(state, RequestContext::default(), id).await
}

#[tokio::test]
async fn create_answers_201_with_the_stored_node() {
    let state = state(false);

    let (status, body) = create(&state, 50).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body.success);
    assert_eq!(body.data.id, 50);
    assert_eq!(body.data.title, "fifty");
    assert_eq!(body.data.parent, None);

    let (_, body) = create(&state, 30).await;
    assert_eq!(body.data.parent, Some(50));
    assert_eq!(body.data.title, "thirty");
}

#[tokio::test]
async fn create_renders_the_title_in_the_request_locale() {
    let state = state(false);
    create(&state, 50).await;

    let (_, body) = create_with(&state, spanish(), 30).await;
    assert_eq!(body.data.title, "treinta");
}

#[tokio::test]
async fn create_without_id_is_bad_request() {
    let state = state(false);

    let err = handlers::create_node(
        State(state.clone()),
        RequestContext::default(),
        Ok(Json(CreateNodeRequest { id: None })),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ApiError::BadRequest(_)));
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    assert_eq!(err.to_string(), "The 'id' field is required");
}

#[tokio::test]
async fn duplicate_create_conflicts() {
    let state = state(false);
    create(&state, 50).await;

    let err = handlers::create_node(
        State(state.clone()),
        RequestContext::default(),
        Ok(Json(CreateNodeRequest { id: Some(50) })),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ApiError::Conflict(_)));
    assert_eq!(err.status(), StatusCode::CONFLICT);
    assert_eq!(err.to_string(), "ID 50 already exists in the tree");
}

#[tokio::test]
async fn roots_listing_rerenders_in_the_body_locale() {
    let state = state(false);
    for key in [50, 30, 70, 20] {
        create(&state, key).await;
    }

    let Json(body) = handlers::list_internal(
        State(state.clone()),
        RequestContext::default(),
        Ok(Json(RootsRequest {
            language: Some("es".to_string()),
            timezone: None,
        })),
    )
    .await
    .unwrap();

    assert!(body.success);
    assert_eq!(body.count, 2);
    assert_eq!(body.data[0].id, 30);
    assert_eq!(body.data[0].title, "treinta");
    assert_eq!(body.data[0].parent, Some(50));
    assert_eq!(body.data[0].children_count, 1);
    assert_eq!(body.data[1].id, 50);
    assert_eq!(body.data[1].title, "cincuenta");
    assert_eq!(body.data[1].children_count, 2);
}

#[tokio::test]
async fn roots_listing_of_an_empty_tree_is_empty() {
    let state = state(false);

    let Json(body) = handlers::list_internal(
        State(state.clone()),
        RequestContext::default(),
        Ok(Json(RootsRequest::default())),
    )
    .await
    .unwrap();

    assert_eq!(body.count, 0);
    assert!(body.data.is_empty());
}

fn subtree_request(parent_id: Option<i64>, depth: Option<u32>) -> SubtreeRequest {
    SubtreeRequest {
        parent_id,
        language: None,
        timezone: None,
        depth,
    }
}

#[tokio::test]
async fn subtree_honors_the_depth_bound() {
    let state = state(false);
    for key in [50, 30, 70, 20] {
        create(&state, key).await;
    }

    let Json(bounded) = handlers::subtree(
        State(state.clone()),
        RequestContext::default(),
        Ok(Json(subtree_request(Some(50), Some(1)))),
    )
    .await
    .unwrap();

    let children = bounded.data.children.as_ref().unwrap();
    assert_eq!(children.len(), 2);
    // 30 has a child below the bound, but nothing was collected for it
    assert_eq!(children[0].id, 30);
    assert_eq!(children[0].children, None);

    let Json(full) = handlers::subtree(
        State(state.clone()),
        RequestContext::default(),
        Ok(Json(subtree_request(Some(50), None))),
    )
    .await
    .unwrap();

    let children = full.data.children.as_ref().unwrap();
    assert_eq!(children[0].children.as_ref().unwrap()[0].id, 20);
    // leaves never carry a children field on the wire
    let value = serde_json::to_value(&full.data).unwrap();
    assert!(value["children"][1].get("children").is_none());
    assert_eq!(value["children"][1]["id"], 70);
}

#[tokio::test]
async fn subtree_without_parent_id_is_bad_request() {
    let state = state(false);

    let err = handlers::subtree(
        State(state.clone()),
        RequestContext::default(),
        Ok(Json(subtree_request(None, None))),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ApiError::BadRequest(_)));
    assert_eq!(err.to_string(), "The 'parentId' field is required");
}

#[tokio::test]
async fn subtree_of_an_unknown_key_is_not_found() {
    let state = state(false);
    create(&state, 50).await;

    let err = handlers::subtree(
        State(state.clone()),
        RequestContext::default(),
        Ok(Json(subtree_request(Some(99), None))),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ApiError::NotFound(_)));
    assert_eq!(err.status(), StatusCode::NOT_FOUND);
    assert_eq!(err.to_string(), "Node with ID 99 not found");
}

#[tokio::test]
async fn delete_reports_the_former_parent() {
    let state = state(false);
    for key in [50, 30, 70, 20] {
        create(&state, key).await;
    }

    let Json(body) = handlers::delete_node(
        State(state.clone()),
        Ok(Json(DeleteRequest { id: Some(20) })),
    )
    .await
    .unwrap();

    assert!(body.success);
    assert_eq!(body.message, "node deleted");
    assert_eq!(body.deleted.id, 20);
    assert_eq!(body.deleted.parent, Some(30));
}

#[tokio::test]
async fn delete_of_a_parent_is_refused() {
    let state = state(false);
    for key in [50, 30] {
        create(&state, key).await;
    }

    let err = handlers::delete_node(
        State(state.clone()),
        Ok(Json(DeleteRequest { id: Some(50) })),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ApiError::BadRequest(_)));
    assert_eq!(
        err.to_string(),
        "Cannot delete node 50 because it has children"
    );
}

#[tokio::test]
async fn delete_of_an_unknown_key_is_not_found() {
    let state = state(false);

    let err = handlers::delete_node(
        State(state.clone()),
        Ok(Json(DeleteRequest { id: Some(7) })),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ApiError::NotFound(_)));
}

#[tokio::test]
async fn clear_all_is_forbidden_unless_dev_routes_are_on() {
    let state = state(false);
    create(&state, 50).await;

    let err = handlers::clear_all(State(state.clone())).await.unwrap_err();
    assert!(matches!(err, ApiError::Forbidden(_)));
    assert_eq!(err.status(), StatusCode::FORBIDDEN);
    assert_eq!(state.engine.node_count().unwrap(), 1);
}

#[tokio::test]
async fn file_backed_state_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();

    {
        let state = AppState {
            engine: Arc::new(TreeEngine::new(Arc::new(
                FileStore::open(dir.path()).unwrap(),
            ))),
            config: Arc::new(ServerConfig::default()),
        };
        create(&state, 50).await;
        create(&state, 30).await;
    }

    let state = AppState {
        engine: Arc::new(TreeEngine::new(Arc::new(
            FileStore::open(dir.path()).unwrap(),
        ))),
        config: Arc::new(ServerConfig::default()),
    };
    let Json(body) = handlers::list_internal(
        State(state.clone()),
        RequestContext::default(),
        Ok(Json(RootsRequest::default())),
    )
    .await
    .unwrap();

    assert_eq!(body.count, 1);
    assert_eq!(body.data[0].id, 50);
    assert_eq!(body.data[0].title, "fifty");
}

#[tokio::test]
async fn clear_all_empties_a_dev_server() {
    let state = state(true);
    for key in [50, 30, 70] {
        create(&state, key).await;
    }

    let Json(body) = handlers::clear_all(State(state.clone())).await.unwrap();
    assert!(body.success);
    assert_eq!(body.message, "all nodes removed");
    assert_eq!(state.engine.node_count().unwrap(), 0);
}
