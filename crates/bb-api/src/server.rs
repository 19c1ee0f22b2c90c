//! Axum server and routes.

use crate::rpc::{self, RpcError};
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use bb_auth::AccessResolver;
use bb_types::{
    BaseResponse, ClearResponse, GetItemRequest, GetItemsRequest, ItemResponse, ItemsResponse,
    NamespaceRequest, NamespaceStore, RpcRequest, RpcResponse, SetItemCall, SetItemsRequest,
    StatsResponse,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub struct AppState {
    pub store: Arc<dyn NamespaceStore + Send + Sync>,
    pub access: AccessResolver,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/blackboard/set_item", post(handle_set_item))
        .route("/blackboard/set_items", post(handle_set_items))
        .route("/blackboard/get_item", post(handle_get_item))
        .route("/blackboard/get_items", post(handle_get_items))
        .route("/blackboard/get_all_items", post(handle_get_all_items))
        .route("/blackboard/clear", post(handle_clear))
        .route("/blackboard/stats", get(handle_stats))
        .route("/rpc", post(handle_rpc))
        .route("/health", get(handle_health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn rejected<T>(method: &str, e: RpcError) -> BaseResponse<T> {
    tracing::warn!(method, error = %e, "call rejected");
    BaseResponse::error(e.code(), e.to_string())
}

async fn handle_set_item(
    State(state): State<Arc<AppState>>,
    Json(call): Json<SetItemCall>,
) -> Json<ItemResponse> {
    match state.set_item(call.auth_token.as_deref(), call.item).await {
        Ok(item) => Json(ItemResponse::ok(item)),
        Err(e) => Json(rejected("set_item", e)),
    }
}

async fn handle_set_items(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SetItemsRequest>,
) -> Json<ItemsResponse> {
    match state.set_items(req.auth_token.as_deref(), req.items).await {
        Ok(items) => Json(ItemsResponse::ok(items)),
        Err(e) => Json(rejected("set_items", e)),
    }
}

async fn handle_get_item(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GetItemRequest>,
) -> Json<ItemResponse> {
    let item = state
        .get_item(req.auth_token.as_deref(), &req.reference)
        .await;
    Json(ItemResponse::ok(item))
}

async fn handle_get_items(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GetItemsRequest>,
) -> Json<ItemsResponse> {
    let items = state.get_items(req.auth_token.as_deref(), &req.refs).await;
    Json(ItemsResponse::ok(items))
}

async fn handle_get_all_items(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NamespaceRequest>,
) -> Json<ItemsResponse> {
    let items = state.get_all_items(req.auth_token.as_deref()).await;
    Json(ItemsResponse::ok(items))
}

async fn handle_clear(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NamespaceRequest>,
) -> Json<ClearResponse> {
    let cleared = state.clear(req.auth_token.as_deref()).await;
    Json(ClearResponse::ok(cleared))
}

async fn handle_stats(State(state): State<Arc<AppState>>) -> Json<StatsResponse> {
    Json(StatsResponse::ok(state.store.stats().await))
}

async fn handle_rpc(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RpcRequest>,
) -> Json<RpcResponse> {
    let method = req.method.clone();
    match rpc::dispatch(&state, req).await {
        Ok(data) => Json(RpcResponse::ok(data)),
        Err(e) => Json(rejected(&method, e)),
    }
}

async fn handle_health() -> &'static str {
    "ok"
}
