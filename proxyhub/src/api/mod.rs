//! REST APIハンドラー
//!
//! プロバイダーのCRUD・ロード・エンドポイント選択API

pub mod error;
pub mod providers;

use crate::AppState;
use axum::{
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

/// APIルーターを作成
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/providers",
            post(providers::create_provider).get(providers::list_providers),
        )
        .route(
            "/providers/:id",
            get(providers::get_provider)
                .put(providers::update_provider)
                .delete(providers::delete_provider),
        )
        .route("/providers/:id/load", post(providers::load_provider))
        .route(
            "/providers/:id/next-endpoint",
            get(providers::next_endpoint),
        )
        .route("/providers/:id/endpoints", get(providers::list_endpoints))
        .route(
            "/providers/:id/endpoints/:endpoint_id",
            get(providers::get_endpoint),
        )
        .route("/providers/:id/config", get(providers::export_config))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - 死活確認
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
