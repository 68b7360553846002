//! 統合テスト共通ユーティリティ

#![allow(dead_code)]

pub mod http;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use proxyhub::{
    api, registry::ProviderRegistry, source::EndpointSource, source::StaticEndpointSource,
    AppState,
};
use proxyhub_common::types::EndpointRecord;
use serde_json::Value;
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

/// テスト用のプロバイダーURL（2件のレコードを返す）
pub const TWO_PROXIES_URL: &str = "http://two.example/proxies";

/// テスト用のプロバイダーURL（空リストを返す）
pub const EMPTY_URL: &str = "http://empty.example/proxies";

/// ソースに登録されていないURL（取得失敗になる）
pub const UNREACHABLE_URL: &str = "http://unreachable.example/proxies";

/// テスト用のエンドポイントレコード
pub fn record(host: &str, port: u16) -> EndpointRecord {
    EndpointRecord {
        host: host.to_string(),
        port,
        username: "user".to_string(),
        password: "secret".to_string(),
    }
}

/// 既定のテスト用ソース
pub fn test_source() -> StaticEndpointSource {
    StaticEndpointSource::new()
        .with_records(
            TWO_PROXIES_URL,
            vec![record("10.0.0.1", 8080), record("10.0.0.2", 8081)],
        )
        .with_records(EMPTY_URL, Vec::new())
}

/// インメモリDB付きのアプリケーション状態を作成
pub async fn build_state(source: impl EndpointSource + 'static) -> AppState {
    let db_pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");
    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .expect("Failed to run migrations");
    let registry = ProviderRegistry::with_database(db_pool)
        .await
        .expect("Failed to create provider registry");

    AppState {
        registry,
        source: Arc::new(source),
        fetch_timeout: Duration::from_secs(5),
    }
}

/// 既定のテスト用ソースでルーターを作成
pub async fn build_app() -> Router {
    api::create_router(build_state(test_source()).await)
}

/// JSONボディ付きリクエストを送信
pub async fn send_json(app: &Router, method: &str, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// ボディなしリクエストを送信
pub async fn send_empty(app: &Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

/// プロバイダーを作成してIDを返す
pub async fn create_provider(app: &Router, url: &str, name: &str) -> String {
    let (status, body) = send_json(
        app,
        "POST",
        "/providers",
        serde_json::json!({ "url": url, "name": name }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_string()
}
