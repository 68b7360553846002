//! Contract Test: POST /providers/:id/load

use axum::http::StatusCode;
use serde_json::json;

use crate::support::{
    build_app, create_provider, send_empty, send_json, EMPTY_URL, TWO_PROXIES_URL,
    UNREACHABLE_URL,
};

#[tokio::test]
async fn test_load_two_records_becomes_ready() {
    let app = build_app().await;
    let id = create_provider(&app, TWO_PROXIES_URL, "A").await;

    let (status, body) = send_empty(&app, "POST", &format!("/providers/{}/load", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "success": true, "status": "ready", "endpointCount": 2 })
    );

    let (_, view) = send_empty(&app, "GET", &format!("/providers/{}", id)).await;
    assert_eq!(view["status"], "ready");
    assert_eq!(view["statusMessage"], "2 proxies loaded");
    assert!(view.get("lastError").is_none());
}

#[tokio::test]
async fn test_load_failure_sets_error_and_clears_endpoints() {
    let app = build_app().await;
    let id = create_provider(&app, TWO_PROXIES_URL, "A").await;
    send_empty(&app, "POST", &format!("/providers/{}/load", id)).await;

    send_json(
        &app,
        "PUT",
        &format!("/providers/{}", id),
        json!({ "url": UNREACHABLE_URL, "name": "A" }),
    )
    .await;
    let (status, body) = send_empty(&app, "POST", &format!("/providers/{}/load", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
    assert_eq!(body["status"], "error");
    assert_eq!(body["endpointCount"], 0);

    let (_, view) = send_empty(&app, "GET", &format!("/providers/{}", id)).await;
    assert!(view["statusMessage"]
        .as_str()
        .unwrap()
        .contains(UNREACHABLE_URL));
    assert!(view["lastError"].is_string());

    let (status, _) = send_empty(&app, "GET", &format!("/providers/{}/next-endpoint", id)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_load_empty_list_is_ready_with_no_endpoints() {
    let app = build_app().await;
    let id = create_provider(&app, EMPTY_URL, "Empty").await;

    let (_, body) = send_empty(&app, "POST", &format!("/providers/{}/load", id)).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["status"], "ready");
    assert_eq!(body["endpointCount"], 0);
}

#[tokio::test]
async fn test_reload_after_update_clears_pending_reload() {
    let app = build_app().await;
    let id = create_provider(&app, EMPTY_URL, "A").await;
    send_json(
        &app,
        "PUT",
        &format!("/providers/{}", id),
        json!({ "url": TWO_PROXIES_URL, "name": "A" }),
    )
    .await;

    let (_, body) = send_empty(&app, "POST", &format!("/providers/{}/load", id)).await;
    assert_eq!(body["status"], "ready");
    assert_eq!(body["endpointCount"], 2);
}

#[tokio::test]
async fn test_load_unknown_provider_is_not_found() {
    let app = build_app().await;
    let (status, _) = send_empty(
        &app,
        "POST",
        &format!("/providers/{}/load", uuid::Uuid::new_v4()),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
