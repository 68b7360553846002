//! Contract Test: GET /providers/:id/endpoints, GET /providers/:id/endpoints/:endpoint_id

use axum::http::StatusCode;

use crate::support::{build_app, create_provider, send_empty, TWO_PROXIES_URL};

#[tokio::test]
async fn test_list_endpoints_in_rotation_order() {
    let app = build_app().await;
    let id = create_provider(&app, TWO_PROXIES_URL, "A").await;
    send_empty(&app, "POST", &format!("/providers/{}/load", id)).await;

    let (status, body) = send_empty(&app, "GET", &format!("/providers/{}/endpoints", id)).await;
    assert_eq!(status, StatusCode::OK);
    let endpoints = body["endpoints"].as_array().unwrap();
    assert_eq!(endpoints.len(), 2);
    assert_eq!(endpoints[0]["name"], "Proxy 1");
    assert_eq!(endpoints[1]["name"], "Proxy 2");
    assert_ne!(endpoints[0]["id"], endpoints[1]["id"]);
}

#[tokio::test]
async fn test_get_endpoint_by_id() {
    let app = build_app().await;
    let id = create_provider(&app, TWO_PROXIES_URL, "A").await;
    send_empty(&app, "POST", &format!("/providers/{}/load", id)).await;
    let (_, list) = send_empty(&app, "GET", &format!("/providers/{}/endpoints", id)).await;
    let endpoint_id = list["endpoints"][1]["id"].as_str().unwrap().to_string();

    let (status, body) = send_empty(
        &app,
        "GET",
        &format!("/providers/{}/endpoints/{}", id, endpoint_id),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["host"], "10.0.0.2");
}

#[tokio::test]
async fn test_get_unknown_endpoint_is_not_found() {
    let app = build_app().await;
    let id = create_provider(&app, TWO_PROXIES_URL, "A").await;
    send_empty(&app, "POST", &format!("/providers/{}/load", id)).await;

    let (status, body) = send_empty(
        &app,
        "GET",
        &format!("/providers/{}/endpoints/{}", id, uuid::Uuid::new_v4()),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["type"], "not_found");
}

#[tokio::test]
async fn test_get_malformed_endpoint_id_is_not_found() {
    let app = build_app().await;
    let id = create_provider(&app, TWO_PROXIES_URL, "A").await;
    send_empty(&app, "POST", &format!("/providers/{}/load", id)).await;

    let (status, body) = send_empty(
        &app,
        "GET",
        &format!("/providers/{}/endpoints/not-an-id", id),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Endpoint not found");
}
