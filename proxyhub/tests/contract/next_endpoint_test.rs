//! Contract Test: GET /providers/:id/next-endpoint

use axum::http::StatusCode;

use crate::support::{build_app, create_provider, send_empty, TWO_PROXIES_URL};

#[tokio::test]
async fn test_next_endpoint_rotates_and_wraps() {
    let app = build_app().await;
    let id = create_provider(&app, TWO_PROXIES_URL, "A").await;
    send_empty(&app, "POST", &format!("/providers/{}/load", id)).await;

    let uri = format!("/providers/{}/next-endpoint", id);
    let mut hosts = Vec::new();
    for _ in 0..3 {
        let (status, body) = send_empty(&app, "GET", &uri).await;
        assert_eq!(status, StatusCode::OK);
        hosts.push(body["endpoint"]["host"].as_str().unwrap().to_string());
    }
    assert_eq!(hosts, vec!["10.0.0.1", "10.0.0.2", "10.0.0.1"]);
}

#[tokio::test]
async fn test_next_endpoint_carries_credentials_and_name() {
    let app = build_app().await;
    let id = create_provider(&app, TWO_PROXIES_URL, "A").await;
    send_empty(&app, "POST", &format!("/providers/{}/load", id)).await;

    let (_, body) = send_empty(&app, "GET", &format!("/providers/{}/next-endpoint", id)).await;
    let endpoint = &body["endpoint"];
    assert_eq!(endpoint["name"], "Proxy 1");
    assert_eq!(endpoint["port"], 8080);
    assert_eq!(endpoint["username"], "user");
    assert_eq!(endpoint["password"], "secret");
}

#[tokio::test]
async fn test_next_endpoint_before_load_is_no_content() {
    let app = build_app().await;
    let id = create_provider(&app, TWO_PROXIES_URL, "A").await;

    let (status, _) = send_empty(&app, "GET", &format!("/providers/{}/next-endpoint", id)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_next_endpoint_unknown_provider_is_not_found() {
    let app = build_app().await;
    let (status, _) = send_empty(
        &app,
        "GET",
        &format!("/providers/{}/next-endpoint", uuid::Uuid::new_v4()),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
