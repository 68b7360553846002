//! プロバイダー管理API
//!
//! 作成・更新・削除・ロード・ラウンドロビン選択

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use futures::future::join_all;
use proxyhub_common::{
    error::ProxyHubError,
    protocol::{
        CreateProviderResponse, ListEndpointsResponse, ListProvidersResponse,
        LoadProviderResponse, NextEndpointResponse, ProviderConfigRequest, ProviderView,
    },
    types::{Endpoint, ProviderConfig},
};
use uuid::Uuid;

use super::error::AppError;
use crate::AppState;

/// リクエストボディを検証済み設定に変換
///
/// JSONの構文・型エラーもフィールド欠落と同じく`InvalidConfig`として扱う。
fn parse_config(
    payload: Result<Json<ProviderConfigRequest>, JsonRejection>,
) -> Result<ProviderConfig, AppError> {
    let Json(req) = payload.map_err(|rejection| {
        AppError::from(ProxyHubError::InvalidConfig(rejection.body_text()))
    })?;
    Ok(req.into_config()?)
}

/// パス中のプロバイダーIDを解釈
///
/// UUIDとして解釈できないIDは未登録のIDと同じく`ProviderNotFound`とする。
fn provider_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw)
        .map_err(|_| AppError::from(ProxyHubError::ProviderNotFound(raw.to_string())))
}

/// POST /providers - プロバイダー作成
pub async fn create_provider(
    State(state): State<AppState>,
    payload: Result<Json<ProviderConfigRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateProviderResponse>), AppError> {
    let config = parse_config(payload)?;
    let id = state.registry.create(config).await?;
    Ok((StatusCode::CREATED, Json(CreateProviderResponse { id })))
}

/// GET /providers - プロバイダー一覧
pub async fn list_providers(State(state): State<AppState>) -> Json<ListProvidersResponse> {
    let providers = state.registry.list().await;
    let views = join_all(providers.iter().map(|p| p.view())).await;
    Json(ListProvidersResponse {
        total: views.len(),
        providers: views,
    })
}

/// GET /providers/:id - プロバイダー詳細
pub async fn get_provider(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProviderView>, AppError> {
    let id = provider_id(&id)?;
    let provider = state.registry.get(id).await?;
    Ok(Json(provider.view().await))
}

/// PUT /providers/:id - プロバイダー設定更新
///
/// `url`/`name`が変わった場合、状態は`pending_reload`になる。
pub async fn update_provider(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ProviderConfigRequest>, JsonRejection>,
) -> Result<Json<ProviderView>, AppError> {
    let id = provider_id(&id)?;
    // 存在しないIDはボディの検証より先に404とする
    state.registry.get(id).await?;
    let config = parse_config(payload)?;
    let provider = state.registry.update(id, config).await?;
    Ok(Json(provider.view().await))
}

/// DELETE /providers/:id - プロバイダー削除
pub async fn delete_provider(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = provider_id(&id)?;
    state.registry.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /providers/:id/load - エンドポイントのロード
///
/// 取得失敗はHTTPエラーにせず、レスポンスの`status`/`success`で表す。
pub async fn load_provider(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<LoadProviderResponse>, AppError> {
    let id = provider_id(&id)?;
    let outcome = state
        .registry
        .load(id, state.source.as_ref(), state.fetch_timeout)
        .await?;
    Ok(Json(outcome.into()))
}

/// GET /providers/:id/next-endpoint - ラウンドロビンで次のエンドポイント
///
/// エンドポイントが空の場合は204 No Content。
pub async fn next_endpoint(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = provider_id(&id)?;
    let provider = state.registry.get(id).await?;
    Ok(match provider.next_endpoint().await {
        Some(endpoint) => Json(NextEndpointResponse { endpoint }).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    })
}

/// GET /providers/:id/endpoints - エンドポイント一覧
pub async fn list_endpoints(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ListEndpointsResponse>, AppError> {
    let id = provider_id(&id)?;
    let provider = state.registry.get(id).await?;
    Ok(Json(ListEndpointsResponse {
        endpoints: provider.endpoints().await,
    }))
}

/// GET /providers/:id/endpoints/:endpoint_id - エンドポイント詳細
pub async fn get_endpoint(
    State(state): State<AppState>,
    Path((id, endpoint_id)): Path<(String, String)>,
) -> Result<Json<Endpoint>, AppError> {
    let id = provider_id(&id)?;
    let provider = state.registry.get(id).await?;
    let not_found = || AppError::from(ProxyHubError::EndpointNotFound(endpoint_id.clone()));
    let parsed = Uuid::parse_str(&endpoint_id).map_err(|_| not_found())?;
    provider.endpoint(parsed).await.map(Json).ok_or_else(not_found)
}

/// GET /providers/:id/config - 設定のエクスポート
pub async fn export_config(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProviderConfig>, AppError> {
    let id = provider_id(&id)?;
    let provider = state.registry.get(id).await?;
    Ok(Json(provider.export_config().await))
}
