//! APIエラーレスポンス型
//!
//! axum用の共通エラーハンドリング

use axum::{http::StatusCode, response::IntoResponse, Json};
use proxyhub_common::error::{CommonError, ProxyHubError};
use serde_json::json;

/// Axum用のエラーレスポンス型
#[derive(Debug)]
pub struct AppError(pub ProxyHubError);

impl From<ProxyHubError> for AppError {
    fn from(err: ProxyHubError) -> Self {
        AppError(err.into_invalid_config())
    }
}

impl From<CommonError> for AppError {
    fn from(err: CommonError) -> Self {
        AppError::from(ProxyHubError::from(err))
    }
}

impl AppError {
    /// HTTPステータスコード
    pub fn status_code(&self) -> StatusCode {
        match &self.0 {
            ProxyHubError::Common(_) => StatusCode::BAD_REQUEST,
            ProxyHubError::InvalidConfig(_) => StatusCode::BAD_REQUEST,
            ProxyHubError::ProviderNotFound(_) => StatusCode::NOT_FOUND,
            ProxyHubError::EndpointNotFound(_) => StatusCode::NOT_FOUND,
            ProxyHubError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ProxyHubError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        // 詳細はログのみに出し、クライアントにはexternal_message()を返す
        if status.is_server_error() {
            tracing::error!(error = %self.0, "Request failed");
        } else {
            tracing::debug!(error = %self.0, "Request rejected");
        }

        let payload = json!({
            "error": self.0.external_message(),
            "type": self.0.error_type(),
        });

        (status, Json(payload)).into_response()
    }
}
