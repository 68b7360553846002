//! エラー型定義
//!
//! 統一エラー型（thiserror使用）

use thiserror::Error;

/// Common layer error type
#[derive(Debug, Error)]
pub enum CommonError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<config::ConfigError> for CommonError {
    fn from(err: config::ConfigError) -> Self {
        CommonError::Config(err.to_string())
    }
}

/// ProxyHub error type
#[derive(Debug, Error)]
pub enum ProxyHubError {
    /// Common layer error
    #[error(transparent)]
    Common(#[from] CommonError),

    /// Malformed provider configuration
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Provider not found (unknown or unparsable id)
    #[error("Provider not found: {0}")]
    ProviderNotFound(String),

    /// Endpoint not found (unknown or unparsable id)
    #[error("Endpoint not found: {0}")]
    EndpointNotFound(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ProxyHubError {
    /// Returns a safe error message for external clients.
    ///
    /// Full details (`to_string()`) stay in server logs.
    pub fn external_message(&self) -> String {
        match self {
            Self::Common(CommonError::Validation(msg)) => msg.clone(),
            Self::Common(_) => "Request error".to_string(),
            Self::InvalidConfig(msg) => msg.clone(),
            Self::ProviderNotFound(_) => "Provider not found".to_string(),
            Self::EndpointNotFound(_) => "Endpoint not found".to_string(),
            Self::Database(_) => "Database error".to_string(),
            Self::Internal(_) => "Internal server error".to_string(),
        }
    }

    /// Returns the error type string used in API error bodies.
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Common(CommonError::Validation(_)) => "invalid_config",
            Self::Common(_) => "invalid_request",
            Self::InvalidConfig(_) => "invalid_config",
            Self::ProviderNotFound(_) => "not_found",
            Self::EndpointNotFound(_) => "not_found",
            Self::Database(_) => "server_error",
            Self::Internal(_) => "server_error",
        }
    }

    /// 検証エラーを`InvalidConfig`に正規化する
    pub fn into_invalid_config(self) -> Self {
        match self {
            Self::Common(CommonError::Validation(msg)) => Self::InvalidConfig(msg),
            other => other,
        }
    }
}

/// ProxyHub result type
pub type ProxyHubResult<T> = Result<T, ProxyHubError>;
