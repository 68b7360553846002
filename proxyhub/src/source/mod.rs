//! エンドポイントソース
//!
//! プロバイダーのロード時にエンドポイントの生レコードを取得する外部協調者。
//! コアはこのtraitにのみ依存し、レコードのEndpoint化と失敗時の状態遷移を担う。

mod static_source;

use async_trait::async_trait;
use proxyhub_common::types::EndpointRecord;
use std::time::Duration;
use thiserror::Error;

pub use static_source::StaticEndpointSource;

/// エンドポイント取得エラー
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// 取得元に到達できない、または非成功応答
    #[error("Endpoint source unreachable: {0}")]
    Unreachable(String),

    /// 取得したレコードが不正
    #[error("Invalid endpoint payload: {0}")]
    InvalidPayload(String),

    /// 取得がタイムアウトした
    #[error("Endpoint fetch timed out after {0:?}")]
    Timeout(Duration),
}

/// エンドポイント取得のRepository trait
#[async_trait]
pub trait EndpointSource: Send + Sync {
    /// `url`に対応するエンドポイントの生レコードを取得
    async fn fetch_endpoints(&self, url: &str) -> Result<Vec<EndpointRecord>, FetchError>;
}

/// 取得レコードを検証する
///
/// 1件でも不正なレコードがあれば全体を失敗とし、部分的な適用を防ぐ。
pub fn validate_records(records: &[EndpointRecord]) -> Result<(), FetchError> {
    if let Some((index, record)) = records
        .iter()
        .enumerate()
        .find(|(_, record)| !record.is_valid())
    {
        return Err(FetchError::InvalidPayload(format!(
            "record {} has invalid address {}:{}",
            index + 1,
            record.host,
            record.port
        )));
    }
    Ok(())
}
