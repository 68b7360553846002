//! プロセス内エンドポイントソース
//!
//! URLごとのレコード一覧をメモリに保持する。JSONファイルからの読み込みと、
//! 任意のURLに固定のサンプルを返すデモ用ソースを提供する。

use async_trait::async_trait;
use proxyhub_common::error::CommonError;
use proxyhub_common::types::EndpointRecord;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

use super::{EndpointSource, FetchError};

/// ファイル内でフォールバックを表すキー
const FALLBACK_KEY: &str = "*";

/// 静的エンドポイントソース
#[derive(Debug, Clone, Default)]
pub struct StaticEndpointSource {
    by_url: HashMap<String, Vec<EndpointRecord>>,
    fallback: Option<Vec<EndpointRecord>>,
}

impl StaticEndpointSource {
    /// 空のソースを作成（どのURLも到達不能）
    pub fn new() -> Self {
        Self::default()
    }

    /// 任意のURLに固定のサンプルプロキシを返すデモ用ソース
    pub fn demo() -> Self {
        let sample = |host: &str, port: u16, username: &str, password: &str| EndpointRecord {
            host: host.to_string(),
            port,
            username: username.to_string(),
            password: password.to_string(),
        };
        Self::new().with_fallback(vec![
            sample("203.0.113.10", 8080, "demo", "demo-pass-1"),
            sample("203.0.113.11", 8080, "demo", "demo-pass-2"),
            sample("203.0.113.12", 1080, "demo", "demo-pass-3"),
        ])
    }

    /// JSONファイルから読み込む
    ///
    /// 形式: `{ "<url>": [records...], "*": [fallback records] }`
    pub async fn from_file(path: &Path) -> Result<Self, CommonError> {
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            CommonError::Config(format!(
                "failed to read source file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json(&content)
    }

    /// JSON文字列から読み込む
    pub fn from_json(content: &str) -> Result<Self, CommonError> {
        let mut by_url: HashMap<String, Vec<EndpointRecord>> = serde_json::from_str(content)?;
        let fallback = by_url.remove(FALLBACK_KEY);
        Ok(Self { by_url, fallback })
    }

    /// URLに対応するレコードを登録
    pub fn with_records(mut self, url: impl Into<String>, records: Vec<EndpointRecord>) -> Self {
        self.by_url.insert(url.into(), records);
        self
    }

    /// 未登録URLに返すレコードを設定
    pub fn with_fallback(mut self, records: Vec<EndpointRecord>) -> Self {
        self.fallback = Some(records);
        self
    }
}

#[async_trait]
impl EndpointSource for StaticEndpointSource {
    async fn fetch_endpoints(&self, url: &str) -> Result<Vec<EndpointRecord>, FetchError> {
        if let Some(records) = self.by_url.get(url) {
            debug!(url = %url, count = records.len(), "Serving configured endpoint records");
            return Ok(records.clone());
        }
        match &self.fallback {
            Some(records) => {
                debug!(url = %url, count = records.len(), "Serving fallback endpoint records");
                Ok(records.clone())
            }
            None => Err(FetchError::Unreachable(format!(
                "no endpoint records configured for {}",
                url
            ))),
        }
    }
}
