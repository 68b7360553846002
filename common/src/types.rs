//! 共通型定義
//!
//! Endpoint, EndpointRecord, ProviderConfig, ProviderStatus等のコアデータ型

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CommonError;

/// プロバイダーの一意識別子
pub type ProviderId = Uuid;

/// プロキシエンドポイント
///
/// 生成後は不変。`id`はプロバイダーのリスト内で一意。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Endpoint {
    /// 一意識別子
    pub id: Uuid,
    /// 表示名（"Proxy 1", "Proxy 2", ...）
    pub name: String,
    /// ホスト名またはIPアドレス
    pub host: String,
    /// ポート番号
    pub port: u16,
    /// 認証ユーザー名
    pub username: String,
    /// 認証パスワード
    pub password: String,
}

impl Endpoint {
    /// 取得レコードからエンドポイントを作成
    ///
    /// `position`は1始まりの連番で、表示名に使われる。
    pub fn from_record(record: EndpointRecord, position: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: format!("Proxy {}", position),
            host: record.host,
            port: record.port,
            username: record.username,
            password: record.password,
        }
    }

    /// `host:port`形式のアドレス
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// エンドポイントソースから取得した生レコード
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EndpointRecord {
    /// ホスト名またはIPアドレス
    pub host: String,
    /// ポート番号
    pub port: u16,
    /// 認証ユーザー名
    #[serde(default)]
    pub username: String,
    /// 認証パスワード
    #[serde(default)]
    pub password: String,
}

impl EndpointRecord {
    /// レコードとして有効か検証する
    pub fn is_valid(&self) -> bool {
        self.port > 0 && !self.host.trim().is_empty()
    }
}

/// プロバイダー設定
///
/// 未ロード状態の同等なプロバイダーを再構築するのに十分な情報。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProviderConfig {
    /// エンドポイント取得元URL
    pub url: String,
    /// 表示名
    pub name: String,
}

impl ProviderConfig {
    /// 新しい設定を作成
    pub fn new(url: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            name: name.into(),
        }
    }

    /// 空の`url`/`name`を拒否する
    pub fn validate(&self) -> Result<(), CommonError> {
        if self.url.trim().is_empty() {
            return Err(CommonError::Validation("url is required".to_string()));
        }
        if self.name.trim().is_empty() {
            return Err(CommonError::Validation("name is required".to_string()));
        }
        Ok(())
    }
}

/// プロバイダー状態
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProviderStatus {
    /// 初期状態（未ロード）
    #[default]
    Unloaded,
    /// 設定変更によりリロードが必要
    PendingReload,
    /// ロード失敗
    Error,
    /// ロード済み
    Ready,
}

impl ProviderStatus {
    /// ProviderStatusを文字列に変換
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unloaded => "unloaded",
            Self::PendingReload => "pending_reload",
            Self::Error => "error",
            Self::Ready => "ready",
        }
    }
}

impl std::fmt::Display for ProviderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
