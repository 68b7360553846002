//! ProxyHub Server
//!
//! プロキシプロバイダーを登録・ロードし、ラウンドロビンでエンドポイントを払い出すサーバー

#![warn(missing_docs)]

/// REST APIハンドラー
pub mod api;

/// CLIインターフェース
pub mod cli;

/// 設定管理（環境変数ヘルパー）
pub mod config;

/// データベースアクセス
pub mod db;

/// ロギング初期化ユーティリティ
pub mod logging;

/// プロバイダー（状態遷移とラウンドロビン）
pub mod provider;

/// プロバイダーレジストリ
pub mod registry;

/// サーバー起動
pub mod server;

/// エンドポイントソース
pub mod source;

use std::sync::Arc;
use std::time::Duration;

/// アプリケーション状態
#[derive(Clone)]
pub struct AppState {
    /// プロバイダーレジストリ
    pub registry: registry::ProviderRegistry,
    /// エンドポイントの取得元
    pub source: Arc<dyn source::EndpointSource>,
    /// エンドポイント取得のタイムアウト
    pub fetch_timeout: Duration,
}
