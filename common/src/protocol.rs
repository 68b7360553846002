//! 通信プロトコル定義
//!
//! REST APIのリクエスト/レスポンス型

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CommonError;
use crate::types::{Endpoint, ProviderConfig, ProviderStatus};

/// プロバイダー設定リクエスト（作成・更新共通）
///
/// フィールド欠落はデシリアライズ時ではなく`into_config()`で検出する。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderConfigRequest {
    /// エンドポイント取得元URL
    #[serde(default)]
    pub url: Option<String>,
    /// 表示名
    #[serde(default)]
    pub name: Option<String>,
}

impl ProviderConfigRequest {
    /// 検証済みのプロバイダー設定に変換
    pub fn into_config(self) -> Result<ProviderConfig, CommonError> {
        let url = self
            .url
            .ok_or_else(|| CommonError::Validation("url is required".to_string()))?;
        let name = self
            .name
            .ok_or_else(|| CommonError::Validation("name is required".to_string()))?;
        let config = ProviderConfig::new(url, name);
        config.validate()?;
        Ok(config)
    }
}

/// プロバイダー作成レスポンス
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateProviderResponse {
    /// 割り当てられたプロバイダーID
    pub id: Uuid,
}

/// プロバイダー表示用ビュー
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProviderView {
    /// プロバイダーID
    pub id: Uuid,
    /// エンドポイント取得元URL
    pub url: String,
    /// 表示名
    pub name: String,
    /// 状態
    pub status: ProviderStatus,
    /// 保持しているエンドポイント数
    pub endpoint_count: usize,
    /// 表示用の状態メッセージ
    pub status_message: String,
    /// 直近のロード失敗理由
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}

/// プロバイダー一覧レスポンス
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListProvidersResponse {
    /// プロバイダー一覧（作成順）
    pub providers: Vec<ProviderView>,
    /// 総数
    pub total: usize,
}

/// ロード結果レスポンス
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LoadProviderResponse {
    /// ロード成功フラグ
    pub success: bool,
    /// ロード後の状態
    pub status: ProviderStatus,
    /// ロード後のエンドポイント数
    pub endpoint_count: usize,
}

/// 次エンドポイントレスポンス
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NextEndpointResponse {
    /// 選択されたエンドポイント
    pub endpoint: Endpoint,
}

/// エンドポイント一覧レスポンス
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListEndpointsResponse {
    /// エンドポイント一覧（ローテーション順）
    pub endpoints: Vec<Endpoint>,
}
