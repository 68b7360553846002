//! プロバイダー
//!
//! 1つの設定に紐づくエンドポイント一覧・ラウンドロビンカーソル・状態を保持する。
//! 可変状態は単一のRwLockで保護し、ロード処理は別のMutexで1件ずつ直列化する。

use proxyhub_common::{
    error::{ProxyHubError, ProxyHubResult},
    protocol::{LoadProviderResponse, ProviderView},
    types::{Endpoint, ProviderConfig, ProviderId, ProviderStatus},
};
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::source::{validate_records, EndpointSource, FetchError};

/// ロード結果
///
/// 取得失敗はエラーとして返さず、`success = false`と`Error`状態で表す。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOutcome {
    /// ロード成功フラグ
    pub success: bool,
    /// ロード後の状態
    pub status: ProviderStatus,
    /// ロード後のエンドポイント数
    pub endpoint_count: usize,
}

impl From<LoadOutcome> for LoadProviderResponse {
    fn from(outcome: LoadOutcome) -> Self {
        LoadProviderResponse {
            success: outcome.success,
            status: outcome.status,
            endpoint_count: outcome.endpoint_count,
        }
    }
}

#[derive(Debug)]
struct ProviderState {
    config: ProviderConfig,
    /// 設定変更のたびに増える世代番号
    generation: u64,
    endpoints: Vec<Endpoint>,
    /// 次に返すエンドポイントの位置（`endpoints`が空でなければ常に範囲内）
    cursor: usize,
    status: ProviderStatus,
    last_error: Option<String>,
}

/// プロキシプロバイダー
#[derive(Debug)]
pub struct Provider {
    id: ProviderId,
    state: RwLock<ProviderState>,
    load_lock: Mutex<()>,
}

impl Provider {
    /// 新しいプロバイダーを`Unloaded`状態で作成
    pub fn new(config: ProviderConfig) -> ProxyHubResult<Self> {
        config
            .validate()
            .map_err(|e| ProxyHubError::from(e).into_invalid_config())?;
        Ok(Self::restore(Uuid::new_v4(), config))
    }

    /// 永続化済みの設定からプロバイダーを復元（エンドポイントは未ロード）
    pub fn restore(id: ProviderId, config: ProviderConfig) -> Self {
        Self {
            id,
            state: RwLock::new(ProviderState {
                config,
                generation: 0,
                endpoints: Vec::new(),
                cursor: 0,
                status: ProviderStatus::Unloaded,
                last_error: None,
            }),
            load_lock: Mutex::new(()),
        }
    }

    /// プロバイダーID
    pub fn id(&self) -> ProviderId {
        self.id
    }

    /// 現在の状態
    pub async fn status(&self) -> ProviderStatus {
        self.state.read().await.status
    }

    /// 現在のカーソル位置
    pub async fn cursor(&self) -> usize {
        self.state.read().await.cursor
    }

    /// 保持しているエンドポイント数
    pub async fn endpoint_count(&self) -> usize {
        self.state.read().await.endpoints.len()
    }

    /// 設定をエクスポート
    pub async fn export_config(&self) -> ProviderConfig {
        self.state.read().await.config.clone()
    }

    /// 表示用の状態メッセージ
    pub async fn describe_status(&self) -> String {
        let state = self.state.read().await;
        describe(&state)
    }

    /// 表示用ビュー
    pub async fn view(&self) -> ProviderView {
        let state = self.state.read().await;
        ProviderView {
            id: self.id,
            url: state.config.url.clone(),
            name: state.config.name.clone(),
            status: state.status,
            endpoint_count: state.endpoints.len(),
            status_message: describe(&state),
            last_error: state.last_error.clone(),
        }
    }

    /// 設定を更新
    ///
    /// `url`か`name`のいずれかが変わった場合のみ適用し、状態を`PendingReload`にする。
    /// 変更があったかどうかを返す。
    pub async fn update(&self, config: ProviderConfig) -> ProxyHubResult<bool> {
        config
            .validate()
            .map_err(|e| ProxyHubError::from(e).into_invalid_config())?;

        let mut state = self.state.write().await;
        if state.config == config {
            return Ok(false);
        }

        debug!(
            provider_id = %self.id,
            old_url = %state.config.url,
            new_url = %config.url,
            "Provider config changed, reload required"
        );
        state.config = config;
        state.generation += 1;
        state.status = ProviderStatus::PendingReload;
        Ok(true)
    }

    /// エンドポイントをロード（再ロード）
    ///
    /// 開始時にエンドポイントを空にし、取得成功時にのみ新しい一覧で置き換える。
    /// 失敗・タイムアウトは`Error`状態として吸収され、呼び出し元へは伝播しない。
    pub async fn load(&self, source: &dyn EndpointSource, timeout: Duration) -> LoadOutcome {
        let _serial = self.load_lock.lock().await;

        let (url, generation) = {
            let mut state = self.state.write().await;
            state.endpoints.clear();
            state.cursor = 0;
            (state.config.url.clone(), state.generation)
        };

        let fetched = match tokio::time::timeout(timeout, source.fetch_endpoints(&url)).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout(timeout)),
        }
        .and_then(|records| validate_records(&records).map(|_| records));

        let mut state = self.state.write().await;
        match fetched {
            Ok(records) => {
                state.endpoints = records
                    .into_iter()
                    .enumerate()
                    .map(|(index, record)| Endpoint::from_record(record, index + 1))
                    .collect();
                state.cursor = 0;
                state.last_error = None;
                // ロード中に設定が変わった場合は古いURLの結果なので再ロードを促す
                state.status = if state.generation == generation {
                    ProviderStatus::Ready
                } else {
                    ProviderStatus::PendingReload
                };
                info!(
                    provider_id = %self.id,
                    url = %url,
                    endpoint_count = state.endpoints.len(),
                    status = %state.status,
                    "Provider endpoints loaded"
                );
                LoadOutcome {
                    success: true,
                    status: state.status,
                    endpoint_count: state.endpoints.len(),
                }
            }
            Err(err) => {
                state.endpoints.clear();
                state.cursor = 0;
                state.status = ProviderStatus::Error;
                state.last_error = Some(err.to_string());
                warn!(
                    provider_id = %self.id,
                    url = %url,
                    error = %err,
                    "Failed to load provider endpoints"
                );
                LoadOutcome {
                    success: false,
                    status: ProviderStatus::Error,
                    endpoint_count: 0,
                }
            }
        }
    }

    /// ラウンドロビンで次のエンドポイントを取得
    ///
    /// 空の場合は`None`を返し、カーソルは変更しない。
    pub async fn next_endpoint(&self) -> Option<Endpoint> {
        let mut state = self.state.write().await;
        if state.endpoints.is_empty() {
            return None;
        }
        let endpoint = state.endpoints[state.cursor].clone();
        state.cursor = (state.cursor + 1) % state.endpoints.len();
        debug!(
            provider_id = %self.id,
            endpoint = %endpoint.name,
            address = %endpoint.address(),
            next_cursor = state.cursor,
            "Selected endpoint"
        );
        Some(endpoint)
    }

    /// IDでエンドポイントを取得（カーソルは変更しない）
    pub async fn endpoint(&self, endpoint_id: Uuid) -> Option<Endpoint> {
        self.state
            .read()
            .await
            .endpoints
            .iter()
            .find(|e| e.id == endpoint_id)
            .cloned()
    }

    /// エンドポイント一覧（カーソルは変更しない）
    pub async fn endpoints(&self) -> Vec<Endpoint> {
        self.state.read().await.endpoints.clone()
    }
}

fn describe(state: &ProviderState) -> String {
    match state.status {
        ProviderStatus::Unloaded => "No proxies loaded".to_string(),
        ProviderStatus::PendingReload => "Reload required".to_string(),
        ProviderStatus::Error => format!("Failed to load proxies from {}", state.config.url),
        ProviderStatus::Ready => format!("{} proxies loaded", state.endpoints.len()),
    }
}
