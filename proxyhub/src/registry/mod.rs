//! プロバイダーレジストリ
//!
//! プロバイダーをメモリ内で管理し、設定をデータベースと同期する。
//! レジストリのロックはマップ操作の間だけ保持し、プロバイダー内部の操作には持ち越さない。

use proxyhub_common::{
    error::{ProxyHubError, ProxyHubResult},
    types::{ProviderConfig, ProviderId},
};
use sqlx::SqlitePool;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

use crate::db::providers::{self as db, ProviderRecord};
use crate::provider::{LoadOutcome, Provider};
use crate::source::EndpointSource;

#[derive(Default)]
struct RegistryInner {
    providers: HashMap<ProviderId, Arc<Provider>>,
    /// 作成順
    order: Vec<ProviderId>,
}

/// プロバイダーレジストリ
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    inner: Arc<RwLock<RegistryInner>>,
    pool: Option<SqlitePool>,
    /// 作成・更新・保存・削除を直列化し、DBとメモリの反映順を揃える
    mutation_lock: Arc<Mutex<()>>,
}

impl ProviderRegistry {
    /// インメモリのみのレジストリを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// データベース付きのレジストリを作成し、保存済みのプロバイダーを復元
    ///
    /// 復元されたプロバイダーはすべて`Unloaded`状態になる。
    pub async fn with_database(pool: SqlitePool) -> ProxyHubResult<Self> {
        let records = db::list_providers(&pool).await.map_err(database_error)?;

        let mut inner = RegistryInner::default();
        for record in records {
            let provider = Provider::restore(record.id, record.config);
            inner.order.push(record.id);
            inner.providers.insert(record.id, Arc::new(provider));
        }
        info!(
            provider_count = inner.order.len(),
            "Restored providers from database"
        );

        Ok(Self {
            inner: Arc::new(RwLock::new(inner)),
            pool: Some(pool),
            mutation_lock: Arc::default(),
        })
    }

    /// プロバイダーを作成
    pub async fn create(&self, config: ProviderConfig) -> ProxyHubResult<ProviderId> {
        let provider = Provider::new(config)?;
        let id = provider.id();

        let _guard = self.mutation_lock.lock().await;
        self.persist(id, &provider.export_config().await).await?;

        let mut inner = self.inner.write().await;
        inner.order.push(id);
        inner.providers.insert(id, Arc::new(provider));
        info!(provider_id = %id, "Provider created");
        Ok(id)
    }

    /// プロバイダーを取得
    pub async fn get(&self, id: ProviderId) -> ProxyHubResult<Arc<Provider>> {
        self.inner
            .read()
            .await
            .providers
            .get(&id)
            .cloned()
            .ok_or_else(|| ProxyHubError::ProviderNotFound(id.to_string()))
    }

    /// 全プロバイダーを作成順で取得
    pub async fn list(&self) -> Vec<Arc<Provider>> {
        let inner = self.inner.read().await;
        inner
            .order
            .iter()
            .filter_map(|id| inner.providers.get(id).cloned())
            .collect()
    }

    /// 登録数
    pub async fn count(&self) -> usize {
        self.inner.read().await.order.len()
    }

    /// プロバイダーを削除
    ///
    /// 存在しないIDは`ProviderNotFound`を返す。DB削除に失敗した場合はメモリ上にも残す。
    pub async fn remove(&self, id: ProviderId) -> ProxyHubResult<()> {
        let _guard = self.mutation_lock.lock().await;
        self.get(id).await?;
        if let Some(pool) = &self.pool {
            db::delete_provider(pool, id)
                .await
                .map_err(database_error)?;
        }

        let mut inner = self.inner.write().await;
        inner.providers.remove(&id);
        inner.order.retain(|existing| *existing != id);
        info!(provider_id = %id, "Provider removed");
        Ok(())
    }

    /// プロバイダーを保存（同じIDの既存エントリを上書き）
    pub async fn save(&self, provider: Arc<Provider>) -> ProxyHubResult<()> {
        let id = provider.id();
        let _guard = self.mutation_lock.lock().await;
        self.persist(id, &provider.export_config().await).await?;

        let mut inner = self.inner.write().await;
        if inner.providers.insert(id, provider).is_none() {
            inner.order.push(id);
        }
        debug!(provider_id = %id, "Provider saved");
        Ok(())
    }

    /// プロバイダー設定を更新
    ///
    /// 変更がある場合は先に永続化し、成功してからプロバイダーへ反映する。
    /// 永続化に失敗した場合、プロバイダーの設定・状態は変わらない。
    pub async fn update(
        &self,
        id: ProviderId,
        config: ProviderConfig,
    ) -> ProxyHubResult<Arc<Provider>> {
        config
            .validate()
            .map_err(|e| ProxyHubError::from(e).into_invalid_config())?;

        let _guard = self.mutation_lock.lock().await;
        let provider = self.get(id).await?;
        if provider.export_config().await == config {
            return Ok(provider);
        }

        self.persist(id, &config).await?;
        provider.update(config).await?;
        info!(provider_id = %id, "Provider config updated");
        Ok(provider)
    }

    /// プロバイダーのエンドポイントをロード
    pub async fn load(
        &self,
        id: ProviderId,
        source: &dyn EndpointSource,
        timeout: Duration,
    ) -> ProxyHubResult<LoadOutcome> {
        let provider = self.get(id).await?;
        Ok(provider.load(source, timeout).await)
    }

    /// 全プロバイダーを順にロード
    pub async fn load_all(
        &self,
        source: &dyn EndpointSource,
        timeout: Duration,
    ) -> Vec<(ProviderId, LoadOutcome)> {
        let mut outcomes = Vec::new();
        for provider in self.list().await {
            let outcome = provider.load(source, timeout).await;
            outcomes.push((provider.id(), outcome));
        }
        let failed = outcomes.iter().filter(|(_, o)| !o.success).count();
        info!(
            provider_count = outcomes.len(),
            failed,
            "Loaded all providers"
        );
        outcomes
    }

    async fn persist(&self, id: ProviderId, config: &ProviderConfig) -> ProxyHubResult<()> {
        let Some(pool) = &self.pool else {
            return Ok(());
        };
        let record = ProviderRecord {
            id,
            config: config.clone(),
        };
        db::upsert_provider(pool, &record)
            .await
            .map_err(database_error)
    }
}

fn database_error(err: sqlx::Error) -> ProxyHubError {
    ProxyHubError::Database(err.to_string())
}
