//! サーバー起動
//!
//! 設定からDB・レジストリ・エンドポイントソースを組み立て、HTTPサーバーを起動する。

use proxyhub_common::{
    config::ServerConfig,
    error::{ProxyHubError, ProxyHubResult},
};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::source::{EndpointSource, StaticEndpointSource};
use crate::{api, db, registry::ProviderRegistry, AppState};

/// 設定に応じたエンドポイントソースを作成
///
/// `source_file`未指定時はデモ用ソースを使う。
pub async fn build_source(config: &ServerConfig) -> ProxyHubResult<Arc<dyn EndpointSource>> {
    match &config.source_file {
        Some(path) => {
            let source = StaticEndpointSource::from_file(path).await?;
            info!(path = %path.display(), "Loaded endpoint source file");
            Ok(Arc::new(source))
        }
        None => {
            info!("No source file configured, serving demo endpoints");
            Ok(Arc::new(StaticEndpointSource::demo()))
        }
    }
}

/// アプリケーション状態を組み立てる
pub async fn build_state(config: &ServerConfig) -> ProxyHubResult<AppState> {
    let pool = db::create_pool(&config.database_url).await?;
    let registry = ProviderRegistry::with_database(pool).await?;
    let source = build_source(config).await?;
    let fetch_timeout = Duration::from_secs(config.fetch_timeout_secs);

    if config.load_on_startup {
        registry.load_all(source.as_ref(), fetch_timeout).await;
    }

    Ok(AppState {
        registry,
        source,
        fetch_timeout,
    })
}

/// サーバーを起動し、Ctrl+Cで停止するまで待機
pub async fn run_server(config: ServerConfig) -> ProxyHubResult<()> {
    info!("ProxyHub v{}", env!("CARGO_PKG_VERSION"));
    info!(database_url = %config.database_url, "Connecting to database");

    let state = build_state(&config).await?;
    info!(
        provider_count = state.registry.count().await,
        "Provider registry initialized"
    );

    let router = api::create_router(state);
    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| ProxyHubError::Internal(format!("Failed to bind {}: {}", bind_addr, e)))?;

    info!("ProxyHub server listening on {}", bind_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ProxyHubError::Internal(format!("Server error: {}", e)))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
