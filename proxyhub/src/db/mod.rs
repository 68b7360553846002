//! データベースアクセス層
//!
//! SQLiteベースのプロバイダー設定の永続化

/// プロバイダー設定
pub mod providers;

use proxyhub_common::error::{ProxyHubError, ProxyHubResult};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// データベース接続プールを作成し、マイグレーションを実行
pub async fn create_pool(database_url: &str) -> ProxyHubResult<SqlitePool> {
    ensure_parent_dir(database_url)?;

    let connect_options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| ProxyHubError::Database(e.to_string()))?
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(connect_options)
        .await
        .map_err(|e| ProxyHubError::Database(e.to_string()))?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| ProxyHubError::Database(format!("Migration failed: {}", e)))?;

    Ok(pool)
}

/// SQLiteファイルはディレクトリが存在しないと作成できないため、先に作成しておく
fn ensure_parent_dir(database_url: &str) -> ProxyHubResult<()> {
    let Some(path) = database_url.strip_prefix("sqlite:") else {
        return Ok(());
    };
    // `sqlite::memory:` のような特殊指定はスキップ
    if path.starts_with(':') {
        return Ok(());
    }
    let normalized = path.trim_start_matches("//");
    let path_without_params = normalized.split('?').next().unwrap_or(normalized);
    if let Some(parent) = std::path::Path::new(path_without_params).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ProxyHubError::Database(format!(
                    "Failed to create database directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }
    Ok(())
}
