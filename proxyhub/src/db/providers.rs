//! プロバイダー設定のデータベース操作
//!
//! 1プロバイダーにつき1レコード（id, url, name）。
//! エンドポイントは保存しない。

use proxyhub_common::types::{ProviderConfig, ProviderId};
use sqlx::SqlitePool;
use uuid::Uuid;

/// 永続化されたプロバイダー設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderRecord {
    /// プロバイダーID
    pub id: ProviderId,
    /// 設定
    pub config: ProviderConfig,
}

#[derive(sqlx::FromRow)]
struct ProviderRow {
    id: String,
    url: String,
    name: String,
}

impl TryFrom<ProviderRow> for ProviderRecord {
    type Error = sqlx::Error;

    fn try_from(row: ProviderRow) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&row.id).map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
        Ok(ProviderRecord {
            id,
            config: ProviderConfig::new(row.url, row.name),
        })
    }
}

/// プロバイダーを挿入、既存なら設定を上書き
///
/// 既存行の上書きでは`rowid`が変わらないため、復元順は最初の挿入順のまま。
pub async fn upsert_provider(pool: &SqlitePool, record: &ProviderRecord) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO providers (id, url, name)
        VALUES (?, ?, ?)
        ON CONFLICT(id) DO UPDATE SET url = excluded.url, name = excluded.name
        "#,
    )
    .bind(record.id.to_string())
    .bind(&record.config.url)
    .bind(&record.config.name)
    .execute(pool)
    .await?;

    Ok(())
}

/// プロバイダー一覧を挿入順で取得
pub async fn list_providers(pool: &SqlitePool) -> Result<Vec<ProviderRecord>, sqlx::Error> {
    let rows = sqlx::query_as::<_, ProviderRow>(
        r#"
        SELECT id, url, name
        FROM providers
        ORDER BY rowid ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(ProviderRecord::try_from).collect()
}

/// プロバイダーを削除
pub async fn delete_provider(pool: &SqlitePool, id: ProviderId) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM providers WHERE id = ?")
        .bind(id.to_string())
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
