//! 設定管理
//!
//! ServerConfig等の設定構造体

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::CommonError;

/// サーバー設定
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerConfig {
    /// ホストアドレス (デフォルト: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// ポート番号 (デフォルト: 32780)
    #[serde(default = "default_port")]
    pub port: u16,

    /// データベースURL (デフォルト: "sqlite://proxyhub.db")
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// エンドポイント取得のタイムアウト（秒）(デフォルト: 10)
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,

    /// 起動時に復元した全プロバイダーをロードするか (デフォルト: false)
    #[serde(default)]
    pub load_on_startup: bool,

    /// エンドポイントソースのJSONファイル（未指定時はデモ用ソース）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_file: Option<PathBuf>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    32780
}

fn default_database_url() -> String {
    "sqlite://proxyhub.db".to_string()
}

fn default_fetch_timeout() -> u64 {
    10
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            database_url: default_database_url(),
            fetch_timeout_secs: default_fetch_timeout(),
            load_on_startup: false,
            source_file: None,
        }
    }
}

impl ServerConfig {
    /// 設定ファイル（TOML/JSON/YAML）から読み込む
    ///
    /// ファイルが存在しない場合はデフォルト値を返す。
    pub fn load(path: &Path) -> Result<Self, CommonError> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    /// `host:port`形式のバインドアドレス
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
