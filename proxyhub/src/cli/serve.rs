//! serve サブコマンド
//!
//! レジストリサーバーを起動します。

use clap::Args;
use proxyhub_common::config::ServerConfig;
use std::path::PathBuf;

/// serve サブコマンドの引数
///
/// 指定された値のみ設定ファイル・環境変数の値を上書きする。
#[derive(Args, Debug, Clone, Default)]
pub struct ServeArgs {
    /// Listen port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Bind address
    #[arg(short = 'H', long)]
    pub host: Option<String>,

    /// Database URL
    #[arg(long)]
    pub database_url: Option<String>,

    /// JSON file with endpoint records per provider URL
    #[arg(long)]
    pub source_file: Option<PathBuf>,

    /// Load every registered provider before accepting requests
    #[arg(long, default_value_t = false)]
    pub load_on_startup: bool,
}

impl ServeArgs {
    /// 引数で設定を上書き
    pub fn apply(self, base: ServerConfig) -> ServerConfig {
        ServerConfig {
            host: self.host.unwrap_or(base.host),
            port: self.port.unwrap_or(base.port),
            database_url: self.database_url.unwrap_or(base.database_url),
            source_file: self.source_file.or(base.source_file),
            load_on_startup: self.load_on_startup || base.load_on_startup,
            ..base
        }
    }
}
