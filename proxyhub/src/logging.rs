//! ロギング初期化ユーティリティ
//!
//! `PROXYHUB_LOG_LEVEL`（未設定時は`RUST_LOG`、既定は`info`）からフィルタを構築し、
//! `PROXYHUB_LOG_FORMAT=json`でJSON出力に切り替える。

use tracing_subscriber::EnvFilter;

/// 既定のログレベル
const DEFAULT_LOG_LEVEL: &str = "info";

/// ログ出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// 人間向けテキスト
    Text,
    /// 1行1JSON
    Json,
}

/// フィルタ指定文字列を取得
pub fn log_filter_directive() -> String {
    std::env::var("PROXYHUB_LOG_LEVEL")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
}

/// ログ出力形式を取得
pub fn log_format() -> LogFormat {
    match std::env::var("PROXYHUB_LOG_FORMAT") {
        Ok(value) if value.eq_ignore_ascii_case("json") => LogFormat::Json,
        _ => LogFormat::Text,
    }
}

/// グローバルサブスクライバーを初期化
pub fn init() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let directive = log_filter_directive();
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|err| {
        eprintln!(
            "Invalid log filter '{}': {}; falling back to '{}'",
            directive, err, DEFAULT_LOG_LEVEL
        );
        EnvFilter::new(DEFAULT_LOG_LEVEL)
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);
    match log_format() {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.try_init(),
    }
}
