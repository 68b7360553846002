//! Configuration management via environment variables
//!
//! Provides helper functions for reading environment variables with fallback
//! to deprecated variable names with warning logs, and assembles the
//! [`ServerConfig`] from an optional config file plus environment overrides.

use proxyhub_common::{config::ServerConfig, error::CommonError};
use std::path::{Path, PathBuf};

/// Default config file looked up when `PROXYHUB_CONFIG` is not set
pub const DEFAULT_CONFIG_FILE: &str = "proxyhub.toml";

/// Get an environment variable with fallback to a deprecated name
///
/// If the new variable name is set, returns its value.
/// If only the old (deprecated) variable name is set, returns its value
/// and logs a deprecation warning.
pub fn get_env_with_fallback(new_name: &str, old_name: &str) -> Option<String> {
    if let Ok(val) = std::env::var(new_name) {
        return Some(val);
    }
    if let Ok(val) = std::env::var(old_name) {
        tracing::warn!(
            "Environment variable '{}' is deprecated, use '{}' instead",
            old_name,
            new_name
        );
        return Some(val);
    }
    None
}

/// Get an environment variable with fallback and default value
pub fn get_env_with_fallback_or(new_name: &str, old_name: &str, default: &str) -> String {
    get_env_with_fallback(new_name, old_name).unwrap_or_else(|| default.to_string())
}

/// Get an environment variable with fallback, parsing to a specific type
///
/// Returns `default` if neither is set or parsing fails.
pub fn get_env_with_fallback_parse<T: std::str::FromStr>(
    new_name: &str,
    old_name: &str,
    default: T,
) -> T {
    get_env_with_fallback(new_name, old_name)
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// Get a boolean flag (`true/1/yes/on`) with fallback
pub fn get_env_with_fallback_bool(new_name: &str, old_name: &str, default: bool) -> bool {
    get_env_with_fallback(new_name, old_name)
        .map(|value| {
            matches!(
                value.to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            )
        })
        .unwrap_or(default)
}

/// 設定ファイルのパスを取得
///
/// 環境変数 `PROXYHUB_CONFIG`（旧: `PROXYHUB_CONFIG_FILE`）、未設定時は `proxyhub.toml`。
pub fn config_file_path() -> PathBuf {
    PathBuf::from(get_env_with_fallback_or(
        "PROXYHUB_CONFIG",
        "PROXYHUB_CONFIG_FILE",
        DEFAULT_CONFIG_FILE,
    ))
}

/// サーバー設定を読み込む
///
/// 設定ファイル（存在すれば）の値に環境変数を上書きする。
pub fn load_server_config(path: &Path) -> Result<ServerConfig, CommonError> {
    let base = ServerConfig::load(path)?;
    Ok(apply_env_overrides(base))
}

/// 環境変数でサーバー設定を上書き
pub fn apply_env_overrides(base: ServerConfig) -> ServerConfig {
    ServerConfig {
        host: get_env_with_fallback_or("PROXYHUB_HOST", "HOST", &base.host),
        port: get_env_with_fallback_parse("PROXYHUB_PORT", "PORT", base.port),
        database_url: get_env_with_fallback_or(
            "PROXYHUB_DATABASE_URL",
            "DATABASE_URL",
            &base.database_url,
        ),
        fetch_timeout_secs: get_env_with_fallback_parse(
            "PROXYHUB_FETCH_TIMEOUT_SECS",
            "FETCH_TIMEOUT_SECS",
            base.fetch_timeout_secs,
        ),
        load_on_startup: get_env_with_fallback_bool(
            "PROXYHUB_LOAD_ON_STARTUP",
            "LOAD_ON_STARTUP",
            base.load_on_startup,
        ),
        source_file: get_env_with_fallback("PROXYHUB_SOURCE_FILE", "SOURCE_FILE")
            .map(PathBuf::from)
            .or(base.source_file),
    }
}
