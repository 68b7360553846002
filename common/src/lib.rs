//! ProxyHub 共通ライブラリ
//!
//! サーバー本体とテストで共有する型・エラー・プロトコル定義

#![warn(missing_docs)]

/// 設定構造体
pub mod config;

/// エラー型
pub mod error;

/// REST APIのリクエスト/レスポンス型
pub mod protocol;

/// コアデータ型
pub mod types;
