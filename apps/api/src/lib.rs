//! # MedHelm API サーバー
//!
//! EC バックエンドの HTTP サーバー。
//!
//! ## モジュール構成
//!
//! - [`config`] - アプリケーション設定（環境変数からの読み込み）
//! - [`handler`] - HTTP リクエストハンドラ
//! - [`app_builder`] - ルーター構築
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use medhelm_api::{app_builder::build_app, config::AppConfig};
//!
//! let config = AppConfig::from_env();
//! let listener = tokio::net::TcpListener::bind(config.listen_addr()?).await?;
//! axum::serve(listener, build_app()).await?;
//! ```

pub mod app_builder;
pub mod config;
pub mod handler;
