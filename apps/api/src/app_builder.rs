//! # アプリケーション構築
//!
//! ルーター構築を担当する。
//! `main.rs` は設定読み込みとサーバー起動に集中する。

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::handler::health_check;

/// ルーターを構築する
///
/// `TraceLayer` により、すべての HTTP リクエストがトレーシングされる。
pub fn build_app() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
}
