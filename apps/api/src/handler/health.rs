//! # ヘルスチェックハンドラ
//!
//! アプリケーションの稼働状態を確認するためのエンドポイント。
//!
//! ```text
//! GET /health
//! ```
//!
//! ## レスポンス例
//!
//! ```json
//! {
//!   "status": "healthy",
//!   "version": "0.1.0"
//! }
//! ```

use axum::Json;
use medhelm_shared::HealthResponse;

/// ヘルスチェックエンドポイント
///
/// データストアやメールサーバーへの接続は確認せず、アプリケーション自体の
/// 起動状態のみを返す。常に 200 OK。
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy(env!("CARGO_PKG_VERSION")))
}
