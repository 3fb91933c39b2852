//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ```text
//! handler.rs          # 親モジュール（re-export）
//! └── handler/
//!     └── health.rs   # ヘルスチェックハンドラ
//! ```

pub mod health;

pub use health::health_check;
