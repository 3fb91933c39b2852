//! # MedHelm インフラ層
//!
//! 外部システムとの接続・通信を担当するインフラストラクチャ層。
//!
//! ## 設計方針
//!
//! 外部システムの詳細（SMTP サーバー、TLS、認証情報）をカプセル化し、
//! 呼び出し元にはドメイン層の型（`EmailMessage`, `DeliveryError`）だけを見せる。
//!
//! ## 依存関係
//!
//! ```text
//! api → infra → domain
//!          ↘
//!            shared
//! ```
//!
//! ## モジュール構成
//!
//! - [`notification`] - メール送信（設定読み込み、SMTP トランスポート、ディスパッチャ）
//! - `mock` - テスト用トランスポート（`test-utils` feature）

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod notification;

pub use notification::{NotificationDispatcher, TransportError, TransportErrorKind};
