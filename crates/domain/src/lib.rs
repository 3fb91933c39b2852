//! # MedHelm ドメイン層
//!
//! インフラに依存しない値オブジェクトとエラー型を定義する。
//!
//! ## モジュール構成
//!
//! - [`notification`] - メール通知のメッセージと、呼び出し元に公開する送信エラー

pub mod notification;
