//! # 通知
//!
//! メール通知に関するドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **検証しない**: 宛先・件名・本文はそのまま送信層へ渡す。不正な値は送信層が拒否する
//! - **公開エラーは不透明**: [`DeliveryError`] は原因を持たない。原因の詳細はインフラ層の
//!   内部エラーとしてログにのみ出力される
//!
//! → 送信処理: `medhelm_infra::notification::NotificationDispatcher`

use thiserror::Error;

/// メールメッセージ
///
/// 1 回の送信呼び出しのためだけに生成され、送信後に破棄される。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    /// 送信先メールアドレス
    pub to:        String,
    /// 件名
    pub subject:   String,
    /// HTML 本文
    pub html_body: String,
}

impl EmailMessage {
    /// 新しいメッセージを作成する
    pub fn new(
        to: impl Into<String>,
        subject: impl Into<String>,
        html_body: impl Into<String>,
    ) -> Self {
        Self {
            to:        to.into(),
            subject:   subject.into(),
            html_body: html_body.into(),
        }
    }
}

/// メール送信エラー（呼び出し元向け）
///
/// 接続失敗・認証失敗・宛先拒否などの区別を持たない。
/// 原因を知りたい場合はログを参照する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Email could not be sent")]
pub struct DeliveryError;
