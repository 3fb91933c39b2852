//! # 通知送信
//!
//! メール通知の送信を担当するインフラストラクチャモジュール。
//!
//! ## 設計方針
//!
//! - **trait による抽象化**: [`MailTransport`] でメール送信を、[`TransportFactory`] で
//!   トランスポートの生成を抽象化する
//! - **呼び出しごとに生成**: SMTP 設定は送信のたびに環境から読み直し、トランスポートも
//!   毎回生成する。呼び出し間で共有される可変状態はない
//! - **エラー境界**: 内部では [`TransportError`]（原因チェーン + SpanTrace）を扱い、
//!   [`NotificationDispatcher`] が呼び出し元向けの `DeliveryError` に変換する

mod dispatcher;
mod error;
mod settings;
mod smtp;

use async_trait::async_trait;
pub use dispatcher::NotificationDispatcher;
pub use error::{TransportError, TransportErrorKind};
pub use settings::SmtpSettings;
pub use smtp::{SmtpMailTransport, SmtpTransportFactory};

/// 送信元・宛先が確定した送信用メッセージ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    /// 送信元（`EMAIL_FROM`）
    pub from:      String,
    /// 送信先
    pub to:        String,
    /// 件名
    pub subject:   String,
    /// HTML 本文
    pub html_body: String,
}

/// メール送信トレイト
///
/// 1 回の呼び出しで 1 回だけ送信を試みる。リトライはしない。
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// メールを送信する
    ///
    /// `Ok` は送信先サーバーがメッセージを受け付けたことを意味し、配達完了は保証しない。
    async fn send(&self, mail: &OutgoingMail) -> Result<(), TransportError>;
}

/// トランスポート生成トレイト
///
/// 送信のたびに、その時点の [`SmtpSettings`] から新しいトランスポートを作る。
pub trait TransportFactory: Send + Sync {
    /// 設定からトランスポートを生成する
    fn create(&self, settings: &SmtpSettings) -> Result<Box<dyn MailTransport>, TransportError>;
}
