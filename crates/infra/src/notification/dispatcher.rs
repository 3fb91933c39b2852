//! # 通知ディスパッチャ
//!
//! 「宛先・件名・HTML 本文」を受け取り、1 通のメールを送信する。
//!
//! ## 設計方針
//!
//! - **1 回だけ試行**: リトライ・キューイング・バッチ送信は行わない
//! - **設定は毎回読み直す**: `EMAIL_*` は送信ごとに [`EnvSource`] から読み込み、
//!   トランスポートも毎回生成する。並行呼び出し間で共有する可変状態はない
//! - **詳細はログ、呼び出し元には最小限**: 失敗時は [`TransportError`] の全情報を
//!   ログに出力し、呼び出し元には [`DeliveryError`] だけを返す

use std::sync::Arc;

use medhelm_domain::notification::{DeliveryError, EmailMessage};
use medhelm_shared::env::EnvSource;

use super::{OutgoingMail, SmtpSettings, TransportError, TransportFactory};

/// 通知ディスパッチャ
///
/// 状態を持たないため、`Arc` で包んで複数タスクから同時に呼び出してよい。
///
/// ```rust,ignore
/// use medhelm_infra::notification::{NotificationDispatcher, SmtpTransportFactory};
/// use medhelm_shared::ProcessEnv;
///
/// let dispatcher = NotificationDispatcher::new(Arc::new(ProcessEnv), Arc::new(SmtpTransportFactory));
/// dispatcher.send_notification("a@example.com", "Hi", "<p>hi</p>").await?;
/// ```
#[derive(Clone)]
pub struct NotificationDispatcher {
    env:     Arc<dyn EnvSource>,
    factory: Arc<dyn TransportFactory>,
}

impl NotificationDispatcher {
    pub fn new(env: Arc<dyn EnvSource>, factory: Arc<dyn TransportFactory>) -> Self {
        Self { env, factory }
    }

    /// メールを 1 通送信する
    ///
    /// 送信先サーバーがメッセージを受け付けた時点で `Ok(())` を返す。
    /// 失敗理由（接続・認証・宛先拒否など）は区別せず、すべて [`DeliveryError`] になる。
    #[tracing::instrument(skip_all, fields(%to))]
    pub async fn send_notification(
        &self,
        to: &str,
        subject: &str,
        html_body: &str,
    ) -> Result<(), DeliveryError> {
        let message = EmailMessage::new(to, subject, html_body);

        match self.dispatch(&message).await {
            Ok(()) => {
                tracing::info!(subject = %message.subject, "メール送信成功");
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = ?e, subject = %message.subject, "メール送信失敗");
                Err(DeliveryError)
            }
        }
    }

    /// `EMAIL_FROM` 未設定時はサーバーに接続せず失敗する（lettre の `Message` は From を必須とするため）
    async fn dispatch(&self, message: &EmailMessage) -> Result<(), TransportError> {
        let settings = SmtpSettings::load(self.env.as_ref());
        let from = settings
            .from
            .clone()
            .ok_or_else(TransportError::missing_sender)?;

        let transport = self.factory.create(&settings)?;
        let mail = OutgoingMail {
            from,
            to: message.to.clone(),
            subject: message.subject.clone(),
            html_body: message.html_body.clone(),
        };

        transport.send(&mail).await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::mock::{RecordingTransportFactory, RejectingTransportFactory};

    fn env(pairs: &[(&str, &str)]) -> Arc<dyn EnvSource> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Arc::new(vars)
    }

    #[tokio::test]
    async fn test_送信成功時はメッセージが1通だけ記録される() {
        let factory = RecordingTransportFactory::new();
        let sut = NotificationDispatcher::new(
            env(&[("EMAIL_FROM", "noreply@medhelm.example.com")]),
            Arc::new(factory.clone()),
        );

        sut.send_notification("a@example.com", "Hi", "<p>hi</p>")
            .await
            .unwrap();

        assert_eq!(
            factory.sent(),
            vec![OutgoingMail {
                from:      "noreply@medhelm.example.com".to_string(),
                to:        "a@example.com".to_string(),
                subject:   "Hi".to_string(),
                html_body: "<p>hi</p>".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_送信元未設定ではトランスポートを作らずに失敗する() {
        let factory = RecordingTransportFactory::new();
        let sut = NotificationDispatcher::new(env(&[]), Arc::new(factory.clone()));

        let result = sut.send_notification("a@example.com", "Hi", "<p>hi</p>").await;

        assert_eq!(result, Err(DeliveryError));
        assert!(factory.created_with().is_empty());
    }

    #[tokio::test]
    async fn test_拒否された場合は固定文言のエラーを返す() {
        let sut = NotificationDispatcher::new(
            env(&[("EMAIL_FROM", "noreply@medhelm.example.com")]),
            Arc::new(RejectingTransportFactory::new("535 authentication failed")),
        );

        let err = sut
            .send_notification("a@example.com", "Hi", "<p>hi</p>")
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Email could not be sent");
    }
}
