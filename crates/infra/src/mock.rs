//! # テスト用モックトランスポート
//!
//! ディスパッチャのテストで使用するインメモリのトランスポート。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! medhelm-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::notification::{
    MailTransport,
    OutgoingMail,
    SmtpSettings,
    TransportError,
    TransportFactory,
};

// ===== RecordingTransportFactory =====

/// すべてのメッセージを受け付け、内容を記録するファクトリ
///
/// `clone()` したインスタンス同士は記録を共有する。
#[derive(Clone, Default)]
pub struct RecordingTransportFactory {
    created_with: Arc<Mutex<Vec<SmtpSettings>>>,
    sent:         Arc<Mutex<Vec<OutgoingMail>>>,
}

impl RecordingTransportFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// 受け付けたメッセージ（送信順）
    pub fn sent(&self) -> Vec<OutgoingMail> {
        self.sent.lock().unwrap().clone()
    }

    /// トランスポート生成時に渡された設定（生成順）
    pub fn created_with(&self) -> Vec<SmtpSettings> {
        self.created_with.lock().unwrap().clone()
    }
}

impl TransportFactory for RecordingTransportFactory {
    fn create(&self, settings: &SmtpSettings) -> Result<Box<dyn MailTransport>, TransportError> {
        self.created_with.lock().unwrap().push(settings.clone());
        Ok(Box::new(RecordingTransport {
            sent: Arc::clone(&self.sent),
        }))
    }
}

struct RecordingTransport {
    sent: Arc<Mutex<Vec<OutgoingMail>>>,
}

#[async_trait]
impl MailTransport for RecordingTransport {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), TransportError> {
        self.sent.lock().unwrap().push(mail.clone());
        Ok(())
    }
}

// ===== RejectingTransportFactory =====

/// すべての送信を拒否するファクトリ
#[derive(Clone)]
pub struct RejectingTransportFactory {
    reason:   String,
    attempts: Arc<Mutex<usize>>,
}

impl RejectingTransportFactory {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason:   reason.into(),
            attempts: Arc::new(Mutex::new(0)),
        }
    }

    /// 送信が試行された回数
    pub fn attempts(&self) -> usize {
        *self.attempts.lock().unwrap()
    }
}

impl TransportFactory for RejectingTransportFactory {
    fn create(&self, _settings: &SmtpSettings) -> Result<Box<dyn MailTransport>, TransportError> {
        Ok(Box::new(RejectingTransport {
            reason:   self.reason.clone(),
            attempts: Arc::clone(&self.attempts),
        }))
    }
}

struct RejectingTransport {
    reason:   String,
    attempts: Arc<Mutex<usize>>,
}

#[async_trait]
impl MailTransport for RejectingTransport {
    async fn send(&self, _mail: &OutgoingMail) -> Result<(), TransportError> {
        *self.attempts.lock().unwrap() += 1;
        Err(TransportError::rejected(self.reason.as_str()))
    }
}
