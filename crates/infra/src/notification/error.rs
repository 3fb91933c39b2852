//! # メール送信の内部エラー
//!
//! 送信処理で発生したエラーを、原因チェーンを保ったまま表現する。
//!
//! ## 構造
//!
//! `std::io::Error` と同じ struct + enum パターンを採用:
//! - [`TransportError`]: エラー種別（[`TransportErrorKind`]）と [`SpanTrace`] を保持するラッパー
//! - [`TransportErrorKind`]: エラーの具体的な種別（ポート不正、アドレス不正、SMTP 失敗など）
//!
//! このエラーはログ出力専用で、呼び出し元には `DeliveryError` だけが返る。

use std::{fmt, num::ParseIntError};

use derive_more::Display;
use lettre::{address::AddressError, transport::smtp};
use thiserror::Error;
use tracing_error::SpanTrace;

/// メール送信処理で発生するエラー
///
/// `From` 実装や convenience constructor でエラーを生成すると、
/// その時点のスパン情報が自動的にキャプチャされる。
#[derive(Display)]
#[display("{kind}")]
pub struct TransportError {
    kind:       TransportErrorKind,
    span_trace: SpanTrace,
}

/// メール送信エラーの種別
#[derive(Debug, Error)]
pub enum TransportErrorKind {
    /// `EMAIL_PORT` がポート番号として解釈できない
    #[error("SMTP ポート番号が不正です: {value:?}")]
    InvalidPort {
        value:  String,
        #[source]
        source: ParseIntError,
    },

    /// `EMAIL_FROM` が未設定
    #[error("送信元アドレス（EMAIL_FROM）が設定されていません")]
    MissingSender,

    /// 送信元または宛先のアドレスが解釈できない
    #[error("メールアドレスが不正です: {address:?}")]
    InvalidAddress {
        address: String,
        #[source]
        source:  AddressError,
    },

    /// メッセージの組み立てに失敗
    #[error("メッセージ構築失敗: {0}")]
    Build(#[source] lettre::error::Error),

    /// TLS パラメータの構築に失敗
    #[error("TLS 設定失敗: {0}")]
    Tls(#[source] smtp::Error),

    /// SMTP サーバーとの通信に失敗（接続・認証・宛先拒否など）
    #[error("SMTP 送信失敗: {0}")]
    Smtp(#[source] smtp::Error),

    /// トランスポートが送信を拒否した
    #[error("送信が拒否されました: {0}")]
    Rejected(String),
}

// ===== TransportError のメソッド =====

impl TransportError {
    /// エラー種別を取得する
    pub fn kind(&self) -> &TransportErrorKind {
        &self.kind
    }

    /// SpanTrace を取得する
    pub fn span_trace(&self) -> &SpanTrace {
        &self.span_trace
    }

    // ===== Convenience constructors =====

    pub fn invalid_port(value: impl Into<String>, source: ParseIntError) -> Self {
        Self::capture(TransportErrorKind::InvalidPort {
            value: value.into(),
            source,
        })
    }

    pub fn missing_sender() -> Self {
        Self::capture(TransportErrorKind::MissingSender)
    }

    pub fn invalid_address(address: impl Into<String>, source: AddressError) -> Self {
        Self::capture(TransportErrorKind::InvalidAddress {
            address: address.into(),
            source,
        })
    }

    pub fn tls(source: smtp::Error) -> Self {
        Self::capture(TransportErrorKind::Tls(source))
    }

    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::capture(TransportErrorKind::Rejected(reason.into()))
    }

    fn capture(kind: TransportErrorKind) -> Self {
        Self {
            kind,
            span_trace: SpanTrace::capture(),
        }
    }
}

// ===== trait 実装 =====

impl fmt::Debug for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportError")
            .field("kind", &self.kind)
            .field("span_trace", &self.span_trace)
            .finish()
    }
}

impl std::error::Error for TransportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.kind.source()
    }
}

// ===== From 実装（SpanTrace 自動キャプチャ） =====

impl From<lettre::error::Error> for TransportError {
    fn from(source: lettre::error::Error) -> Self {
        Self::capture(TransportErrorKind::Build(source))
    }
}

impl From<smtp::Error> for TransportError {
    fn from(source: smtp::Error) -> Self {
        Self::capture(TransportErrorKind::Smtp(source))
    }
}
