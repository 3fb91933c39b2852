//! # SMTP 設定
//!
//! メール送信に使う SMTP 接続設定を環境変数から読み込む。
//!
//! ## 環境変数一覧
//!
//! | 変数名 | デフォルト | 説明 |
//! |--------|------------|------|
//! | `EMAIL_HOST` | `localhost` | SMTP サーバーのホスト名 |
//! | `EMAIL_PORT` | `465`（secure）/ `587` | SMTP サーバーのポート番号 |
//! | `EMAIL_SECURE` | - | 文字列 `"true"` のときのみ暗号化接続（TLS）を使う |
//! | `EMAIL_USER` | - | 認証ユーザー名（未設定なら認証しない） |
//! | `EMAIL_PASS` | - | 認証パスワード |
//! | `EMAIL_FROM` | - | 送信元アドレス（未設定なら送信は失敗する） |
//!
//! 値の検証は行わない。ポート番号は接続時に初めて解釈する。

use std::fmt;

use medhelm_shared::env::{EnvSource, non_empty};

use super::TransportError;

/// `EMAIL_HOST` 未設定時のホスト
pub const DEFAULT_HOST: &str = "localhost";
/// 暗号化接続時の既定ポート（SMTPS）
pub const DEFAULT_SECURE_PORT: u16 = 465;
/// 平文接続（STARTTLS 可）時の既定ポート（Submission）
pub const DEFAULT_PORT: u16 = 587;

/// SMTP 接続設定
///
/// 送信のたびに [`SmtpSettings::load`] で読み直す。キャッシュしない。
#[derive(Clone, PartialEq, Eq)]
pub struct SmtpSettings {
    /// SMTP ホスト
    pub host:     String,
    /// SMTP ポート（未解釈の文字列）
    pub port:     Option<String>,
    /// 暗号化接続を使うか
    pub secure:   bool,
    /// 認証ユーザー名
    pub user:     Option<String>,
    /// 認証パスワード
    pub password: Option<String>,
    /// 送信元アドレス
    pub from:     Option<String>,
}

impl SmtpSettings {
    /// 環境から SMTP 設定を読み込む
    ///
    /// 失敗しない。空文字列は未設定として扱う。
    pub fn load(env: &(impl EnvSource + ?Sized)) -> Self {
        Self {
            host:     non_empty(env, "EMAIL_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port:     non_empty(env, "EMAIL_PORT"),
            secure:   is_secure(env.get("EMAIL_SECURE").as_deref()),
            user:     non_empty(env, "EMAIL_USER"),
            password: non_empty(env, "EMAIL_PASS"),
            from:     non_empty(env, "EMAIL_FROM"),
        }
    }

    /// 接続先ポートを決定する
    ///
    /// `EMAIL_PORT` が設定されていればそれを解釈し、未設定なら
    /// `secure` に応じた既定ポートを返す。
    pub fn resolve_port(&self) -> Result<u16, TransportError> {
        match &self.port {
            Some(raw) => raw
                .parse()
                .map_err(|e| TransportError::invalid_port(raw.as_str(), e)),
            None if self.secure => Ok(DEFAULT_SECURE_PORT),
            None => Ok(DEFAULT_PORT),
        }
    }
}

/// `EMAIL_SECURE` の判定
///
/// 完全一致の `"true"` のみ有効。`"True"` や `"1"` は無効として扱う。
fn is_secure(value: Option<&str>) -> bool {
    value == Some("true")
}

impl fmt::Debug for SmtpSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("secure", &self.secure)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("from", &self.from)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::TransportErrorKind;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_全項目が設定されている場合はそのまま読み込む() {
        let settings = SmtpSettings::load(&env(&[
            ("EMAIL_HOST", "smtp.example.com"),
            ("EMAIL_PORT", "2525"),
            ("EMAIL_SECURE", "true"),
            ("EMAIL_USER", "mailer"),
            ("EMAIL_PASS", "p@ss"),
            ("EMAIL_FROM", "MedHelm <noreply@medhelm.example.com>"),
        ]));

        assert_eq!(
            settings,
            SmtpSettings {
                host:     "smtp.example.com".to_string(),
                port:     Some("2525".to_string()),
                secure:   true,
                user:     Some("mailer".to_string()),
                password: Some("p@ss".to_string()),
                from:     Some("MedHelm <noreply@medhelm.example.com>".to_string()),
            }
        );
    }

    #[test]
    fn test_未設定の場合はホストのみデフォルトになる() {
        let settings = SmtpSettings::load(&env(&[]));

        assert_eq!(settings.host, DEFAULT_HOST);
        assert_eq!(settings.port, None);
        assert!(!settings.secure);
        assert_eq!(settings.user, None);
        assert_eq!(settings.password, None);
        assert_eq!(settings.from, None);
    }

    #[rstest]
    #[case::完全一致のtrue(Some("true"), true)]
    #[case::先頭大文字(Some("True"), false)]
    #[case::全て大文字(Some("TRUE"), false)]
    #[case::数値の1(Some("1"), false)]
    #[case::yes(Some("yes"), false)]
    #[case::空文字列(Some(""), false)]
    #[case::前後に空白(Some(" true "), false)]
    #[case::未設定(None, false)]
    fn test_email_secureは完全一致のtrueのみ有効(
        #[case] value: Option<&str>,
        #[case] expected: bool,
    ) {
        let vars = match value {
            Some(v) => env(&[("EMAIL_SECURE", v)]),
            None => env(&[]),
        };

        assert_eq!(SmtpSettings::load(&vars).secure, expected);
    }

    #[rstest]
    #[case::明示的なポート(Some("2525"), false, 2525)]
    #[case::secureの既定値(None, true, DEFAULT_SECURE_PORT)]
    #[case::非secureの既定値(None, false, DEFAULT_PORT)]
    fn test_resolve_portは設定値か既定値を返す(
        #[case] port: Option<&str>,
        #[case] secure: bool,
        #[case] expected: u16,
    ) {
        let settings = SmtpSettings {
            port: port.map(str::to_string),
            secure,
            ..SmtpSettings::load(&env(&[]))
        };

        assert_eq!(settings.resolve_port().unwrap(), expected);
    }

    #[rstest]
    #[case::数値でない("smtp")]
    #[case::範囲外("70000")]
    #[case::負数("-25")]
    fn test_resolve_portは不正な値でエラーを返す(#[case] port: &str) {
        let settings = SmtpSettings::load(&env(&[("EMAIL_PORT", port)]));

        let err = settings.resolve_port().unwrap_err();
        assert!(matches!(
            err.kind(),
            TransportErrorKind::InvalidPort { value, .. } if value == port
        ));
    }

    #[test]
    fn test_debug出力でパスワードを伏せる() {
        let settings = SmtpSettings::load(&env(&[("EMAIL_PASS", "hunter2")]));

        let debug = format!("{settings:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("***"));
    }
}
