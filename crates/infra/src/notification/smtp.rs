//! SMTP 通知送信実装
//!
//! lettre の `AsyncSmtpTransport` を使用してメールを送信する。
//!
//! - `EMAIL_SECURE=true`: 接続直後から TLS（SMTPS, 既定ポート 465）
//! - それ以外: 平文で接続し、サーバーが対応していれば STARTTLS に昇格する

use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport,
    AsyncTransport,
    Tokio1Executor,
    message::{Mailbox, Mailboxes, Message, header::ContentType},
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
};

use super::{MailTransport, OutgoingMail, SmtpSettings, TransportError, TransportFactory};

/// SMTP 通知送信
///
/// `lettre::AsyncSmtpTransport<Tokio1Executor>` をラップする。
/// 接続はコネクションプールを使わず、送信ごとに確立される。
pub struct SmtpMailTransport {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailTransport {
    /// SMTP 設定からトランスポートを作成する
    ///
    /// この時点ではサーバーに接続しない。ポート番号の解釈と TLS パラメータの
    /// 構築に失敗した場合はエラーを返す。
    pub fn new(settings: &SmtpSettings) -> Result<Self, TransportError> {
        let port = settings.resolve_port()?;
        let tls_parameters =
            TlsParameters::new(settings.host.clone()).map_err(TransportError::tls)?;
        let tls = if settings.secure {
            Tls::Wrapper(tls_parameters)
        } else {
            Tls::Opportunistic(tls_parameters)
        };

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&settings.host)
            .port(port)
            .tls(tls);

        // EMAIL_USER が無ければ認証なしで送信する
        if let Some(user) = &settings.user {
            builder = builder.credentials(Credentials::new(
                user.clone(),
                settings.password.clone().unwrap_or_default(),
            ));
        }

        Ok(Self {
            transport: builder.build(),
        })
    }
}

#[async_trait]
impl MailTransport for SmtpMailTransport {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), TransportError> {
        let from: Mailbox = mail
            .from
            .parse()
            .map_err(|e| TransportError::invalid_address(mail.from.as_str(), e))?;
        // 宛先はカンマ区切りの複数指定を許容する
        let recipients: Mailboxes = mail
            .to
            .parse()
            .map_err(|e| TransportError::invalid_address(mail.to.as_str(), e))?;

        let mut builder = Message::builder().from(from);
        for recipient in recipients {
            builder = builder.to(recipient);
        }

        let message = builder
            .subject(mail.subject.as_str())
            .header(ContentType::TEXT_HTML)
            .body(mail.html_body.clone())?;

        self.transport.send(message).await?;

        Ok(())
    }
}

/// [`SmtpMailTransport`] を生成するファクトリ
#[derive(Debug, Clone, Copy, Default)]
pub struct SmtpTransportFactory;

impl TransportFactory for SmtpTransportFactory {
    fn create(&self, settings: &SmtpSettings) -> Result<Box<dyn MailTransport>, TransportError> {
        Ok(Box::new(SmtpMailTransport::new(settings)?))
    }
}
