//! # 統合テスト共通ユーティリティ
//!
//! ローカルで待ち受ける最小限の SMTP サーバーを提供する。
//! 1 接続だけ受け付け、受信したコマンドと DATA 本文を記録して返す。
//! TLS・STARTTLS には対応しない（EHLO でも広告しない）。

#![allow(dead_code)]

use std::net::SocketAddr;

use tokio::{
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader},
    net::{TcpListener, TcpStream},
    task::JoinHandle,
};

/// SMTP セッションで受信した内容
#[derive(Debug, Default)]
pub struct SmtpSession {
    /// DATA 本文以外で受信したコマンド行（改行なし）
    pub commands:   Vec<String>,
    /// DATA 本文の各行（終端の `.` を含まない）
    pub data_lines: Vec<String>,
}

impl SmtpSession {
    pub fn has_command(&self, prefix: &str) -> bool {
        self.commands.iter().any(|line| line.starts_with(prefix))
    }
}

/// 起動済みのテスト用 SMTP サーバー
pub struct SmtpServer {
    pub addr: SocketAddr,
    session:  JoinHandle<SmtpSession>,
}

impl SmtpServer {
    /// `127.0.0.1` の空きポートで待ち受けを開始する
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let session = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            serve(stream).await
        });
        Self { addr, session }
    }

    pub fn port(&self) -> String {
        self.addr.port().to_string()
    }

    /// クライアントが切断するまで待ち、受信内容を返す
    pub async fn finish(self) -> SmtpSession {
        self.session.await.unwrap()
    }
}

async fn serve(stream: TcpStream) -> SmtpSession {
    let mut session = SmtpSession::default();
    let mut reader = BufReader::new(stream);

    if reply(&mut reader, "220 stub.local ESMTP").await.is_err() {
        return session;
    }

    let mut in_data = false;
    loop {
        let mut raw = Vec::new();
        match reader.read_until(b'\n', &mut raw).await {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let line = String::from_utf8_lossy(&raw)
            .trim_end_matches(['\r', '\n'])
            .to_string();

        if in_data {
            if line == "." {
                in_data = false;
                if reply(&mut reader, "250 2.0.0 queued").await.is_err() {
                    break;
                }
            } else {
                session.data_lines.push(line);
            }
            continue;
        }

        let verb = line.to_ascii_uppercase();
        let response = if verb.starts_with("EHLO") {
            "250-stub.local\r\n250-AUTH PLAIN LOGIN\r\n250 8BITMIME"
        } else if verb.starts_with("AUTH") {
            "235 2.7.0 authenticated"
        } else if verb.starts_with("DATA") {
            in_data = true;
            "354 end data with <CR><LF>.<CR><LF>"
        } else if verb.starts_with("QUIT") {
            "221 2.0.0 bye"
        } else {
            "250 2.0.0 OK"
        };
        session.commands.push(line);

        if reply(&mut reader, response).await.is_err() || verb.starts_with("QUIT") {
            break;
        }
    }

    session
}

async fn reply(reader: &mut BufReader<TcpStream>, response: &str) -> std::io::Result<()> {
    let stream = reader.get_mut();
    stream.write_all(response.as_bytes()).await?;
    stream.write_all(b"\r\n").await?;
    stream.flush().await
}
