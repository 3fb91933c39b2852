//! # アプリケーション設定
//!
//! 環境変数からアプリケーション設定を読み込む。
//!
//! ## 設計方針
//!
//! [12-Factor App](https://12factor.net/ja/config) の原則に従い、
//! すべての設定を環境変数から読み込む。
//!
//! - 未設定または空文字列の項目はデフォルト値で補う。読み込みは失敗しない
//! - 値の検証や型変換は行わない。`PORT` も文字列のまま保持し、
//!   リッスンアドレスを決めるとき（[`AppConfig::listen_addr`]）に初めて解釈する
//! - 起動時に一度だけ構築し、必要なコンポーネントへ明示的に渡す
//!
//! ## 環境変数一覧
//!
//! | 変数名 | デフォルト | 説明 |
//! |--------|------------|------|
//! | `JWT_SECRET` | `secret` | 認証トークンの署名鍵 |
//! | `JWT_EXPIRES_IN` | `7d` | 認証トークンの有効期間（期間表現の文字列） |
//! | `MONGO_URI` | `mongodb://localhost:27017/medhelm` | データストア接続 URI |
//! | `PORT` | `5000` | HTTP サーバーのポート番号 |
//! | `NODE_ENV` | `development` | 実行環境（development/production など） |
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use medhelm_api::config::AppConfig;
//!
//! // .env ファイルから読み込み（開発環境）
//! dotenvy::dotenv().ok();
//!
//! let config = AppConfig::from_env();
//! let addr = config.listen_addr()?;
//! ```

use std::{
    fmt,
    net::{Ipv4Addr, SocketAddr},
    num::ParseIntError,
};

use medhelm_shared::env::{EnvSource, ProcessEnv, or_default};
use thiserror::Error;

/// `JWT_SECRET` のデフォルト値
pub const DEFAULT_JWT_SECRET: &str = "secret";
/// `JWT_EXPIRES_IN` のデフォルト値
pub const DEFAULT_JWT_EXPIRES_IN: &str = "7d";
/// `MONGO_URI` のデフォルト値
pub const DEFAULT_MONGO_URI: &str = "mongodb://localhost:27017/medhelm";
/// `PORT` のデフォルト値
pub const DEFAULT_PORT: &str = "5000";
/// `NODE_ENV` のデフォルト値
pub const DEFAULT_ENVIRONMENT: &str = "development";

/// 設定値の利用時に発生するエラー
///
/// 読み込み時には発生しない。値を解釈する時点で初めて検出される。
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `PORT` がポート番号として解釈できない
    #[error("PORT は有効なポート番号である必要があります: {value:?}")]
    InvalidPort {
        value:  String,
        #[source]
        source: ParseIntError,
    },
}

/// アプリケーション全体の設定
///
/// すべてのフィールドは必ず値を持つ。構築後は変更しない。
#[derive(Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// 認証トークンの署名鍵
    pub jwt_secret:     String,
    /// 認証トークンの有効期間（例: `7d`）
    pub jwt_expires_in: String,
    /// データストア接続 URI
    pub mongo_uri:      String,
    /// HTTP サーバーのポート番号（未解釈の文字列）
    pub port:           String,
    /// 実行環境（`development`, `production` など）
    pub environment:    String,
}

impl AppConfig {
    /// プロセスの環境変数から設定を読み込む
    pub fn from_env() -> Self {
        Self::load(&ProcessEnv)
    }

    /// 指定した環境ソースから設定を読み込む
    ///
    /// 同じ環境に対して何度呼び出しても同じ結果を返す。
    pub fn load(env: &(impl EnvSource + ?Sized)) -> Self {
        Self {
            jwt_secret:     or_default(env, "JWT_SECRET", DEFAULT_JWT_SECRET),
            jwt_expires_in: or_default(env, "JWT_EXPIRES_IN", DEFAULT_JWT_EXPIRES_IN),
            mongo_uri:      or_default(env, "MONGO_URI", DEFAULT_MONGO_URI),
            port:           or_default(env, "PORT", DEFAULT_PORT),
            environment:    or_default(env, "NODE_ENV", DEFAULT_ENVIRONMENT),
        }
    }

    /// 本番環境かどうか
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// HTTP サーバーのリッスンアドレス（全インターフェース）を返す
    ///
    /// `PORT` はここで初めてポート番号として解釈する。
    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        let port: u16 = self
            .port
            .parse()
            .map_err(|source| ConfigError::InvalidPort {
                value: self.port.clone(),
                source,
            })?;

        Ok(SocketAddr::from((Ipv4Addr::UNSPECIFIED, port)))
    }
}

impl fmt::Debug for AppConfig {
    /// 署名鍵はログに出さない
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("jwt_secret", &"***")
            .field("jwt_expires_in", &self.jwt_expires_in)
            .field("mongo_uri", &self.mongo_uri)
            .field("port", &self.port)
            .field("environment", &self.environment)
            .finish()
    }
}
