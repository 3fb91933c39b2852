//! # MedHelm API サーバー
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `PORT` | No | ポート番号（デフォルト: `5000`） |
//! | `NODE_ENV` | No | 実行環境（デフォルト: `development`） |
//! | `LOG_FORMAT` | No | `json` / `pretty`（デフォルト: `pretty`） |
//! | `RUST_LOG` | No | ログレベル（デフォルト: `info,medhelm=debug`） |
//!
//! その他の設定項目は [`medhelm_api::config`] を参照。
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境（.env ファイルを使用）
//! cargo run -p medhelm-api
//!
//! # 本番環境
//! NODE_ENV=production PORT=8080 LOG_FORMAT=json cargo run -p medhelm-api --release
//! ```

use anyhow::Context as _;
use medhelm_api::{app_builder::build_app, config::AppConfig};
use medhelm_shared::observability::{TracingConfig, init_tracing};
use tokio::net::TcpListener;

/// API サーバーのエントリーポイント
///
/// 以下の順序で初期化を行う:
///
/// 1. 環境変数の読み込み（.env ファイル）
/// 2. トレーシングの初期化
/// 3. アプリケーション設定の読み込み
/// 4. リッスンアドレスの決定（`PORT` の解釈）
/// 5. HTTP サーバーの起動
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    let tracing_config = TracingConfig::from_env("medhelm-api");
    init_tracing(&tracing_config);

    let config = AppConfig::from_env();
    tracing::info!(
        service = %tracing_config.service_name,
        environment = %config.environment,
        production = config.is_production(),
        "API サーバーを起動します"
    );

    let addr = config
        .listen_addr()
        .context("リッスンアドレスの決定に失敗しました")?;

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("API サーバーが起動しました: {}", addr);

    axum::serve(listener, build_app()).await?;

    Ok(())
}
