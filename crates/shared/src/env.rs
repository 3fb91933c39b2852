//! # 環境変数ソース
//!
//! 設定値の読み込み元を抽象化する。
//!
//! ## 設計方針
//!
//! - **明示的な依存注入**: 設定を読む側は `std::env` を直接参照せず、[`EnvSource`] を受け取る
//! - **テスト容易性**: テストでは `HashMap` を渡し、プロセスの環境変数を書き換えない
//! - **空文字列は未設定扱い**: [`non_empty`] で「値があり、かつ空でない」場合のみ採用する
//!
//! ## 使用例
//!
//! ```
//! use std::collections::HashMap;
//!
//! use medhelm_shared::env::{non_empty, or_default};
//!
//! let mut vars = HashMap::new();
//! vars.insert("PORT".to_string(), "8080".to_string());
//! vars.insert("NODE_ENV".to_string(), String::new());
//!
//! assert_eq!(non_empty(&vars, "PORT").as_deref(), Some("8080"));
//! assert_eq!(non_empty(&vars, "NODE_ENV"), None);
//! assert_eq!(or_default(&vars, "NODE_ENV", "development"), "development");
//! ```

use std::collections::HashMap;

/// 環境変数の読み込み元
///
/// 本番では [`ProcessEnv`]、テストでは `HashMap<String, String>` を使う。
pub trait EnvSource: Send + Sync {
    /// キーに対応する値を返す（未設定なら `None`）
    fn get(&self, key: &str) -> Option<String>;
}

/// プロセスの環境変数
///
/// Unicode として解釈できない値は未設定として扱う。
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

/// 値が存在し、かつ空文字列でない場合のみ返す
///
/// 値はトリムや大文字小文字の変換を行わず、そのまま返す。
pub fn non_empty(source: &(impl EnvSource + ?Sized), key: &str) -> Option<String> {
    source.get(key).filter(|value| !value.is_empty())
}

/// 値が存在し空でなければそれを、そうでなければ `default` を返す
pub fn or_default(source: &(impl EnvSource + ?Sized), key: &str, default: &str) -> String {
    non_empty(source, key).unwrap_or_else(|| default.to_string())
}
