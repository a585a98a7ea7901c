//! ブラウザ版の設定
//!
//! ページURLのクエリで上書きできる:
//! - `api=<url>`: APIのベースURL（既定は同一オリジン）
//! - `demo=off`: 単一ファイルの通信失敗時にデモ結果を出さない

use invoice_extract_common::FlowConfig;
use url::form_urlencoded;

/// クエリ文字列（先頭の `?` は任意）から設定を作る
///
/// 値はパーセントデコードしてから使う（`api=http%3A%2F%2Fhost` も可）。
pub fn config_from_query(search: &str) -> FlowConfig {
    let query = search.strip_prefix('?').unwrap_or(search);
    config_from_pairs(form_urlencoded::parse(query.as_bytes()))
}

/// デコード済みのキーと値の組から設定を作る
pub fn config_from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> FlowConfig
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut config = FlowConfig::default();
    for (key, value) in pairs {
        let value = value.as_ref().trim();
        match key.as_ref() {
            "api" => config.api_base = value.to_string(),
            "demo" => {
                config.demo_fallback = !matches!(value, "off" | "0" | "false" | "no");
            }
            _ => {}
        }
    }
    config
}

/// 現在のページURLから設定を読む
pub fn load_config() -> FlowConfig {
    let search = web_sys::window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default();
    config_from_query(&search)
}
