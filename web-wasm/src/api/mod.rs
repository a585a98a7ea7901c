//! 抽出APIクライアント（fetch）

pub mod extract;

use invoice_extract_common::Error;
use wasm_bindgen::{JsCast, JsValue};

/// JsValue のエラーを共通エラーへ
pub(crate) fn js_error(value: JsValue) -> Error {
    let message = value
        .as_string()
        .or_else(|| value.dyn_ref::<js_sys::Error>().map(|e| String::from(e.message())))
        .unwrap_or_else(|| format!("{:?}", value));
    Error::Transport(message)
}
