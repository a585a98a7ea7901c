//! ブラウザでのファイルダウンロード
//!
//! Blob から object URL を作り、一時的な `<a download>` をクリックして保存させる。

use crate::api::js_error;
use invoice_extract_common::{Error, Result};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, Document, Element, HtmlAnchorElement, HtmlElement, Url};

/// Blob をファイルとして保存
pub fn download_blob(blob: &Blob, filename: &str) -> Result<()> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| Error::Export("document is not available".into()))?;
    let body = document
        .body()
        .ok_or_else(|| Error::Export("document has no body".into()))?;

    let url = Url::create_object_url_with_blob(blob).map_err(js_error)?;
    let clicked = click_anchor(&document, &body, &url, filename);
    // 失敗時も object URL は解放する
    let revoked = Url::revoke_object_url(&url).map_err(js_error);
    clicked.and(revoked)
}

fn click_anchor(document: &Document, body: &HtmlElement, url: &str, filename: &str) -> Result<()> {
    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(js_error)?
        .dyn_into()
        .map_err(|e: Element| js_error(e.into()))?;
    anchor.set_href(url);
    anchor.set_download(filename);

    body.append_child(&anchor).map_err(js_error)?;
    anchor.click();
    body.remove_child(&anchor).map_err(js_error)?;
    Ok(())
}

/// JSON文字列をファイルとして保存
pub fn download_json(filename: &str, json: &str) -> Result<()> {
    let parts = js_sys::Array::of1(&JsValue::from_str(json));
    let options = BlobPropertyBag::new();
    options.set_type("application/json");
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options).map_err(js_error)?;
    download_blob(&blob, filename)
}
