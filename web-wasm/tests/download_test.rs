//! ブラウザでのダウンロード処理のテスト

#![cfg(target_arch = "wasm32")]

use invoice_extract_web::export::download::{download_blob, download_json};
use wasm_bindgen_test::*;
use web_sys::Blob;

wasm_bindgen_test_configure!(run_in_browser);

fn anchor_count() -> u32 {
    web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.query_selector_all("a[download]").ok())
        .map(|list| list.length())
        .unwrap_or(0)
}

#[wasm_bindgen_test]
fn test_download_json_leaves_no_anchor() {
    let before = anchor_count();
    download_json("invoice_extraction_results.json", "{\"raw_text\": \"hi\"}")
        .expect("ダウンロード失敗");
    assert_eq!(anchor_count(), before);
}

#[wasm_bindgen_test]
fn test_download_blob() {
    let blob = Blob::new().expect("Blob作成失敗");
    download_blob(&blob, "invoice_batch.xlsx").expect("ダウンロード失敗");
    assert_eq!(anchor_count(), 0);
}
