//! 抽出API呼び出し
//!
//! - POST /api/v1/extract       単一PDF + extraction_type
//! - POST /api/v1/batch-extract 複数PDF（files を繰り返し）
//! - POST /api/v1/export-excel  バッチ結果JSON → xlsx

use super::js_error;
use crate::file::SelectedFile;
use invoice_extract_common::flow::{BATCH_EXTRACT_PATH, EXPORT_EXCEL_PATH, EXTRACT_PATH};
use invoice_extract_common::{Error, ExtractionResult, ExtractionType, FlowConfig, Result};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, FormData, Request, RequestInit, RequestMode, Response};

/// POST 共通処理（2xx 以外はエラー）
async fn post(url: &str, body: &JsValue, content_type: Option<&str>) -> Result<Response> {
    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(body);

    let request = Request::new_with_str_and_init(url, &opts).map_err(js_error)?;
    if let Some(content_type) = content_type {
        request
            .headers()
            .set("Content-Type", content_type)
            .map_err(js_error)?;
    }

    let window = web_sys::window().ok_or_else(|| Error::Transport("window is not available".into()))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(js_error)?;
    let resp: Response = resp_value.dyn_into().map_err(js_error)?;

    if !resp.ok() {
        return Err(Error::Http(resp.status()));
    }
    Ok(resp)
}

/// レスポンス本文をJSONとして読む
async fn read_json(resp: &Response) -> Result<ExtractionResult> {
    let text = JsFuture::from(resp.text().map_err(js_error)?)
        .await
        .map_err(js_error)?
        .as_string()
        .ok_or_else(|| Error::InvalidResponse("response body is not text".into()))?;
    let value: serde_json::Value = serde_json::from_str(&text)
        .map_err(|e| Error::InvalidResponse(e.to_string()))?;
    Ok(ExtractionResult::new(value))
}

/// 単一PDFの抽出
pub async fn extract_single(
    config: &FlowConfig,
    file: &SelectedFile,
    kind: ExtractionType,
) -> Result<ExtractionResult> {
    let form = FormData::new().map_err(js_error)?;
    form.append_with_blob_and_filename("file", file.file(), &file.file().name())
        .map_err(js_error)?;
    form.append_with_str("extraction_type", kind.as_str())
        .map_err(js_error)?;

    let resp = post(&config.endpoint(EXTRACT_PATH), &JsValue::from(form), None).await?;
    read_json(&resp).await
}

/// 複数PDFの一括抽出
///
/// `on_headers` はレスポンスヘッダ受信後（本文の読み込み前）に呼ばれる。
pub async fn extract_batch(
    config: &FlowConfig,
    files: &[SelectedFile],
    on_headers: impl FnOnce(),
) -> Result<ExtractionResult> {
    let form = FormData::new().map_err(js_error)?;
    for file in files {
        form.append_with_blob_and_filename("files", file.file(), &file.file().name())
            .map_err(js_error)?;
    }

    let resp = post(&config.endpoint(BATCH_EXTRACT_PATH), &JsValue::from(form), None).await?;
    on_headers();
    read_json(&resp).await
}

/// バッチ結果をExcelに変換（本文Blob, Content-Disposition）
pub async fn export_excel(
    config: &FlowConfig,
    result: &ExtractionResult,
) -> Result<(Blob, Option<String>)> {
    let body = serde_json::to_string(result)?;
    let resp = post(
        &config.endpoint(EXPORT_EXCEL_PATH),
        &JsValue::from_str(&body),
        Some("application/json"),
    )
    .await?;

    let disposition = resp
        .headers()
        .get("Content-Disposition")
        .map_err(js_error)?;
    let blob: Blob = JsFuture::from(resp.blob().map_err(js_error)?)
        .await
        .map_err(js_error)?
        .dyn_into()
        .map_err(js_error)?;

    Ok((blob, disposition))
}
