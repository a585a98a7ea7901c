//! 抽出APIクライアント（reqwest）
//!
//! エラーは共通の `Error` に揃える。2xx 以外は `Error::Http`、
//! 接続・タイムアウトは `Error::Transport`。

use invoice_extract_common::flow::{BATCH_EXTRACT_PATH, EXPORT_EXCEL_PATH, EXTRACT_PATH, HEALTH_PATH};
use invoice_extract_common::intake::PDF_MIME_TYPE;
use invoice_extract_common::{
    filename_from_content_disposition, Error, ExtractionResult, ExtractionType, FlowConfig, Result,
};
use reqwest::{header, multipart, Response};
use std::time::Duration;

/// 送信するPDF
#[derive(Debug, Clone)]
pub struct Upload {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    fn into_part(self) -> Result<multipart::Part> {
        multipart::Part::bytes(self.bytes)
            .file_name(self.name)
            .mime_str(PDF_MIME_TYPE)
            .map_err(transport)
    }
}

/// エクスポート結果
#[derive(Debug, Clone)]
pub struct ExcelDownload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

pub struct ApiClient {
    http: reqwest::Client,
    config: FlowConfig,
}

impl ApiClient {
    pub fn new(config: FlowConfig, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(transport)?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &FlowConfig {
        &self.config
    }

    /// 単一PDFの抽出
    pub async fn extract(&self, upload: Upload, kind: ExtractionType) -> Result<ExtractionResult> {
        let form = multipart::Form::new()
            .part("file", upload.into_part()?)
            .text("extraction_type", kind.as_str());

        let url = self.config.endpoint(EXTRACT_PATH);
        log::debug!("POST {} ({})", url, kind);
        let resp = self.http.post(&url).multipart(form).send().await.map_err(transport)?;
        read_json(check_status(resp)?).await
    }

    /// 複数PDFの一括抽出
    ///
    /// `on_headers` はレスポンスヘッダ受信後（本文の読み込み前）に呼ばれる。
    pub async fn batch_extract(
        &self,
        uploads: Vec<Upload>,
        on_headers: impl FnOnce(),
    ) -> Result<ExtractionResult> {
        let mut form = multipart::Form::new();
        for upload in uploads {
            form = form.part("files", upload.into_part()?);
        }

        let url = self.config.endpoint(BATCH_EXTRACT_PATH);
        log::debug!("POST {}", url);
        let resp = self.http.post(&url).multipart(form).send().await.map_err(transport)?;
        on_headers();
        read_json(check_status(resp)?).await
    }

    /// バッチ結果をExcelに変換
    pub async fn export_excel(&self, result: &ExtractionResult) -> Result<ExcelDownload> {
        let url = self.config.endpoint(EXPORT_EXCEL_PATH);
        log::debug!("POST {}", url);
        let resp = self.http.post(&url).json(result).send().await.map_err(transport)?;
        let resp = check_status(resp)?;

        let disposition = resp
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = resp.bytes().await.map_err(transport)?;

        Ok(ExcelDownload {
            filename: filename_from_content_disposition(disposition.as_deref()),
            bytes: bytes.to_vec(),
        })
    }

    /// ヘルスチェック（`{"status": "healthy"}` なら true）
    pub async fn health(&self) -> Result<bool> {
        let url = self.config.endpoint(HEALTH_PATH);
        let resp = self.http.get(&url).send().await.map_err(transport)?;
        let body = read_json(check_status(resp)?).await?;
        Ok(body.field("status").as_str() == Some("healthy"))
    }
}

fn transport(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::Transport(format!("request timed out: {}", e))
    } else {
        Error::Transport(e.to_string())
    }
}

fn check_status(resp: Response) -> Result<Response> {
    let status = resp.status();
    if !status.is_success() {
        return Err(Error::Http(status.as_u16()));
    }
    Ok(resp)
}

async fn read_json(resp: Response) -> Result<ExtractionResult> {
    let text = resp.text().await.map_err(transport)?;
    let value: serde_json::Value =
        serde_json::from_str(&text).map_err(|e| Error::InvalidResponse(e.to_string()))?;
    Ok(ExtractionResult::new(value))
}
