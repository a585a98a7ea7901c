//! APIクライアントとコマンド処理の統合テスト（wiremock）

use invoice_extract::client::ApiClient;
use invoice_extract::error::ExtractError;
use invoice_extract::runner;
use invoice_extract::scanner::{self, LocalFile};
use invoice_extract_common::{ExtractionType, FlowConfig, ViewState};
use serde_json::json;
use std::path::Path;
use std::time::Duration;
use tempfile::{tempdir, TempDir};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer, demo_fallback: bool) -> ApiClient {
    let config = FlowConfig {
        api_base: server.uri(),
        demo_fallback,
    };
    ApiClient::new(config, Duration::from_secs(5)).expect("client作成失敗")
}

fn write_file(dir: &Path, name: &str, body: &[u8]) -> LocalFile {
    let path = dir.join(name);
    std::fs::write(&path, body).expect("書き込み失敗");
    scanner::inspect_file(&path).expect("inspect失敗")
}

fn pdf_in(dir: &TempDir, name: &str) -> LocalFile {
    write_file(dir.path(), name, b"%PDF-1.4 test document")
}

#[tokio::test]
async fn test_extract_single_ok() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/extract"))
        .and(body_string_contains("name=\"extraction_type\""))
        .and(body_string_contains("contract"))
        .and(body_string_contains("filename=\"deal.pdf\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "filename": "deal.pdf",
            "extraction_type": "contract",
            "structured_data": {"contract_type": "NDA"},
            "raw_text": "MUTUAL NON-DISCLOSURE AGREEMENT",
            "ai_summary": "An NDA."
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempdir().expect("Failed to create temp dir");
    let client = client_for(&server, false);
    let flow = runner::extract_one(&client, pdf_in(&dir, "deal.pdf"), ExtractionType::Contract)
        .await
        .expect("抽出失敗");

    assert_eq!(flow.view(), ViewState::Results);
    assert_eq!(flow.progress().percent(), 100);

    let view = flow.single_view().expect("結果なし");
    assert_eq!(view.raw_text, "MUTUAL NON-DISCLOSURE AGREEMENT");
    assert!(!view.is_demo);

    let (name, body) = flow.json_export().expect("エクスポート内容なし");
    assert_eq!(name, "deal_extraction_results.json");
    assert!(body.contains("\"ai_summary\": \"An NDA.\""));
}

#[tokio::test]
async fn test_extract_single_falls_back_to_demo() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/extract"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let dir = tempdir().expect("Failed to create temp dir");
    let client = client_for(&server, true);
    let flow = runner::extract_one(&client, pdf_in(&dir, "scan.pdf"), ExtractionType::Invoice)
        .await
        .expect("デモ結果になるはず");

    assert_eq!(flow.view(), ViewState::Results);
    let result = flow.result().expect("結果なし");
    assert!(result.is_demo());
    assert_eq!(result.filename(), Some("scan.pdf"));
}

#[tokio::test]
async fn test_extract_single_without_demo_surfaces_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/extract"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let dir = tempdir().expect("Failed to create temp dir");
    let client = client_for(&server, false);
    let err = runner::extract_one(&client, pdf_in(&dir, "scan.pdf"), ExtractionType::Invoice)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Failed to extract data: HTTP error! status: 500");
}

#[tokio::test]
async fn test_extract_single_rejects_non_pdf_without_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempdir().expect("Failed to create temp dir");
    let png = write_file(dir.path(), "photo.png", b"not a pdf");
    let client = client_for(&server, true);
    let err = runner::extract_one(&client, png, ExtractionType::Invoice)
        .await
        .unwrap_err();

    assert!(matches!(err, ExtractError::Rejected(ref m) if m == "Please select a PDF file"));
}

#[tokio::test]
async fn test_batch_extract_filters_and_aggregates() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/batch-extract"))
        .and(body_string_contains("filename=\"a.pdf\""))
        .and(body_string_contains("filename=\"b.pdf\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "invoices": [
                {
                    "invoice_summary": {"filename": "a.pdf", "invoice_number": "INV-1", "total_amount": "100.50"},
                    "line_items": [{"item_description": "Paper", "line_total": 100.5}]
                },
                {"error": "Failed to parse b.pdf"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempdir().expect("Failed to create temp dir");
    let files = vec![
        pdf_in(&dir, "a.pdf"),
        pdf_in(&dir, "a.pdf"),
        pdf_in(&dir, "b.pdf"),
        write_file(dir.path(), "notes.txt", b"hello"),
    ];

    let client = client_for(&server, true);
    let flow = runner::extract_batch(&client, files).await.expect("一括抽出失敗");

    assert_eq!(flow.selection().len(), 2);
    assert_eq!(flow.view(), ViewState::Results);

    let view = flow.batch_view().expect("結果なし");
    assert_eq!(view.stats.processed_files, 2);
    assert_eq!(view.stats.successful_invoices, 1);
    assert_eq!(view.stats.total_amount_display(), "$100.50");
    assert_eq!(view.summary_rows.len(), 1);
    assert_eq!(view.errors.len(), 1);
}

#[tokio::test]
async fn test_batch_failure_is_not_masked() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/batch-extract"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let dir = tempdir().expect("Failed to create temp dir");
    // デモ表示が有効でもバッチは失敗を返す
    let client = client_for(&server, true);
    let err = runner::extract_batch(&client, vec![pdf_in(&dir, "a.pdf")])
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Failed to process files: HTTP error! status: 502");
}

#[tokio::test]
async fn test_batch_with_only_invalid_files() {
    let server = MockServer::start().await;
    let dir = tempdir().expect("Failed to create temp dir");
    let client = client_for(&server, false);

    let err = runner::extract_batch(&client, vec![write_file(dir.path(), "x.txt", b"x")])
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Please select at least one PDF file.");
}

#[tokio::test]
async fn test_export_remote_uses_disposition_name() {
    let server = MockServer::start().await;
    let xlsx = b"PK\x03\x04fake-workbook".to_vec();
    Mock::given(method("POST"))
        .and(path("/api/v1/export-excel"))
        .and(header("content-type", "application/json"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-disposition", "attachment; filename=\"invoices_20240115.xlsx\"")
                .set_body_bytes(xlsx.clone()),
        )
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempdir().expect("Failed to create temp dir");
    let client = client_for(&server, false);
    let result = invoice_extract_common::ExtractionResult::new(json!({"invoices": []}));

    let path = runner::export_remote(&client, &result, dir.path()).await.expect("出力失敗");
    assert_eq!(path, dir.path().join("invoices_20240115.xlsx"));
    assert_eq!(std::fs::read(&path).unwrap(), xlsx);
}

#[tokio::test]
async fn test_export_remote_default_name_and_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/export-excel"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"PK".to_vec()))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/export-excel"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let dir = tempdir().expect("Failed to create temp dir");
    let client = client_for(&server, false);
    let result = invoice_extract_common::ExtractionResult::new(json!({"invoices": []}));

    let path = runner::export_remote(&client, &result, dir.path()).await.expect("出力失敗");
    assert_eq!(path.file_name().unwrap(), "invoice_batch.xlsx");

    let err = runner::export_remote(&client, &result, dir.path()).await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to export Excel file: HTTP error! status: 500");
}

#[tokio::test]
async fn test_health() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "healthy"})))
        .mount(&server)
        .await;

    assert!(client_for(&server, false).health().await.unwrap());
}
