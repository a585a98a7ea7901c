//! Excel出力の統合テスト（ローカル生成）

use calamine::{open_workbook, Data, Reader, Xlsx};
use invoice_extract::error::ExtractError;
use invoice_extract::runner;
use invoice_extract_common::ExtractionResult;
use serde_json::json;
use tempfile::tempdir;

fn sample_result() -> ExtractionResult {
    ExtractionResult::new(json!({
        "invoices": [
            {
                "invoice_summary": {
                    "filename": "acme.pdf",
                    "invoice_number": "INV-001",
                    "vendor_name": "ACME Corp",
                    "invoice_date": "2024-01-15",
                    "total_amount": 1250.5
                },
                "line_items": [
                    {"item_description": "Widgets", "category": "Hardware", "quantity": 10, "unit_price": 100, "line_total": 1000},
                    {"item_description": "Cables", "category": "Hardware", "quantity": 5, "unit_price": 50.1, "line_total": 250.5}
                ]
            },
            {
                "invoice_summary": {"filename": "globex.pdf", "vendor_name": "Globex", "total_amount": 749.5},
                "line_items": [{"item_description": "Consulting", "category": "Services", "line_total": 749.5}]
            },
            {"error": "Failed to parse scan.pdf"}
        ]
    }))
}

fn cell(range: &calamine::Range<Data>, row: u32, col: u32) -> String {
    range
        .get_value((row, col))
        .map(|d| d.to_string())
        .unwrap_or_default()
}

#[test]
fn test_local_export_writes_three_sheets() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = runner::export_local(&sample_result(), dir.path(), "2024-01-20 10:00:00")
        .expect("Excel生成に失敗");

    assert_eq!(path, dir.path().join("invoice_batch.xlsx"));

    let mut workbook: Xlsx<_> = open_workbook(&path).expect("Excel読み込み失敗");
    assert_eq!(
        workbook.sheet_names(),
        vec!["Invoice Summary", "Line Items", "Summary Stats"]
    );

    let summary = workbook.worksheet_range("Invoice Summary").expect("シートなし");
    assert_eq!(cell(&summary, 0, 0), "filename");
    assert_eq!(cell(&summary, 1, 0), "acme.pdf");
    // エラー行は含まれない
    assert_eq!(summary.height(), 3);

    let items = workbook.worksheet_range("Line Items").expect("シートなし");
    assert_eq!(items.height(), 4);
    // 親請求書がない項目は Unknown / N/A で補う
    let vendor_col = (0..items.width() as u32)
        .find(|&c| cell(&items, 0, c) == "vendor_name")
        .expect("vendor_name 列なし");
    let number_col = (0..items.width() as u32)
        .find(|&c| cell(&items, 0, c) == "invoice_number")
        .expect("invoice_number 列なし");
    assert_eq!(cell(&items, 1, vendor_col), "ACME Corp");
    assert_eq!(cell(&items, 3, vendor_col), "Globex");
    assert_eq!(cell(&items, 3, number_col), "N/A");

    let stats = workbook.worksheet_range("Summary Stats").expect("シートなし");
    assert_eq!(cell(&stats, 0, 0), "Metric");
    assert_eq!(cell(&stats, 1, 0), "Total Invoices Processed");
    assert_eq!(cell(&stats, 2, 1), "$2,000.00");
}

#[test]
fn test_local_export_empty_batch() {
    let dir = tempdir().expect("Failed to create temp dir");
    let result = ExtractionResult::new(json!({"invoices": [{"error": "bad"}]}));

    let path = runner::export_local(&result, dir.path(), "2024-01-20").expect("Excel生成に失敗");
    let mut workbook: Xlsx<_> = open_workbook(&path).expect("Excel読み込み失敗");
    assert_eq!(workbook.sheet_names(), vec!["Summary Stats"]);
}

#[test]
fn test_load_result_errors() {
    let dir = tempdir().expect("Failed to create temp dir");

    let missing = runner::load_result(&dir.path().join("none.json")).unwrap_err();
    assert!(matches!(missing, ExtractError::FileNotFound(_)));

    let null = dir.path().join("null.json");
    std::fs::write(&null, "null").unwrap();
    assert_eq!(runner::load_result(&null).unwrap_err().to_string(), "No data to export");

    let broken = dir.path().join("broken.json");
    std::fs::write(&broken, "{ invalid").unwrap();
    assert!(matches!(runner::load_result(&broken).unwrap_err(), ExtractError::JsonParse(_)));
}
