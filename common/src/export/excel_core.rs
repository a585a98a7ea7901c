//! Excel生成（共通ライブラリ）
//!
//! バッチ結果から3シート構成のExcelを生成する。
//! - Invoice Summary: 請求書ごとのサマリ
//! - Line Items: 明細（親請求書の番号・取引先・日付を付与）
//! - Summary Stats: 集計

use crate::error::{Error, Result};
use crate::format::{coerce_number, display_text, format_usd};
use crate::types::ExtractionResult;
use rust_xlsxwriter::*;
use serde_json::{Map, Value};

/// サマリシートの列順（存在する列のみ出力）
pub const SUMMARY_COLUMNS: [&str; 12] = [
    "filename", "invoice_number", "vendor_name", "invoice_date",
    "due_date", "subtotal", "tax_amount", "total_amount",
    "po_number", "currency", "payment_terms", "vendor_address",
];

/// 明細シートの列順（存在する列のみ出力）
pub const LINE_ITEM_COLUMNS: [&str; 9] = [
    "filename", "invoice_number", "vendor_name", "invoice_date",
    "item_description", "category", "quantity", "unit_price",
    "line_total",
];

const SUMMARY_HEADER_COLOR: u32 = 0x366092;
const LINE_ITEMS_HEADER_COLOR: u32 = 0x70AD47;
const STATS_HEADER_COLOR: u32 = 0xC5504B;

const SUMMARY_MAX_WIDTH: usize = 50;
const LINE_ITEMS_MAX_WIDTH: usize = 60;

/// シート1枚分の表データ
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub columns: Vec<&'static str>,
    pub rows: Vec<Vec<Value>>,
}

impl Table {
    fn build(records: &[Map<String, Value>], order: &[&'static str]) -> Self {
        let columns: Vec<&'static str> = order
            .iter()
            .copied()
            .filter(|col| records.iter().any(|r| r.contains_key(*col)))
            .collect();

        let rows = records
            .iter()
            .map(|r| {
                columns
                    .iter()
                    .map(|col| r.get(*col).cloned().unwrap_or(Value::Null))
                    .collect()
            })
            .collect();

        Self { columns, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| *c == name)
    }

    fn column(&self, name: &str) -> Vec<&Value> {
        match self.column_index(name) {
            Some(idx) => self.rows.iter().map(|r| &r[idx]).collect(),
            None => Vec::new(),
        }
    }
}

/// 集計シートの値
#[derive(Debug, Clone, PartialEq)]
pub enum StatValue {
    Text(String),
    Count(usize),
}

/// ワークブックに書き込む内容
#[derive(Debug, Clone, PartialEq)]
pub struct WorkbookData {
    pub summary: Table,
    pub line_items: Table,
    pub stats: Vec<(String, StatValue)>,
}

impl WorkbookData {
    pub fn from_result(result: &ExtractionResult, processed_on: &str) -> Self {
        let mut summaries = Vec::new();
        let mut items = Vec::new();

        for invoice in result.invoices() {
            let summary = invoice.0.get("invoice_summary").and_then(Value::as_object);
            if let Some(summary) = summary {
                summaries.push(summary.clone());
            }

            for item in invoice.line_items() {
                let Some(item) = item.as_object() else {
                    continue;
                };
                let mut enhanced = item.clone();
                if let Some(summary) = summary {
                    let get_or = |key: &str, default: &str| {
                        summary.get(key).cloned().unwrap_or_else(|| Value::from(default))
                    };
                    enhanced.insert("invoice_number".into(), get_or("invoice_number", "N/A"));
                    enhanced.insert("vendor_name".into(), get_or("vendor_name", "Unknown"));
                    enhanced.insert("invoice_date".into(), get_or("invoice_date", "N/A"));
                }
                items.push(enhanced);
            }
        }

        let summary = Table::build(&summaries, &SUMMARY_COLUMNS);
        let line_items = Table::build(&items, &LINE_ITEM_COLUMNS);
        let stats = build_stats(&summary, &line_items, processed_on);

        Self { summary, line_items, stats }
    }
}

fn build_stats(summary: &Table, line_items: &Table, processed_on: &str) -> Vec<(String, StatValue)> {
    let mut stats = Vec::new();
    let blank = || (String::new(), StatValue::Text(String::new()));

    if !summary.is_empty() {
        stats.push(("Total Invoices Processed".to_string(), StatValue::Count(summary.rows.len())));

        if summary.column_index("total_amount").is_some() {
            let amounts: Vec<f64> = summary
                .column("total_amount")
                .into_iter()
                .filter(|v| !v.is_null())
                .map(coerce_number)
                .collect();
            let total: f64 = amounts.iter().sum();
            let average = if amounts.is_empty() { 0.0 } else { total / amounts.len() as f64 };
            stats.push(("Total Amount (All Invoices)".to_string(), StatValue::Text(format_usd(total))));
            stats.push(("Average Invoice Amount".to_string(), StatValue::Text(format_usd(average))));
        }

        if summary.column_index("vendor_name").is_some() {
            let mut vendors: Vec<String> = summary
                .column("vendor_name")
                .into_iter()
                .filter(|v| !v.is_null())
                .map(display_text)
                .collect();
            vendors.sort();
            vendors.dedup();
            stats.push(("Unique Vendors".to_string(), StatValue::Count(vendors.len())));
        }
    }

    if !line_items.is_empty() {
        stats.push(("Total Line Items".to_string(), StatValue::Count(line_items.rows.len())));

        if line_items.column_index("category").is_some() {
            stats.push(blank());
            stats.push(("Top Categories:".to_string(), StatValue::Text(String::new())));
            for (category, count) in top_categories(&line_items.column("category"), 5) {
                stats.push((format!("  {}", category), StatValue::Count(count)));
            }
        }
    }

    stats.push(blank());
    stats.push(("Processed On".to_string(), StatValue::Text(processed_on.to_string())));
    stats
}

/// 出現回数の多い順（同数は先に出たもの優先）
fn top_categories(values: &[&Value], limit: usize) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for value in values.iter().filter(|v| !v.is_null()) {
        let key = display_text(value);
        match counts.iter_mut().find(|(k, _)| *k == key) {
            Some((_, n)) => *n += 1,
            None => counts.push((key, 1)),
        }
    }
    // sort_by は安定ソート
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(limit);
    counts
}

fn header_format(color: u32) -> Format {
    Format::new()
        .set_bold()
        .set_font_color(Color::White)
        .set_background_color(Color::RGB(color))
        .set_align(FormatAlign::Center)
}

fn cell_text(value: &Value) -> String {
    if value.is_null() { String::new() } else { display_text(value) }
}

fn write_table(
    worksheet: &mut Worksheet,
    table: &Table,
    header_color: u32,
    max_width: usize,
) -> Result<()> {
    let header = header_format(header_color);
    let mut widths: Vec<usize> = table.columns.iter().map(|c| c.chars().count()).collect();

    for (col, name) in table.columns.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *name, &header)
            .map_err(|e| Error::Export(format!("ヘッダ書き込みエラー: {}", e)))?;
    }

    for (r, row) in table.rows.iter().enumerate() {
        let row_num = (r + 1) as u32;
        for (col, value) in row.iter().enumerate() {
            let col_num = col as u16;
            let written = match value {
                Value::Null => continue,
                Value::Number(n) => worksheet.write_number(row_num, col_num, n.as_f64().unwrap_or(0.0)),
                Value::Bool(b) => worksheet.write_boolean(row_num, col_num, *b),
                other => worksheet.write_string(row_num, col_num, cell_text(other)),
            };
            written.map_err(|e| Error::Export(format!("セル書き込みエラー: {}", e)))?;
            widths[col] = widths[col].max(cell_text(value).chars().count());
        }
    }

    for (col, width) in widths.iter().enumerate() {
        let adjusted = (width + 2).min(max_width);
        worksheet
            .set_column_width(col as u16, adjusted as f64)
            .map_err(|e| Error::Export(format!("列幅設定エラー: {}", e)))?;
    }
    Ok(())
}

fn write_stats(worksheet: &mut Worksheet, stats: &[(String, StatValue)]) -> Result<()> {
    let header = header_format(STATS_HEADER_COLOR);
    let map_err = |e: XlsxError| Error::Export(format!("集計シート書き込みエラー: {}", e));

    worksheet.write_string_with_format(0, 0, "Metric", &header).map_err(map_err)?;
    worksheet.write_string_with_format(0, 1, "Value", &header).map_err(map_err)?;

    for (i, (metric, value)) in stats.iter().enumerate() {
        let row = (i + 1) as u32;
        if !metric.is_empty() {
            worksheet.write_string(row, 0, metric).map_err(map_err)?;
        }
        match value {
            StatValue::Count(n) => {
                worksheet.write_number(row, 1, *n as f64).map_err(map_err)?;
            }
            StatValue::Text(s) if !s.is_empty() => {
                worksheet.write_string(row, 1, s).map_err(map_err)?;
            }
            StatValue::Text(_) => {}
        }
    }

    worksheet.set_column_width(0, 25).map_err(map_err)?;
    worksheet.set_column_width(1, 20).map_err(map_err)?;
    Ok(())
}

/// Excelをバッファに生成
///
/// # Arguments
/// * `result` - バッチ抽出結果（`invoices` 配列）
/// * `processed_on` - 集計シートに記載する処理日時
pub fn generate_excel_buffer(result: &ExtractionResult, processed_on: &str) -> Result<Vec<u8>> {
    let data = WorkbookData::from_result(result, processed_on);
    let mut workbook = Workbook::new();

    if !data.summary.is_empty() {
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name("Invoice Summary")
            .map_err(|e| Error::Export(format!("シート名設定エラー: {}", e)))?;
        write_table(worksheet, &data.summary, SUMMARY_HEADER_COLOR, SUMMARY_MAX_WIDTH)?;
    }

    if !data.line_items.is_empty() {
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name("Line Items")
            .map_err(|e| Error::Export(format!("シート名設定エラー: {}", e)))?;
        write_table(worksheet, &data.line_items, LINE_ITEMS_HEADER_COLOR, LINE_ITEMS_MAX_WIDTH)?;
    }

    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name("Summary Stats")
        .map_err(|e| Error::Export(format!("シート名設定エラー: {}", e)))?;
    write_stats(worksheet, &data.stats)?;

    log::debug!(
        "workbook: {} summary rows, {} line items",
        data.summary.rows.len(),
        data.line_items.rows.len()
    );

    workbook
        .save_to_buffer()
        .map_err(|e| Error::Export(format!("Excel保存エラー: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> ExtractionResult {
        ExtractionResult::new(json!({
            "invoices": [
                {
                    "invoice_summary": {
                        "filename": "a.pdf", "invoice_number": "A-1", "vendor_name": "ACME",
                        "invoice_date": "2024-01-01", "total_amount": 100.0
                    },
                    "line_items": [
                        {"item_description": "Bolts", "category": "Hardware", "quantity": 10, "unit_price": 5, "line_total": 50},
                        {"item_description": "Nuts", "category": "Hardware", "quantity": 10, "unit_price": 5, "line_total": 50}
                    ]
                },
                {
                    "invoice_summary": {"filename": "b.pdf", "vendor_name": "ACME", "total_amount": "300"},
                    "line_items": [{"item_description": "Consulting", "category": "Services", "line_total": 300}]
                },
                {"error": "unreadable"}
            ]
        }))
    }

    #[test]
    fn test_summary_columns_only_present() {
        let data = WorkbookData::from_result(&sample(), "2024-01-02 10:00:00");
        assert_eq!(
            data.summary.columns,
            vec!["filename", "invoice_number", "vendor_name", "invoice_date", "total_amount"]
        );
        assert_eq!(data.summary.rows.len(), 2);
        // b.pdf は invoice_number なし → 空セル
        assert_eq!(data.summary.rows[1][1], Value::Null);
    }

    #[test]
    fn test_line_items_carry_invoice_fields() {
        let data = WorkbookData::from_result(&sample(), "now");
        assert_eq!(data.line_items.rows.len(), 3);

        let idx = data.line_items.column_index("invoice_number").unwrap();
        assert_eq!(data.line_items.rows[0][idx], json!("A-1"));
        // 請求書番号がない請求書の明細は "N/A"
        assert_eq!(data.line_items.rows[2][idx], json!("N/A"));

        let date_idx = data.line_items.column_index("invoice_date").unwrap();
        assert_eq!(data.line_items.rows[2][date_idx], json!("N/A"));
    }

    #[test]
    fn test_stats_rows() {
        let data = WorkbookData::from_result(&sample(), "2024-01-02 10:00:00");
        let find = |name: &str| {
            data.stats
                .iter()
                .find(|(m, _)| m == name)
                .map(|(_, v)| v.clone())
        };

        assert_eq!(find("Total Invoices Processed"), Some(StatValue::Count(2)));
        assert_eq!(find("Total Amount (All Invoices)"), Some(StatValue::Text("$400.00".into())));
        assert_eq!(find("Average Invoice Amount"), Some(StatValue::Text("$200.00".into())));
        assert_eq!(find("Unique Vendors"), Some(StatValue::Count(1)));
        assert_eq!(find("Total Line Items"), Some(StatValue::Count(3)));
        assert_eq!(find("  Hardware"), Some(StatValue::Count(2)));
        assert_eq!(find("  Services"), Some(StatValue::Count(1)));
        assert_eq!(
            data.stats.last(),
            Some(&("Processed On".to_string(), StatValue::Text("2024-01-02 10:00:00".into())))
        );
    }

    #[test]
    fn test_top_categories_limit_and_order() {
        let values: Vec<Value> = ["a", "b", "b", "c", "d", "e", "f", "b", "a"]
            .iter()
            .map(|s| json!(s))
            .collect();
        let refs: Vec<&Value> = values.iter().collect();
        let top = top_categories(&refs, 5);

        assert_eq!(top.len(), 5);
        assert_eq!(top[0], ("b".to_string(), 3));
        assert_eq!(top[1], ("a".to_string(), 2));
        assert_eq!(top[2], ("c".to_string(), 1));
    }

    #[test]
    fn test_empty_result_has_only_stats() {
        let data = WorkbookData::from_result(&ExtractionResult::new(json!({"invoices": []})), "t");
        assert!(data.summary.is_empty());
        assert!(data.line_items.is_empty());
        assert_eq!(data.stats.len(), 2);
    }

    #[test]
    fn test_generate_excel_buffer() {
        let buffer = generate_excel_buffer(&sample(), "2024-01-02 10:00:00").expect("Excel生成失敗");
        // xlsx は zip
        assert!(buffer.starts_with(b"PK"));
    }

    #[test]
    fn test_generate_excel_buffer_empty() {
        let buffer = generate_excel_buffer(&ExtractionResult::default(), "t").expect("Excel生成失敗");
        assert!(!buffer.is_empty());
    }
}
