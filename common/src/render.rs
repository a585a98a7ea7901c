//! 結果JSON → 表示用ビューモデル
//!
//! DOM やターミナルへの描画から切り離し、集計と整形だけをここで行う。

use crate::format::{coerce_number, currency_field, format_usd, number_or_zero, text_or_na};
use crate::types::{ExtractionResult, InvoiceRecord};
use serde_json::Value;

/// エラーがないときの表示
pub const NO_ERRORS_MESSAGE: &str = "All files processed successfully!";

/// バッチ集計
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatchStats {
    /// 処理ファイル数（エラー含む）
    pub processed_files: usize,
    /// 成功した請求書数
    pub successful_invoices: usize,
    /// 成功分の total_amount 合計
    pub total_amount: f64,
}

impl BatchStats {
    pub fn from_invoices(invoices: &[InvoiceRecord<'_>]) -> Self {
        let successful: Vec<_> = invoices.iter().filter(|inv| !inv.is_error()).collect();
        let total_amount = successful
            .iter()
            .map(|inv| coerce_number(inv.summary_field("total_amount")))
            .sum();

        Self {
            processed_files: invoices.len(),
            successful_invoices: successful.len(),
            total_amount,
        }
    }

    pub fn total_amount_display(&self) -> String {
        format_usd(self.total_amount)
    }
}

/// 請求書サマリ表の1行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRow {
    pub filename: String,
    pub invoice_number: String,
    pub vendor_name: String,
    pub invoice_date: String,
    pub due_date: String,
    pub total_amount: String,
    pub po_number: String,
    pub status: &'static str,
}

impl SummaryRow {
    pub const HEADERS: [&'static str; 8] = [
        "File", "Invoice #", "Vendor", "Invoice Date", "Due Date", "Total", "PO #", "Status",
    ];

    fn from_record(invoice: &InvoiceRecord<'_>) -> Self {
        let field = |key: &str| text_or_na(invoice.summary_field(key));
        Self {
            filename: field("filename"),
            invoice_number: field("invoice_number"),
            vendor_name: field("vendor_name"),
            invoice_date: field("invoice_date"),
            due_date: field("due_date"),
            total_amount: currency_field(invoice.summary_field("total_amount")),
            po_number: field("po_number"),
            status: "Processed",
        }
    }

    pub fn cells(&self) -> [&str; 8] {
        [
            &self.filename,
            &self.invoice_number,
            &self.vendor_name,
            &self.invoice_date,
            &self.due_date,
            &self.total_amount,
            &self.po_number,
            self.status,
        ]
    }
}

/// 明細表の1行（親請求書の番号・取引先を持つ）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItemRow {
    pub invoice_number: String,
    pub vendor_name: String,
    pub description: String,
    pub category: String,
    pub quantity: String,
    pub unit_price: String,
    pub line_total: String,
}

impl LineItemRow {
    pub const HEADERS: [&'static str; 7] = [
        "Invoice #", "Vendor", "Description", "Category", "Qty", "Unit Price", "Line Total",
    ];

    fn from_item(invoice: &InvoiceRecord<'_>, item: &Value) -> Self {
        let item_field = |key: &str| item.get(key).unwrap_or(&Value::Null);
        Self {
            invoice_number: text_or_na(invoice.summary_field("invoice_number")),
            vendor_name: text_or_na(invoice.summary_field("vendor_name")),
            description: text_or_na(item_field("item_description")),
            category: text_or_na(item_field("category")),
            quantity: number_or_zero(item_field("quantity")),
            unit_price: currency_field(item_field("unit_price")),
            line_total: currency_field(item_field("line_total")),
        }
    }

    pub fn cells(&self) -> [&str; 7] {
        [
            &self.invoice_number,
            &self.vendor_name,
            &self.description,
            &self.category,
            &self.quantity,
            &self.unit_price,
            &self.line_total,
        ]
    }
}

/// エラー一覧
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorListView {
    AllSucceeded,
    Errors(Vec<String>),
}

impl ErrorListView {
    pub fn len(&self) -> usize {
        match self {
            ErrorListView::AllSucceeded => 0,
            ErrorListView::Errors(errors) => errors.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// バッチ結果画面のビューモデル
#[derive(Debug, Clone, PartialEq)]
pub struct BatchView {
    pub stats: BatchStats,
    pub summary_rows: Vec<SummaryRow>,
    pub line_item_rows: Vec<LineItemRow>,
    pub errors: ErrorListView,
}

impl BatchView {
    pub fn from_result(result: &ExtractionResult) -> Self {
        let invoices = result.invoices();

        let summary_rows = invoices
            .iter()
            .filter(|inv| !inv.is_error())
            .map(SummaryRow::from_record)
            .collect();

        let line_item_rows = invoices
            .iter()
            .filter(|inv| !inv.is_error())
            .flat_map(|inv| inv.line_items().iter().map(move |item| LineItemRow::from_item(inv, item)))
            .collect();

        let error_messages: Vec<String> = invoices.iter().filter_map(|inv| inv.error()).collect();
        let errors = if error_messages.is_empty() {
            ErrorListView::AllSucceeded
        } else {
            ErrorListView::Errors(error_messages)
        };

        Self {
            stats: BatchStats::from_invoices(&invoices),
            summary_rows,
            line_item_rows,
            errors,
        }
    }
}

/// 単一ファイル結果画面のビューモデル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingleView {
    pub filename: String,
    /// structured_data を2スペースインデントで整形したもの
    pub structured_json: String,
    pub raw_text: String,
    pub ai_summary: String,
    pub is_demo: bool,
}

impl SingleView {
    pub fn from_result(result: &ExtractionResult) -> Self {
        let structured = result.field("structured_data");
        let structured_json = serde_json::to_string_pretty(structured)
            .unwrap_or_else(|_| structured.to_string());

        let text = |key: &str| match result.field(key) {
            Value::String(s) => s.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        };

        Self {
            filename: text_or_na(result.field("filename")),
            structured_json,
            raw_text: text("raw_text"),
            ai_summary: text("ai_summary"),
            is_demo: result.is_demo(),
        }
    }
}
