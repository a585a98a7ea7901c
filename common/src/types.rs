//! 抽出結果とファイルの型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - FileHandle: 選択されたファイル（名前・サイズ・MIMEタイプ）
//! - ExtractionType: 抽出種別（invoice / contract / general）
//! - ExtractionResult: サーバーから返るJSON（中身は緩く型付け）

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// 選択ファイルの抽象
///
/// ブラウザでは `web_sys::File`、CLIではパス付きのメタデータが実装する。
pub trait FileHandle {
    fn name(&self) -> String;
    fn size(&self) -> u64;
    fn mime_type(&self) -> String;
}

/// メタデータのみのファイル
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMeta {
    pub name: String,
    pub size: u64,
    pub mime_type: String,
}

impl FileMeta {
    pub fn new(name: impl Into<String>, size: u64, mime_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size,
            mime_type: mime_type.into(),
        }
    }

    pub fn pdf(name: impl Into<String>, size: u64) -> Self {
        Self::new(name, size, crate::intake::PDF_MIME_TYPE)
    }
}

impl FileHandle for FileMeta {
    fn name(&self) -> String {
        self.name.clone()
    }
    fn size(&self) -> u64 {
        self.size
    }
    fn mime_type(&self) -> String {
        self.mime_type.clone()
    }
}

/// 抽出種別
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionType {
    #[default]
    Invoice,
    Contract,
    General,
}

impl ExtractionType {
    pub const ALL: [ExtractionType; 3] = [
        ExtractionType::Invoice,
        ExtractionType::Contract,
        ExtractionType::General,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionType::Invoice => "invoice",
            ExtractionType::Contract => "contract",
            ExtractionType::General => "general",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExtractionType::Invoice => "Invoice",
            ExtractionType::Contract => "Contract",
            ExtractionType::General => "General Document",
        }
    }
}

impl fmt::Display for ExtractionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExtractionType {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "invoice" => Ok(ExtractionType::Invoice),
            "contract" => Ok(ExtractionType::Contract),
            "general" => Ok(ExtractionType::General),
            other => Err(crate::Error::Config(format!("unknown extraction type: {}", other))),
        }
    }
}

/// サーバーから返る抽出結果
///
/// エクスポート時にはそのままサーバーへ送り返すため、JSONを加工せずに保持する。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtractionResult(pub Value);

impl ExtractionResult {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// フィールド取得（存在しない場合は Null）
    pub fn field(&self, key: &str) -> &Value {
        self.0.get(key).unwrap_or(&Value::Null)
    }

    /// バッチ結果の請求書一覧（配列でなければ空）
    pub fn invoices(&self) -> Vec<InvoiceRecord<'_>> {
        self.0
            .get("invoices")
            .and_then(Value::as_array)
            .map(|arr| arr.iter().map(InvoiceRecord).collect())
            .unwrap_or_default()
    }

    pub fn filename(&self) -> Option<&str> {
        self.0.get("filename").and_then(Value::as_str)
    }

    /// デモ結果か
    pub fn is_demo(&self) -> bool {
        self.0.get("demo").and_then(Value::as_bool).unwrap_or(false)
    }
}

impl From<Value> for ExtractionResult {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// バッチ結果内の1件分（借用ビュー）
#[derive(Debug, Clone, Copy)]
pub struct InvoiceRecord<'a>(pub &'a Value);

impl<'a> InvoiceRecord<'a> {
    /// `error` が真値なら処理失敗
    pub fn error(&self) -> Option<String> {
        let err = self.0.get("error")?;
        if !crate::format::is_truthy(err) {
            return None;
        }
        Some(crate::format::display_text(err))
    }

    pub fn is_error(&self) -> bool {
        self.error().is_some()
    }

    pub fn summary(&self) -> &'a Value {
        self.0.get("invoice_summary").unwrap_or(&Value::Null)
    }

    pub fn summary_field(&self, key: &str) -> &'a Value {
        self.summary().get(key).unwrap_or(&Value::Null)
    }

    pub fn line_items(&self) -> &'a [Value] {
        self.0
            .get("line_items")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
