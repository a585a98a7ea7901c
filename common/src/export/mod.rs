//! Export helpers shared across CLI and WASM wrappers.

#[cfg(feature = "excel")]
pub mod excel_core;

use percent_encoding::percent_decode_str;

/// Content-Disposition がない場合のExcelファイル名
pub const DEFAULT_EXCEL_FILENAME: &str = "invoice_batch.xlsx";

/// 単一ファイル結果のJSONダウンロード名
///
/// "report.v2.pdf" → "report.v2_extraction_results.json"
pub fn json_export_filename(original: &str) -> String {
    let stem = match original.rfind('.') {
        Some(pos) if pos > 0 => &original[..pos],
        _ => original,
    };
    format!("{}_extraction_results.json", stem)
}

/// Content-Disposition ヘッダからファイル名を取り出す
///
/// `filename*=UTF-8''...` と `filename="..."` の両方に対応し、
/// 取り出せなければ既定名を返す。
pub fn filename_from_content_disposition(header: Option<&str>) -> String {
    header
        .and_then(parse_disposition_filename)
        .unwrap_or_else(|| DEFAULT_EXCEL_FILENAME.to_string())
}

fn parse_disposition_filename(header: &str) -> Option<String> {
    let mut plain = None;
    for param in header.split(';').map(str::trim) {
        let Some((key, value)) = param.split_once('=') else {
            continue;
        };
        let key = key.trim().to_ascii_lowercase();
        let value = value.trim();
        if key == "filename*" {
            // RFC 5987: charset'lang'value
            let encoded = value.rsplit('\'').next().unwrap_or(value);
            let decoded = percent_decode_str(encoded).decode_utf8_lossy();
            if !decoded.is_empty() {
                return Some(decoded.into_owned());
            }
        } else if key == "filename" {
            let unquoted = value.trim_matches('"').trim();
            if !unquoted.is_empty() {
                plain = Some(unquoted.to_string());
            }
        }
    }
    plain
}

/// Excel出力ボタンの状態
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportButtonState {
    #[default]
    Idle,
    Busy,
}

impl ExportButtonState {
    pub fn label(&self) -> &'static str {
        match self {
            ExportButtonState::Idle => "Export to Excel",
            ExportButtonState::Busy => "Generating Excel...",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ExportButtonState::Idle => "fas fa-file-excel",
            ExportButtonState::Busy => "fas fa-spinner fa-spin",
        }
    }

    pub fn disabled(&self) -> bool {
        matches!(self, ExportButtonState::Busy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_export_filename() {
        assert_eq!(json_export_filename("invoice.pdf"), "invoice_extraction_results.json");
        assert_eq!(json_export_filename("report.v2.pdf"), "report.v2_extraction_results.json");
        assert_eq!(json_export_filename("noext"), "noext_extraction_results.json");
        assert_eq!(json_export_filename(".hidden"), ".hidden_extraction_results.json");
    }

    #[test]
    fn test_disposition_quoted() {
        let name = filename_from_content_disposition(Some(
            "attachment; filename=\"invoices_20240115.xlsx\"",
        ));
        assert_eq!(name, "invoices_20240115.xlsx");
    }

    #[test]
    fn test_disposition_unquoted() {
        let name = filename_from_content_disposition(Some("attachment; filename=batch.xlsx"));
        assert_eq!(name, "batch.xlsx");
    }

    #[test]
    fn test_disposition_extended_wins() {
        let name = filename_from_content_disposition(Some(
            "attachment; filename=\"fallback.xlsx\"; filename*=UTF-8''r%C3%A9sum%C3%A9.xlsx",
        ));
        assert_eq!(name, "résumé.xlsx");
    }

    #[test]
    fn test_disposition_extended_with_spaces() {
        let name = filename_from_content_disposition(Some(
            "attachment; filename*=UTF-8''invoice%20batch%202024.xlsx",
        ));
        assert_eq!(name, "invoice batch 2024.xlsx");
    }

    #[test]
    fn test_disposition_missing() {
        assert_eq!(filename_from_content_disposition(None), DEFAULT_EXCEL_FILENAME);
        assert_eq!(filename_from_content_disposition(Some("attachment")), DEFAULT_EXCEL_FILENAME);
        assert_eq!(filename_from_content_disposition(Some("attachment; filename=\"\"")), DEFAULT_EXCEL_FILENAME);
    }

    #[test]
    fn test_button_state() {
        assert_eq!(ExportButtonState::Idle.label(), "Export to Excel");
        assert!(!ExportButtonState::Idle.disabled());
        assert_eq!(ExportButtonState::Busy.label(), "Generating Excel...");
        assert!(ExportButtonState::Busy.disabled());
    }
}
