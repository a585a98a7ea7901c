//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    /// ファイル選択が空のまま処理を開始しようとした
    #[error("Please select at least one PDF file.")]
    EmptySelection,

    /// エクスポート対象の結果がない
    #[error("No data to export")]
    NoResult,

    #[error("HTTP error! status: {0}")]
    Http(u16),

    #[error("Network error: {0}")]
    Transport(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Cannot switch view from {from} to {to}")]
    InvalidTransition {
        from: &'static str,
        to: &'static str,
    },

    #[error("Export error: {0}")]
    Export(String),
}

impl Error {
    /// 通信系の失敗か（デモ結果へのフォールバック対象）
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Error::Http(_) | Error::Transport(_) | Error::InvalidResponse(_)
        )
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_http() {
        let error = Error::Http(502);
        assert_eq!(format!("{}", error), "HTTP error! status: 502");
    }

    #[test]
    fn test_error_display_empty_selection() {
        let error = Error::EmptySelection;
        assert_eq!(format!("{}", error), "Please select at least one PDF file.");
    }

    #[test]
    fn test_error_display_no_result() {
        assert_eq!(format!("{}", Error::NoResult), "No data to export");
    }

    #[test]
    fn test_error_display_transition() {
        let error = Error::InvalidTransition { from: "upload", to: "results" };
        assert_eq!(format!("{}", error), "Cannot switch view from upload to results");
    }

    #[test]
    fn test_error_from_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: Error = json_error.into();
        assert!(matches!(error, Error::Json(_)));
        assert!(!error.is_transport());
    }

    #[test]
    fn test_error_is_transport() {
        assert!(Error::Http(500).is_transport());
        assert!(Error::Transport("connection refused".to_string()).is_transport());
        assert!(Error::InvalidResponse("not json".to_string()).is_transport());
        assert!(!Error::EmptySelection.is_transport());
        assert!(!Error::Config("x".to_string()).is_transport());
    }
}
