use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("PDFが見つかりません: {0}")]
    NoPdfFound(String),

    /// 単一ファイルの受付で却下された（メッセージはそのまま表示）
    #[error("{0}")]
    Rejected(String),

    /// 抽出・エクスポートの失敗（"Failed to ..." の形で表示）
    #[error("{0}")]
    Failed(String),

    #[error(transparent)]
    Api(#[from] invoice_extract_common::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ExtractError>;
