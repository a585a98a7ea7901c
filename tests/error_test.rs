//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use invoice_extract::error::ExtractError;
use invoice_extract::scanner;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

/// 存在しないファイル
#[test]
fn test_inspect_nonexistent_file() {
    let err = scanner::inspect_file(Path::new("/nonexistent/path/12345.pdf")).unwrap_err();
    assert!(matches!(err, ExtractError::FileNotFound(_)));
}

/// PDFのないフォルダ
#[test]
fn test_collect_folder_without_pdfs() {
    let dir = tempdir().expect("Failed to create temp dir");
    std::fs::write(dir.path().join("test.txt"), "hello").unwrap();
    std::fs::write(dir.path().join("data.json"), "{}").unwrap();

    let err = scanner::collect_inputs(&[dir.path().to_path_buf()]).unwrap_err();
    assert!(matches!(err, ExtractError::NoPdfFound(_)));
}

/// ファイルとフォルダの混在
#[test]
fn test_collect_mixed_inputs() {
    let dir = tempdir().expect("Failed to create temp dir");
    let folder = dir.path().join("invoices");
    std::fs::create_dir(&folder).unwrap();
    std::fs::write(folder.join("b.pdf"), "%PDF").unwrap();
    std::fs::write(folder.join("a.pdf"), "%PDF").unwrap();
    let single = dir.path().join("extra.pdf");
    std::fs::write(&single, "%PDF").unwrap();

    let files = scanner::collect_inputs(&[single, folder]).unwrap();
    let names: Vec<_> = files.iter().map(|f| f.meta.name.as_str()).collect();
    assert_eq!(names, vec!["extra.pdf", "a.pdf", "b.pdf"]);
}

/// ExtractErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        ExtractError::Config("テスト設定エラー".to_string()),
        ExtractError::FileNotFound("test.pdf".to_string()),
        ExtractError::NoPdfFound("/path/to/folder".to_string()),
        ExtractError::Rejected("Please select a PDF file".to_string()),
        ExtractError::Failed("Failed to extract data: HTTP error! status: 500".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: ExtractError = io_err.into();

    assert!(matches!(err, ExtractError::Io(_)));
    assert!(format!("{}", err).contains("IO"));
}

/// common::Errorからの変換（メッセージはそのまま）
#[test]
fn test_common_error_transparent() {
    let err: ExtractError = invoice_extract_common::Error::EmptySelection.into();

    assert!(matches!(err, ExtractError::Api(_)));
    assert_eq!(format!("{}", err), "Please select at least one PDF file.");
}

/// 設定ファイルの保存先
#[test]
fn test_config_path_layout() {
    if let Ok(path) = invoice_extract::config::Config::config_path() {
        assert!(path.ends_with(PathBuf::from(".config/invoice-extract/config.json")));
    }
}
