//! 入力パスの解決（ファイル / フォルダ）

use crate::error::{ExtractError, Result};
use invoice_extract_common::intake::PDF_MIME_TYPE;
use invoice_extract_common::{FileHandle, FileMeta};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// ローカルのPDF候補
#[derive(Debug, Clone)]
pub struct LocalFile {
    pub path: PathBuf,
    pub meta: FileMeta,
}

impl LocalFile {
    pub fn read(&self) -> Result<Vec<u8>> {
        Ok(std::fs::read(&self.path)?)
    }
}

impl FileHandle for LocalFile {
    fn name(&self) -> String {
        self.meta.name.clone()
    }

    fn size(&self) -> u64 {
        self.meta.size
    }

    fn mime_type(&self) -> String {
        self.meta.mime_type.clone()
    }
}

/// 拡張子からMIMEタイプを決める
pub fn mime_for_path(path: &Path) -> &'static str {
    match path.extension() {
        Some(ext) if ext.eq_ignore_ascii_case("pdf") => PDF_MIME_TYPE,
        _ => "application/octet-stream",
    }
}

/// 1ファイルの情報を取得
pub fn inspect_file(path: &Path) -> Result<LocalFile> {
    if !path.is_file() {
        return Err(ExtractError::FileNotFound(path.display().to_string()));
    }

    let size = std::fs::metadata(path)?.len();
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    Ok(LocalFile {
        path: path.to_path_buf(),
        meta: FileMeta::new(name, size, mime_for_path(path)),
    })
}

/// フォルダ直下のPDFを列挙
pub fn scan_folder(folder: &Path) -> Result<Vec<LocalFile>> {
    if !folder.is_dir() {
        return Err(ExtractError::FileNotFound(folder.display().to_string()));
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(folder)
        .max_depth(1) // 直下のみ（再帰しない）
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if path.is_file() && mime_for_path(path) == PDF_MIME_TYPE {
            files.push(inspect_file(path)?);
        }
    }

    // ファイル名でソート
    files.sort_by(|a, b| a.meta.name.cmp(&b.meta.name));

    Ok(files)
}

/// コマンドライン引数のパスを展開
///
/// ファイルはそのまま（PDF以外も受付側で警告させる）、フォルダは直下のPDFに展開する。
pub fn collect_inputs(paths: &[PathBuf]) -> Result<Vec<LocalFile>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            let found = scan_folder(path)?;
            log::debug!("{}: {} PDF(s)", path.display(), found.len());
            files.extend(found);
        } else {
            files.push(inspect_file(path)?);
        }
    }

    if files.is_empty() {
        let joined = paths
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        return Err(ExtractError::NoPdfFound(joined));
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_mime_for_path() {
        assert_eq!(mime_for_path(Path::new("a.pdf")), PDF_MIME_TYPE);
        assert_eq!(mime_for_path(Path::new("A.PDF")), PDF_MIME_TYPE);
        assert_eq!(mime_for_path(Path::new("scan.png")), "application/octet-stream");
        assert_eq!(mime_for_path(Path::new("noext")), "application/octet-stream");
    }

    #[test]
    fn test_scan_folder_pdfs_only() {
        let dir = tempdir().expect("Failed to create temp dir");
        fs::write(dir.path().join("b.pdf"), b"%PDF-1.4 b").unwrap();
        fs::write(dir.path().join("a.PDF"), b"%PDF-1.4").unwrap();
        fs::write(dir.path().join("notes.txt"), b"hello").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub").join("c.pdf"), b"%PDF").unwrap();

        let files = scan_folder(dir.path()).unwrap();
        let names: Vec<_> = files.iter().map(|f| f.name()).collect();
        assert_eq!(names, vec!["a.PDF", "b.pdf"]);
        assert_eq!(files[1].size(), 10);
    }

    #[test]
    fn test_collect_keeps_explicit_non_pdf() {
        let dir = tempdir().expect("Failed to create temp dir");
        let png = dir.path().join("photo.png");
        fs::write(&png, b"png").unwrap();

        let files = collect_inputs(&[png]).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].mime_type(), "application/octet-stream");
    }

    #[test]
    fn test_collect_missing_path() {
        let err = collect_inputs(&[PathBuf::from("/nonexistent/12345.pdf")]).unwrap_err();
        assert!(matches!(err, ExtractError::FileNotFound(_)));
    }

    #[test]
    fn test_collect_empty_folder() {
        let dir = tempdir().expect("Failed to create temp dir");
        let err = collect_inputs(&[dir.path().to_path_buf()]).unwrap_err();
        assert!(matches!(err, ExtractError::NoPdfFound(_)));
    }
}
