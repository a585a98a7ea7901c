//! ファイル受付（バリデーションと選択リスト）
//!
//! - PDF以外は除外
//! - 50MB超は除外
//! - バッチは (名前, サイズ) で重複排除し、先頭50件まで

use crate::types::FileHandle;

pub const PDF_MIME_TYPE: &str = "application/pdf";

/// 1ファイルあたりの上限（50MB）
pub const MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// バッチの最大ファイル数
pub const MAX_BATCH_FILES: usize = 50;

/// 受付時の警告（処理は継続する）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntakeWarning {
    /// PDF以外が含まれていた
    NonPdfSkipped,
    /// サイズ超過
    TooLarge { name: String },
    /// 件数上限で切り捨てた
    LimitExceeded,
}

impl IntakeWarning {
    pub fn message(&self) -> String {
        match self {
            IntakeWarning::NonPdfSkipped => {
                "Only PDF files are allowed. Some files were skipped.".to_string()
            }
            IntakeWarning::TooLarge { name } => {
                format!("File {} exceeds 50MB limit and was skipped.", name)
            }
            IntakeWarning::LimitExceeded => {
                format!("Maximum {} files allowed. Extra files were removed.", MAX_BATCH_FILES)
            }
        }
    }
}

/// 単一ファイルの却下理由
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntakeRejection {
    NotPdf { name: String },
    TooLarge { name: String },
}

impl IntakeRejection {
    pub fn message(&self) -> String {
        match self {
            IntakeRejection::NotPdf { .. } => "Please select a PDF file".to_string(),
            IntakeRejection::TooLarge { .. } => "File size must be less than 50MB".to_string(),
        }
    }
}

pub fn is_pdf<F: FileHandle>(file: &F) -> bool {
    file.mime_type() == PDF_MIME_TYPE
}

pub fn within_size_limit<F: FileHandle>(file: &F) -> bool {
    file.size() <= MAX_FILE_SIZE
}

/// 単一ファイル用のチェック
pub fn validate_single<F: FileHandle>(file: &F) -> Result<(), IntakeRejection> {
    if !is_pdf(file) {
        return Err(IntakeRejection::NotPdf { name: file.name() });
    }
    if !within_size_limit(file) {
        return Err(IntakeRejection::TooLarge { name: file.name() });
    }
    Ok(())
}

/// 選択中ファイル一覧（バッチ）
#[derive(Debug, Clone)]
pub struct SelectedFileSet<F> {
    files: Vec<F>,
    limit: usize,
}

impl<F> Default for SelectedFileSet<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F> SelectedFileSet<F> {
    pub fn new() -> Self {
        Self::with_limit(MAX_BATCH_FILES)
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            files: Vec::new(),
            limit,
        }
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn files(&self) -> &[F] {
        &self.files
    }

    pub fn iter(&self) -> std::slice::Iter<'_, F> {
        self.files.iter()
    }

    pub fn get(&self, index: usize) -> Option<&F> {
        self.files.get(index)
    }

    /// 指定位置のファイルを削除
    pub fn remove(&mut self, index: usize) -> Option<F> {
        if index < self.files.len() {
            Some(self.files.remove(index))
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }

    /// 1件だけの選択に置き換え（単一フロー）
    pub fn replace(&mut self, file: F) {
        self.files.clear();
        self.files.push(file);
    }
}

impl<F: FileHandle> SelectedFileSet<F> {
    pub fn contains_same(&self, file: &F) -> bool {
        let (name, size) = (file.name(), file.size());
        self.files.iter().any(|f| f.size() == size && f.name() == name)
    }

    /// ファイルを追加し、発生した警告を返す
    ///
    /// 無効なファイルがあっても残りの有効なファイルは追加される。
    pub fn add_files(&mut self, incoming: impl IntoIterator<Item = F>) -> Vec<IntakeWarning> {
        let incoming: Vec<F> = incoming.into_iter().collect();
        let mut warnings = Vec::new();

        let total = incoming.len();
        let pdfs: Vec<F> = incoming.into_iter().filter(|f| is_pdf(f)).collect();
        if pdfs.len() != total {
            warnings.push(IntakeWarning::NonPdfSkipped);
        }

        for file in pdfs {
            if !within_size_limit(&file) {
                log::debug!("skip oversize file: {} ({} bytes)", file.name(), file.size());
                warnings.push(IntakeWarning::TooLarge { name: file.name() });
                continue;
            }
            if !self.contains_same(&file) {
                self.files.push(file);
            }
        }

        if self.files.len() > self.limit {
            self.files.truncate(self.limit);
            warnings.push(IntakeWarning::LimitExceeded);
        }

        warnings
    }
}

impl<'a, F> IntoIterator for &'a SelectedFileSet<F> {
    type Item = &'a F;
    type IntoIter = std::slice::Iter<'a, F>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.iter()
    }
}
