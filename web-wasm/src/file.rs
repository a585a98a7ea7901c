//! ブラウザのファイルハンドル

use invoice_extract_common::FileHandle;
use web_sys::{File, FileList};

/// 選択された `web_sys::File`
#[derive(Debug, Clone)]
pub struct SelectedFile(pub File);

impl SelectedFile {
    pub fn file(&self) -> &File {
        &self.0
    }
}

impl FileHandle for SelectedFile {
    fn name(&self) -> String {
        self.0.name()
    }

    fn size(&self) -> u64 {
        self.0.size() as u64
    }

    fn mime_type(&self) -> String {
        self.0.type_()
    }
}

/// FileList → Vec
pub fn collect_files(list: &FileList) -> Vec<SelectedFile> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .map(SelectedFile)
        .collect()
}
