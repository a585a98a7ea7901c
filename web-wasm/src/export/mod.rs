//! ダウンロード処理

pub mod download;
