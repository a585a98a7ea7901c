//! invoice-extract: PDF請求書・文書データ抽出APIのCLIクライアント

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod report;
pub mod runner;
pub mod scanner;
