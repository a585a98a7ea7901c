use crate::error::{ExtractError, Result};
use invoice_extract_common::FlowConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// ベースURLを上書きする環境変数
pub const API_URL_ENV: &str = "INVOICE_EXTRACT_API_URL";

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
    pub timeout_seconds: u64,
    /// 単一抽出で通信失敗時にデモ結果を表示するか
    pub demo_fallback: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            timeout_seconds: 120,
            demo_fallback: false,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            log::debug!("config loaded from {}", path.display());
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| ExtractError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("invoice-extract").join("config.json"))
    }

    /// 実際に使うベースURL（環境変数を優先）
    pub fn api_base(&self) -> String {
        self.resolve_base_url(std::env::var(API_URL_ENV).ok())
    }

    fn resolve_base_url(&self, env_value: Option<String>) -> String {
        env_value
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| self.base_url.clone())
    }

    /// フロー設定（`--demo` 指定時は設定に関わらずデモ表示を有効にする）
    pub fn flow_config(&self, api_url: Option<&str>, demo: bool) -> FlowConfig {
        FlowConfig {
            api_base: api_url.map(str::to_string).unwrap_or_else(|| self.api_base()),
            demo_fallback: demo || self.demo_fallback,
        }
    }

    pub fn set_base_url(&mut self, url: String) -> Result<()> {
        let url = url.trim().trim_end_matches('/').to_string();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ExtractError::Config(format!(
                "URLは http:// または https:// で始めてください: {}",
                url
            )));
        }
        self.base_url = url;
        self.save()
    }

    pub fn set_demo_fallback(&mut self, enabled: bool) -> Result<()> {
        self.demo_fallback = enabled;
        self.save()
    }
}
