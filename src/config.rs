use crate::error::{CaptionPrepError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const SERVER_ENV: &str = "CAPTION_PREP_SERVER";
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server_url: String,
    pub timeout_seconds: u64,
    pub default_project: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.into(),
            // 自動キャプションはモデルのロードを含むため長めにとる
            timeout_seconds: 120,
            default_project: None,
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
            .ok_or_else(|| CaptionPrepError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("caption-prep").join("config.json"))
    }

    /// 接続先URL
    ///
    /// 優先順: `--server` > 環境変数 > 設定ファイル
    pub fn resolve_server(&self, flag: Option<&str>) -> String {
        let env = std::env::var(SERVER_ENV).ok();
        Self::pick_server(flag, env.as_deref(), &self.server_url)
    }

    fn pick_server(flag: Option<&str>, env: Option<&str>, configured: &str) -> String {
        [flag, env]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|s| !s.is_empty())
            .unwrap_or(configured)
            .trim_end_matches('/')
            .to_string()
    }

    /// 使うプロジェクト（引数 > 設定ファイル）
    pub fn resolve_project(&self, flag: Option<&str>) -> Result<String> {
        flag.map(str::to_string)
            .or_else(|| self.default_project.clone())
            .filter(|p| !p.trim().is_empty())
            .ok_or(CaptionPrepError::MissingProject)
    }

    pub fn set_server(&mut self, url: String) -> Result<()> {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(CaptionPrepError::InvalidServerUrl(url));
        }
        self.server_url = url;
        Ok(())
    }

    pub fn set_default_project(&mut self, project: String) {
        self.default_project = Some(project).filter(|p| !p.trim().is_empty());
    }
}
