use crate::error::{SplitcutError, Result};
use serde::{Deserialize, Serialize};
use splitcut_common::DEFAULT_THUMBNAIL_COUNT;
use std::path::{Path, PathBuf};

pub const SERVER_ENV: &str = "SPLITCUT_SERVER";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server_url: String,
    pub thumbnail_count: u32,
    /// 未設定ならHTTPクライアントの既定値（タイムアウトなし）
    pub timeout_seconds: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8000".into(),
            thumbnail_count: DEFAULT_THUMBNAIL_COUNT,
            timeout_seconds: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// ファイルがなければ既定値
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
            .ok_or_else(|| SplitcutError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("splitcut").join("config.json"))
    }

    /// 接続先サーバー（CLI引数 > 環境変数 > 設定ファイル）
    pub fn resolve_server(&self, cli_override: Option<&str>) -> String {
        let env = std::env::var(SERVER_ENV).ok();
        self.resolve_server_with(cli_override, env.as_deref())
    }

    /// 環境変数の値を引数で受け取る版（空白のみの値は未設定扱い）
    pub fn resolve_server_with(&self, cli_override: Option<&str>, env: Option<&str>) -> String {
        if let Some(url) = cli_override {
            return url.to_string();
        }
        match env {
            Some(url) if !url.trim().is_empty() => url.to_string(),
            _ => self.server_url.clone(),
        }
    }

    pub fn set_server_url(&mut self, url: String) -> Result<()> {
        reqwest::Url::parse(&url).map_err(|e| SplitcutError::InvalidServerUrl(format!("{url}: {e}")))?;
        self.server_url = url;
        self.save()
    }
}
