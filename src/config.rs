use crate::error::{Result, SyncError};
use catalog_image_common::DEFAULT_IMAGE_URL;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const ENV_BASE_URL: &str = "CATALOG_SYNC_BASE_URL";
const ENV_DEFAULT_IMAGE: &str = "CATALOG_SYNC_DEFAULT_IMAGE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 画像URLの接頭辞（フォルダ一覧から生成するURLに使う）
    pub base_url: Option<String>,
    /// 照合できなかった商品の画像
    pub default_image: String,
    /// 追加の色エイリアスJSON
    pub alias_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: None,
            default_image: DEFAULT_IMAGE_URL.into(),
            alias_file: None,
        }
    }
}

impl Config {
    /// 設定ファイルを読み込み、環境変数で上書きする
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        let config = Self::load_from(&config_path)?;
        Ok(config.with_env_overrides(|key| std::env::var(key).ok()))
    }

    /// 指定パスから読み込み（存在しなければ既定値）
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
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

    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| SyncError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("catalog-sync").join("config.json"))
    }

    /// 環境変数を優先
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_BASE_URL).filter(|v| !v.trim().is_empty()) {
            self.base_url = Some(url);
        }
        if let Some(image) = lookup(ENV_DEFAULT_IMAGE).filter(|v| !v.trim().is_empty()) {
            self.default_image = image;
        }
        self
    }
}
