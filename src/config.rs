use crate::error::{Result, Top100Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use top100_common::dataset::{CURRENT_YEAR, FALLBACK_YEAR};
use top100_common::pwl::DEFAULT_API_BASE;

/// データディレクトリを上書きする環境変数
pub const DATA_DIR_ENV: &str = "TOP100_DATA_DIR";

/// PWLセッションを上書きする環境変数
pub const PWL_SESSION_ENV: &str = "TOP100_PWL_SESSION";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// `wines-<year>.json` を置くディレクトリ
    pub data_dir: Option<PathBuf>,
    /// 最新の年度
    pub current_year: i32,
    /// 読み込み失敗時の代替年度
    pub fallback_year: i32,
    /// PWL APIのベースURL
    pub api_base: String,
    /// PWLのセッションCookie（wso_session）
    pub pwl_session: Option<String>,
    /// テイスティング記録の保存先
    pub record_path: Option<PathBuf>,
    /// PWL送信のタイムアウト（秒）
    pub timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            current_year: CURRENT_YEAR,
            fallback_year: FALLBACK_YEAR,
            api_base: DEFAULT_API_BASE.into(),
            pwl_session: None,
            record_path: None,
            timeout_seconds: 30,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// 指定パスから読み込み（無ければデフォルト）
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

    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| Top100Error::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("top100"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// データディレクトリ（環境変数 → 設定 → ./data）
    pub fn data_dir(&self) -> PathBuf {
        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            if !dir.trim().is_empty() {
                return PathBuf::from(dir);
            }
        }
        self.data_dir.clone().unwrap_or_else(|| PathBuf::from("data"))
    }

    /// テイスティング記録ファイル（未設定なら設定ディレクトリ内）
    pub fn record_path(&self) -> Result<PathBuf> {
        match &self.record_path {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::config_dir()?.join("tasting-record.json")),
        }
    }

    /// PWLセッション（環境変数を優先）
    pub fn pwl_session(&self) -> Option<String> {
        if let Ok(session) = std::env::var(PWL_SESSION_ENV) {
            if !session.trim().is_empty() {
                return Some(session);
            }
        }
        self.pwl_session.clone()
    }
}
