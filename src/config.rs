use crate::error::{MatcherError, Result};
use rfp_matcher_common::DEFAULT_TOP_N;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// カタログパスを上書きする環境変数
pub const CATALOG_PATH_ENV: &str = "OEM_PRODUCTS_PATH";
/// カタログパスの既定値
pub const DEFAULT_CATALOG_PATH: &str = "data/oem_products.csv";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub catalog_path: Option<PathBuf>,
    pub top_n: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: None,
            top_n: DEFAULT_TOP_N,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| MatcherError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("rfp-matcher").join("config.json"))
    }

    /// カタログパスを解決
    ///
    /// 優先順位: 引数 > 環境変数 > 設定ファイル > 既定値
    pub fn resolve_catalog_path(&self, cli_path: Option<&Path>) -> PathBuf {
        self.resolve_catalog_path_with(cli_path, std::env::var(CATALOG_PATH_ENV).ok())
    }

    /// 環境変数の値を渡してカタログパスを解決（空白のみの値は未設定扱い）
    pub fn resolve_catalog_path_with(&self, cli_path: Option<&Path>, env_value: Option<String>) -> PathBuf {
        if let Some(path) = cli_path {
            return path.to_path_buf();
        }

        if let Some(path) = env_value.filter(|v| !v.trim().is_empty()) {
            return PathBuf::from(path);
        }

        self.catalog_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOG_PATH))
    }

    /// 候補数を解決（引数 > 設定ファイル）
    pub fn resolve_top_n(&self, cli_top_n: Option<usize>) -> usize {
        cli_top_n.unwrap_or(self.top_n)
    }

    pub fn set_catalog_path(&mut self, path: PathBuf) -> Result<()> {
        self.catalog_path = Some(path);
        self.save()
    }

    pub fn set_top_n(&mut self, top_n: usize) -> Result<()> {
        if top_n == 0 {
            return Err(MatcherError::Config("候補数は1以上を指定してください".into()));
        }
        self.top_n = top_n;
        self.save()
    }
}
