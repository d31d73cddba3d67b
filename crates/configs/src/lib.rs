use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the per-collection JSON files.
    pub data_dir: String,
    #[serde(default = "default_users_file")]
    pub users_file: String,
    #[serde(default = "default_books_file")]
    pub books_file: String,
    #[serde(default = "default_reviews_file")]
    pub reviews_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: "data".into(),
            users_file: default_users_file(),
            books_file: default_books_file(),
            reviews_file: default_reviews_file(),
        }
    }
}

fn default_users_file() -> String { "users.json".into() }
fn default_books_file() -> String { "books.json".into() }
fn default_reviews_file() -> String { "reviews.json".into() }

pub fn load_default() -> Result<AppConfig> {
    let _ = dotenvy::dotenv();
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    if std::path::Path::new(&path).exists() {
        load_from_file(&path)
    } else {
        Ok(AppConfig::default())
    }
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.storage.normalize_from_env();
        self.storage.validate()?;
        Ok(())
    }
}

impl StorageConfig {
    /// `DATA_DIR` overrides whatever the TOML provided.
    pub fn normalize_from_env(&mut self) {
        if let Ok(dir) = std::env::var("DATA_DIR") {
            if !dir.trim().is_empty() {
                self.data_dir = dir;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.data_dir.trim().is_empty() {
            return Err(anyhow!("storage.data_dir must not be empty"));
        }
        for (key, name) in [
            ("storage.users_file", &self.users_file),
            ("storage.books_file", &self.books_file),
            ("storage.reviews_file", &self.reviews_file),
        ] {
            if name.trim().is_empty() {
                return Err(anyhow!("{key} must not be empty"));
            }
        }
        Ok(())
    }

    pub fn users_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join(&self.users_file)
    }

    pub fn books_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join(&self.books_file)
    }

    pub fn reviews_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join(&self.reviews_file)
    }
}
