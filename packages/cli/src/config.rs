use pagecraft_workspace::{FileStore, DEFAULT_AUTOSAVE_DELAY};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_CONFIG_NAME: &str = "pagecraft.config.json";

/// Pagecraft configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory holding one JSON file per project
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Prefix of published share urls
    #[serde(default = "default_share_base_url")]
    pub share_base_url: String,

    /// Quiet period before an edit is saved
    #[serde(default = "default_autosave_delay_ms")]
    pub autosave_delay_ms: u64,
}

fn default_data_dir() -> String {
    ".pagecraft".to_string()
}

fn default_share_base_url() -> String {
    "http://localhost:4000".to_string()
}

fn default_autosave_delay_ms() -> u64 {
    DEFAULT_AUTOSAVE_DELAY.as_millis() as u64
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    /// Get absolute path to the data directory
    pub fn get_data_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.data_dir)
    }

    pub fn autosave_delay(&self) -> Duration {
        Duration::from_millis(self.autosave_delay_ms)
    }

    pub fn open_store(&self, cwd: &str) -> anyhow::Result<FileStore> {
        Ok(FileStore::open(self.get_data_dir(cwd))?)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            share_base_url: default_share_base_url(),
            autosave_delay_ms: default_autosave_delay_ms(),
        }
    }
}
