use std::path::PathBuf;

use tracing::trace;

/// Storage backend configuration
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum StorageConfig {
    /// In-memory storage (no persistence)
    #[serde(rename = "none")]
    None,

    /// JSON file store (default)
    Json {
        /// Path to the store file
        #[serde(default = "default_store_path")]
        path: PathBuf,
    },
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig::Json {
            path: default_store_path(),
        }
    }
}

fn default_store_path() -> PathBuf {
    crate::util::get_default_store_path()
}

#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct Config {
    /// Storage configuration (optional - defaults to the JSON file store)
    pub storage: Option<StorageConfig>,

    /// Drop-scan configuration (optional - defaults apply)
    pub scan: Option<ScanConfig>,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct ScanConfig {
    /// Drop percentage at or above which an alert is raised
    #[serde(default = "default_threshold")]
    pub threshold: i32,

    /// Auto-scan interval in seconds (absent = no periodic scanning)
    pub interval: Option<u64>,

    /// Keyword terms fed into generated briefs
    pub keywords: Option<Vec<String>>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            interval: None,
            keywords: None,
        }
    }
}

fn default_threshold() -> i32 {
    crate::util::get_drop_threshold()
}

pub fn read_config_file(path: &str) -> anyhow::Result<Config> {
    let file_content = std::fs::read_to_string(path)?;
    serde_json::from_str(&file_content)
        .map_err(|_| anyhow::anyhow!("Invalid configuration file provided!"))
        .inspect(|config| trace!("loaded config: {config:?}"))
}
