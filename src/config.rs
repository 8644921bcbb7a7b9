//! Toolkit configuration, loaded from a JSON file with defaults for anything missing.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Key the report collection lives under, shared with the website's local storage layout.
pub const DEFAULT_STORAGE_KEY: &str = "scamReports";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Data directory (encrypted report store)
    pub data_dir: PathBuf,
    /// Report storage backend
    pub storage: StorageConfig,
    /// CSV export
    pub export: ExportConfig,
    /// Risk assessment thresholds
    pub risk: RiskConfig,
    /// Logging
    pub log: LogConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// Encrypted SQLite key-value table under `data_dir`
    Sqlite,
    /// Process-local map for tests and dry runs. Each CLI invocation starts empty,
    /// so `list` never sees what an earlier `submit` stored.
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Key holding the JSON array of reports
    pub key: String,
    /// Maximum encoded size of a stored value, in bytes
    pub quota_bytes: Option<usize>,
    /// Store secret; `SCAMAWARE_STORE_SECRET` takes precedence
    pub secret: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory CSV exports are written to (current directory when unset)
    pub out_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    /// Scores strictly above this are flagged as likely suspicious
    pub suspicious_threshold: u32,
    /// Upper clamp for the summed score
    pub max_score: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub json: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".scamaware"),
            storage: StorageConfig::default(),
            export: ExportConfig::default(),
            risk: RiskConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Sqlite,
            key: DEFAULT_STORAGE_KEY.to_string(),
            quota_bytes: None,
            secret: None,
        }
    }
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            suspicious_threshold: 30,
            max_score: 100,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Load from JSON file if present; otherwise return default
    pub fn load(path: &std::path::Path) -> Self {
        if path.exists() {
            if let Ok(data) = std::fs::read_to_string(path) {
                if let Ok(c) = serde_json::from_str::<AppConfig>(&data) {
                    return c;
                }
            }
        }
        Self::default()
    }

    /// Store secret: environment first, then config.
    pub fn store_secret(&self) -> Option<String> {
        std::env::var("SCAMAWARE_STORE_SECRET")
            .ok()
            .filter(|s| !s.is_empty())
            .or_else(|| self.storage.secret.clone())
    }
}
