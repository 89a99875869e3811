use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Configuration from config.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Key the task list is stored under
    #[serde(default = "default_key")]
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig { key: default_key() }
    }
}

fn default_key() -> String {
    crate::io::task_store::TASKS_KEY.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Seconds a status message stays visible
    #[serde(default = "default_notice_secs")]
    pub notice_secs: u64,
    #[serde(default = "default_true")]
    pub show_key_hints: bool,
    /// Hex color overrides, e.g. `highlight = "#FB4196"`
    #[serde(default)]
    pub colors: BTreeMap<String, String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            notice_secs: default_notice_secs(),
            show_key_hints: true,
            colors: BTreeMap::new(),
        }
    }
}

fn default_notice_secs() -> u64 {
    3
}

fn default_true() -> bool {
    true
}
