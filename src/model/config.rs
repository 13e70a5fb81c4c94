use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

/// Base URL of the task API when nothing else is configured
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Configuration from config.toml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL the `/tasks` endpoints hang off
    pub api_url: String,
    /// Per-request timeout in seconds; 0 waits forever
    pub timeout_secs: u64,
    /// Default tracing filter, overridden by RUST_LOG
    pub log_level: String,
    /// Where the TUI writes its log (default: user cache dir)
    pub log_file: Option<PathBuf>,
    pub ui: UiConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: DEFAULT_API_URL.to_string(),
            timeout_secs: 30,
            log_level: "warn".to_string(),
            log_file: None,
            ui: UiConfig::default(),
        }
    }
}

impl Config {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UiConfig {
    /// Theme color overrides, e.g. `highlight = "#FB4196"`
    #[serde(default)]
    pub colors: HashMap<String, String>,
}
