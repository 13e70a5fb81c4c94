use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::Config;

/// Environment variable that overrides `api_url` from the config file
pub const API_URL_ENV: &str = "TASKDECK_API_URL";

/// Error type for config loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// `<config dir>/taskdeck/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("taskdeck").join("config.toml"))
}

/// Read and parse a config file. Missing keys take their defaults.
pub fn read_config(path: &Path) -> Result<Config, ConfigError> {
    let text = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Resolve the effective config: defaults, then the file, then the environment.
///
/// An explicit path must exist. The default path is only read if present.
pub fn load_config(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    let mut config = match explicit {
        Some(path) => read_config(path)?,
        None => match default_config_path() {
            Some(path) if path.exists() => read_config(&path)?,
            _ => Config::default(),
        },
    };
    apply_env(&mut config, std::env::var(API_URL_ENV).ok());
    Ok(config)
}

fn apply_env(config: &mut Config, api_url: Option<String>) {
    if let Some(url) = api_url.filter(|u| !u.trim().is_empty()) {
        config.api_url = url;
    }
}
