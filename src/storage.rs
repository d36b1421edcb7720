use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{Result, Context};

use crate::config::AppConfig;

pub const CONFIG_FILE: &str = "config.yml";

/// `$ROOT/config.yml`, with ROOT defaulting to the working directory
pub fn default_config_path() -> PathBuf {
    let root = std::env::var("ROOT").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(root).join(CONFIG_FILE)
}

pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {:?}", path))?;

    parse_config(&content).with_context(|| format!("Failed to parse config {:?}", path))
}

pub fn parse_config(content: &str) -> Result<AppConfig> {
    // An empty file is a valid all-defaults config
    if content.trim().is_empty() {
        return Ok(AppConfig::default());
    }
    let config: AppConfig = serde_yaml::from_str(content)
        .with_context(|| "Failed to parse config YAML")?;
    Ok(config)
}

/// Loads `path` if given, else the default location if it exists, else defaults
pub fn load_config_or_default(path: Option<&Path>) -> Result<AppConfig> {
    match path {
        Some(path) => load_config(path),
        None => {
            let path = default_config_path();
            if path.exists() {
                load_config(&path)
            } else {
                Ok(AppConfig::default())
            }
        }
    }
}
