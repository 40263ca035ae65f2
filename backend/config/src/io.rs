//! Config file location and loading.

use crate::schema::BotConfig;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Default config file name in the working directory.
pub const CONFIG_FILE_NAME: &str = "prestigebot.yaml";

/// Env var overriding the config file location.
pub const CONFIG_PATH_VAR: &str = "PRESTIGEBOT_CONFIG";

/// Resolve the config file path.
/// Priority: explicit path > `PRESTIGEBOT_CONFIG` env > `./prestigebot.yaml`
/// > `~/.prestigebot/config.yaml` (if it exists).
pub fn resolve_config_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    if let Ok(path) = std::env::var(CONFIG_PATH_VAR) {
        return PathBuf::from(path);
    }
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(home) = dirs::home_dir() {
        let user = home.join(".prestigebot").join("config.yaml");
        if user.exists() {
            return user;
        }
    }
    local
}

/// Load and parse the config from disk.
///
/// Returns `Ok(Default::default())` if the file doesn't exist.
pub async fn load_config(path: &Path) -> Result<BotConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "Config file does not exist; using defaults");
        return Ok(BotConfig::default());
    }

    let raw = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: BotConfig = if raw.trim().is_empty() {
        BotConfig::default()
    } else {
        serde_yaml::from_str(&raw)
            .with_context(|| format!("Failed to parse config YAML at: {}", path.display()))?
    };

    info!(path = %path.display(), "Loaded config");
    Ok(config)
}
