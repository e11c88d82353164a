//! Configuration loader for Nosh.
//!
//! Reads `config.toml` and deserializes it into [`NoshConfig`]. Falls back to
//! defaults when the file is missing or malformed.

use std::path::{Path, PathBuf};

use nosh_types::config::NoshConfig;
use nosh_types::error::ConfigError;

/// Environment variable overriding the config file location.
pub const CONFIG_ENV_VAR: &str = "NOSH_CONFIG";

/// Resolve the config file path.
///
/// Priority:
/// 1. Explicit path (`--config`)
/// 2. `$NOSH_CONFIG`
/// 3. `~/.nosh/config.toml`
pub fn resolve_config_path(explicit: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        if !path.is_empty() {
            return Ok(PathBuf::from(path));
        }
    }

    dirs::home_dir()
        .map(|home| home.join(".nosh").join("config.toml"))
        .ok_or_else(|| ConfigError::Missing("home directory for ~/.nosh/config.toml".to_string()))
}

/// Strictly read `path`.
///
/// Returns `Ok(None)` when the file does not exist.
pub async fn read_config(path: &Path) -> Result<Option<NoshConfig>, ConfigError> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(ConfigError::Read {
                path: path.display().to_string(),
                message: err.to_string(),
            });
        }
    };

    toml::from_str::<NoshConfig>(&content)
        .map(Some)
        .map_err(|err| ConfigError::Parse {
            path: path.display().to_string(),
            message: err.to_string(),
        })
}

/// Load configuration from `path`.
///
/// - If the file does not exist, returns [`NoshConfig::default()`].
/// - If the file exists but cannot be read or parsed, logs a warning and returns the default.
/// - Otherwise returns the parsed config.
pub async fn load_config(path: &Path) -> NoshConfig {
    match read_config(path).await {
        Ok(Some(config)) => {
            tracing::debug!("Loaded config from {}", path.display());
            config
        }
        Ok(None) => {
            tracing::debug!("No config.toml found at {}, using defaults", path.display());
            NoshConfig::default()
        }
        Err(err) => {
            tracing::warn!("{err}, using defaults");
            NoshConfig::default()
        }
    }
}
