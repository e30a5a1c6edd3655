//! Global configuration loader.
//!
//! Reads `config.toml` from the data directory (`~/.scenewright/` by
//! default) and deserializes it into [`GlobalConfig`]. Falls back to
//! defaults when the file is missing or malformed.

use std::path::{Path, PathBuf};

use secrecy::SecretString;

use scenewright_types::config::{GlobalConfig, ProviderSettings};

/// Resolve the data directory: `SCENEWRIGHT_DATA_DIR` if set, otherwise
/// `~/.scenewright`.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("SCENEWRIGHT_DATA_DIR") {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".scenewright")
}

/// Default database URL inside the data directory.
pub fn default_database_url(data_dir: &Path) -> String {
    format!("sqlite://{}?mode=rwc", data_dir.join("scenewright.db").display())
}

/// Load global configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`GlobalConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns
///   the default.
pub async fn load_global_config(data_dir: &Path) -> GlobalConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return GlobalConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return GlobalConfig::default();
        }
    };

    match toml::from_str::<GlobalConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            GlobalConfig::default()
        }
    }
}

/// Read the provider API key from the configured environment variable.
pub fn api_key_from_env(settings: &ProviderSettings) -> Result<SecretString, String> {
    match std::env::var(&settings.api_key_env) {
        Ok(key) if !key.trim().is_empty() => Ok(SecretString::from(key)),
        _ => Err(format!(
            "no API key found: set the {} environment variable",
            settings.api_key_env
        )),
    }
}
