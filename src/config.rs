use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    /// Free-form label for the loaded profile.
    pub profile_name: String,
    pub api: ApiSettings,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            profile_name: "base".to_string(),
            api: ApiSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    pub base_url: String,
    pub timeout_secs: u64,
    /// Rows kept per search; the backend caps result pages at 500
    pub result_limit: usize,
    /// Rows enriched with a prediction request per search
    pub predict_limit: usize,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            timeout_secs: 30,
            result_limit: 500,
            predict_limit: 20,
        }
    }
}

pub fn load_config(path: Option<&Path>) -> Result<ExplorerConfig, ConfigError> {
    if let Some(path) = path {
        load_config_from_path(path)
    } else {
        Ok(default_config().clone())
    }
}

pub fn load_config_from_path(path: &Path) -> Result<ExplorerConfig, ConfigError> {
    let path_display = path.display().to_string();
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path_display.clone(),
        source,
    })?;

    toml::from_str::<ExplorerConfig>(&raw).map_err(|source| ConfigError::Parse {
        path: path_display,
        source,
    })
}

pub fn default_config() -> &'static ExplorerConfig {
    static DEFAULT_CONFIG: LazyLock<ExplorerConfig> = LazyLock::new(ExplorerConfig::default);
    &DEFAULT_CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = default_config();
        assert_eq!(config.profile_name, "base");
        assert_eq!(config.api.result_limit, 500);
        assert_eq!(config.api.predict_limit, 20);
    }

    #[test]
    fn test_partial_file_keeps_remaining_defaults() {
        let config: ExplorerConfig = toml::from_str(
            r#"
            profile_name = "staging"

            [api]
            base_url = "https://bioinsight-lite.onrender.com"
            "#,
        )
        .unwrap();
        assert_eq!(config.profile_name, "staging");
        assert_eq!(config.api.base_url, "https://bioinsight-lite.onrender.com");
        assert_eq!(config.api.timeout_secs, 30);
    }
}
