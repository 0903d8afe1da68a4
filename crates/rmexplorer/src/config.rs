//! Configuration loading and types

use std::path::{Path, PathBuf};

use rmexplorer_client::DEFAULT_BASE_URL;
use serde::{Deserialize, Serialize};
use url::Url;

/// Top-level configuration for the explorer server
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Upstream API settings
    #[serde(default)]
    pub api: ApiConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address and port to bind to
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Externally visible origin, used to build page addresses
    #[serde(default = "default_public_url")]
    pub public_url: String,
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            public_url: default_public_url(),
            log_level: default_log_level(),
        }
    }
}

/// Upstream API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Root of the REST API
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_public_url() -> String {
    "http://127.0.0.1:8080/".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Config {
    /// Load configuration from file
    ///
    /// # Errors
    /// Returns error if file cannot be read or parsed
    pub fn load(path: &Path) -> eyre::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load from default paths or use defaults
    ///
    /// Also returns the file the configuration came from, `None` when the
    /// defaults were used.
    ///
    /// # Errors
    /// Returns error if a found file cannot be read or parsed
    pub fn load_default() -> eyre::Result<(Self, Option<PathBuf>)> {
        if let Ok(path) = std::env::var("RMEXPLORER_CONFIG") {
            let path = PathBuf::from(path);
            return Ok((Self::load(&path)?, Some(path)));
        }

        Self::load_first([
            PathBuf::from("rmexplorer.toml"),
            PathBuf::from("/etc/rmexplorer/rmexplorer.toml"),
            dirs::config_dir()
                .map(|p| p.join("rmexplorer/rmexplorer.toml"))
                .unwrap_or_default(),
        ])
    }

    /// Load the first existing file among `paths`, or the defaults
    fn load_first(
        paths: impl IntoIterator<Item = PathBuf>,
    ) -> eyre::Result<(Self, Option<PathBuf>)> {
        for path in paths {
            if path.is_file() {
                return Ok((Self::load(&path)?, Some(path)));
            }
        }
        Ok((Config::default(), None))
    }

    /// Parsed public origin
    ///
    /// # Errors
    /// Returns error if `server.public_url` is not an absolute URL
    pub fn public_url(&self) -> eyre::Result<Url> {
        Ok(Url::parse(&self.server.public_url)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.bind, "127.0.0.1:8080");
        assert_eq!(config.api.base_url, "https://rickandmortyapi.com/api/");
        assert_eq!(config.api.timeout_secs, 10);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [server]
            bind = "0.0.0.0:3000"

            [api]
            timeout_secs = 3
            "#,
        )
        .unwrap();
        assert_eq!(config.server.bind, "0.0.0.0:3000");
        assert_eq!(config.server.log_level, "info");
        assert_eq!(config.api.timeout_secs, 3);
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_missing_files_fall_back_to_defaults() {
        let (config, source) =
            Config::load_first([PathBuf::from("/nonexistent/rmexplorer.toml")]).unwrap();
        assert_eq!(source, None);
        assert_eq!(config.server.bind, Config::default().server.bind);
    }

    #[test]
    fn test_public_url_must_be_absolute() {
        let mut config = Config::default();
        assert!(config.public_url().is_ok());
        config.server.public_url = "/relative".to_string();
        assert!(config.public_url().is_err());
    }
}
