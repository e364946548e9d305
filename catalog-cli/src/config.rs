//! CLI configuration
//!
//! Settings come from three places, highest precedence first:
//! - Command line flags and their environment variables
//! - The TOML file at `~/.catalog/config.toml` (or `--config PATH`)
//! - Built-in defaults

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default catalog API root
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8585/api/v1";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Contents of the config file; every key is optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileConfig {
    pub server_url: Option<String>,
    pub timeout_secs: Option<u64>,

    /// Bearer token sent with every request
    pub token: Option<String>,
}

impl FileConfig {
    pub fn from_toml(path: &Path, content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// `~/.catalog/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".catalog").join("config.toml"))
}

/// Load the config file
///
/// An explicitly requested file must exist. The default file is optional.
pub fn load_file(explicit: Option<&Path>) -> Result<FileConfig, ConfigError> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match default_config_path() {
            Some(path) if path.exists() => path,
            _ => return Ok(FileConfig::default()),
        },
    };

    let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;
    tracing::debug!("Loaded config from {}", path.display());
    FileConfig::from_toml(&path, &content)
}

/// Effective settings after applying precedence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    pub server_url: String,
    pub timeout_secs: u64,
    pub token: Option<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            token: None,
        }
    }
}

/// Values supplied on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub server_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub token: Option<String>,
}

impl CatalogConfig {
    pub fn resolve(file: FileConfig, overrides: ConfigOverrides) -> Self {
        let defaults = Self::default();
        Self {
            server_url: overrides
                .server_url
                .or(file.server_url)
                .unwrap_or(defaults.server_url),
            timeout_secs: overrides
                .timeout_secs
                .or(file.timeout_secs)
                .unwrap_or(defaults.timeout_secs),
            token: overrides.token.or(file.token),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = CatalogConfig::resolve(FileConfig::default(), ConfigOverrides::default());
        assert_eq!(config.server_url, "http://localhost:8585/api/v1");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.token, None);
    }

    #[test]
    fn test_flags_override_file() {
        let file = FileConfig {
            server_url: Some("http://catalog.internal:8585/api/v1".to_string()),
            timeout_secs: Some(10),
            token: Some("file-token".to_string()),
        };
        let overrides = ConfigOverrides {
            server_url: Some("http://localhost:9000/api/v1".to_string()),
            ..Default::default()
        };

        let config = CatalogConfig::resolve(file, overrides);
        assert_eq!(config.server_url, "http://localhost:9000/api/v1");
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.token.as_deref(), Some("file-token"));
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "server_url = \"http://example:8585/api/v1\"\ntimeout_secs = 5\n").unwrap();

        let file = load_file(Some(&path)).unwrap();
        assert_eq!(file.server_url.as_deref(), Some("http://example:8585/api/v1"));
        assert_eq!(file.timeout_secs, Some(5));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempdir().unwrap();
        let err = load_file(Some(&dir.path().join("missing.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_invalid_toml() {
        let err = FileConfig::from_toml(Path::new("bad.toml"), "timeout_secs = \"soon\"").unwrap_err();
        assert!(err.to_string().contains("bad.toml"));
    }
}
