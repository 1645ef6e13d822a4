//! Configuration loading and resolution
//!
//! Settings resolve through a 4-tier priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)

use crate::{Error, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Default sentiment service base URL
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";

/// Default dashboard listen port
pub const DEFAULT_PORT: u16 = 5870;

/// Environment variable overriding the sentiment service base URL
pub const BACKEND_URL_ENV: &str = "SENTISCOPE_BACKEND_URL";

/// Environment variable overriding the dashboard listen port
pub const PORT_ENV: &str = "SENTISCOPE_PORT";

/// Contents of config.toml
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    /// Base URL of the sentiment analysis service
    pub backend_url: Option<String>,
    /// Dashboard listen port
    pub port: Option<u16>,
}

impl TomlConfig {
    /// Load from the platform config path; defaults when no usable file exists
    pub fn load() -> Self {
        let Ok(path) = config_file_path() else {
            return TomlConfig::default();
        };
        let Ok(contents) = std::fs::read_to_string(&path) else {
            return TomlConfig::default();
        };
        match toml::from_str(&contents) {
            Ok(config) => {
                tracing::info!("Loaded config file: {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("Ignoring malformed config file {}: {}", path.display(), e);
                TomlConfig::default()
            }
        }
    }
}

/// Fully resolved dashboard configuration
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub backend_url: String,
    pub port: u16,
}

impl DashboardConfig {
    /// Resolve every setting following the priority order above
    pub fn resolve(cli_backend_url: Option<&str>, cli_port: Option<u16>) -> Self {
        let file = TomlConfig::load();
        Self {
            backend_url: resolve_backend_url(cli_backend_url, &file),
            port: resolve_port(cli_port, &file),
        }
    }
}

fn resolve_backend_url(cli: Option<&str>, file: &TomlConfig) -> String {
    // Priority 1: Command-line argument
    if let Some(url) = cli {
        return normalize_url(url);
    }

    // Priority 2: Environment variable
    if let Ok(url) = std::env::var(BACKEND_URL_ENV) {
        return normalize_url(&url);
    }

    // Priority 3: TOML config file
    if let Some(url) = &file.backend_url {
        return normalize_url(url);
    }

    // Priority 4: Compiled default
    DEFAULT_BACKEND_URL.to_string()
}

fn resolve_port(cli: Option<u16>, file: &TomlConfig) -> u16 {
    if let Some(port) = cli {
        return port;
    }

    if let Ok(raw) = std::env::var(PORT_ENV) {
        match raw.parse() {
            Ok(port) => return port,
            Err(_) => tracing::warn!("Ignoring non-numeric {}: {:?}", PORT_ENV, raw),
        }
    }

    file.port.unwrap_or(DEFAULT_PORT)
}

/// Strip a trailing slash so endpoint paths can be appended uniformly
fn normalize_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

/// Get the configuration file path for the platform
fn config_file_path() -> Result<PathBuf> {
    if cfg!(target_os = "linux") {
        // Try ~/.config/sentiscope/config.toml first, then /etc/sentiscope/config.toml
        if let Some(path) = dirs::config_dir().map(|d| d.join("sentiscope").join("config.toml")) {
            if path.exists() {
                return Ok(path);
            }
        }
        let system_config = PathBuf::from("/etc/sentiscope/config.toml");
        if system_config.exists() {
            return Ok(system_config);
        }
        Err(Error::Config("No config file found".to_string()))
    } else {
        let path = dirs::config_dir()
            .map(|d| d.join("sentiscope").join("config.toml"))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))?;
        if path.exists() {
            Ok(path)
        } else {
            Err(Error::Config(format!("Config file not found: {:?}", path)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_argument_wins() {
        let file = TomlConfig {
            backend_url: Some("http://from-file:9000".to_string()),
            port: Some(1234),
        };
        assert_eq!(
            resolve_backend_url(Some("http://from-cli:7000"), &file),
            "http://from-cli:7000"
        );
        assert_eq!(resolve_port(Some(4321), &file), 4321);
    }

    #[test]
    fn file_value_used_when_no_cli_or_env() {
        let file = TomlConfig {
            backend_url: Some("http://from-file:9000/".to_string()),
            port: Some(1234),
        };
        assert_eq!(resolve_backend_url(None, &file), "http://from-file:9000");
        assert_eq!(resolve_port(None, &file), 1234);
    }

    #[test]
    fn defaults_apply_last() {
        let file = TomlConfig::default();
        assert_eq!(resolve_backend_url(None, &file), DEFAULT_BACKEND_URL);
        assert_eq!(resolve_port(None, &file), DEFAULT_PORT);
    }

    #[test]
    fn trailing_slashes_are_stripped() {
        assert_eq!(normalize_url("http://localhost:8000/"), "http://localhost:8000");
        assert_eq!(normalize_url("http://localhost:8000"), "http://localhost:8000");
    }

    #[test]
    fn toml_config_parses() {
        let config: TomlConfig =
            toml::from_str("backend_url = \"http://analyzer:8000\"\nport = 6000\n").unwrap();
        assert_eq!(config.backend_url.as_deref(), Some("http://analyzer:8000"));
        assert_eq!(config.port, Some(6000));
    }

    #[test]
    fn empty_toml_config_is_valid() {
        let config: TomlConfig = toml::from_str("").unwrap();
        assert!(config.backend_url.is_none());
        assert!(config.port.is_none());
    }
}
