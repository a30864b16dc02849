use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::errors::{Result, UselogError};

/// Default endpoint of the usage-log resource.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api/logs/";

/// Top-level configuration read from `<home>/config.toml`.
///
/// Every section is optional; a missing file means all defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionSection,
}

impl AppConfig {
    /// Load the configuration from `<home>/config.toml`.
    pub fn load(home: &Path) -> Result<Self> {
        let config_path = home.join("config.toml");
        if !config_path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&config_path)?;
        let mut config: Self = toml::from_str(&content).map_err(|e| UselogError::InvalidConfig {
            home: home.to_path_buf(),
            detail: format!("Failed to parse config.toml: {e}"),
        })?;

        config.api.base_url = normalize_base_url(&config.api.base_url).ok_or_else(|| {
            UselogError::InvalidConfig {
                home: home.to_path_buf(),
                detail: format!(
                    "api.base_url must start with http:// or https://, got '{}'",
                    config.api.base_url
                ),
            }
        })?;

        if config.api.timeout_secs == 0 {
            return Err(UselogError::InvalidConfig {
                home: home.to_path_buf(),
                detail: "api.timeout_secs must be at least 1".into(),
            });
        }

        let file = config.session.file.trim();
        if file.is_empty() || file.contains(['/', '\\']) || file.starts_with('.') {
            return Err(UselogError::InvalidConfig {
                home: home.to_path_buf(),
                detail: format!(
                    "session.file must be a plain file name, got '{}'",
                    config.session.file
                ),
            });
        }

        Ok(config)
    }

    /// Replace the API base URL (from `--api-url` / `USELOG_API_URL`).
    pub fn with_base_url(mut self, home: &Path, url: &str) -> Result<Self> {
        self.api.base_url =
            normalize_base_url(url).ok_or_else(|| UselogError::InvalidConfig {
                home: home.to_path_buf(),
                detail: format!("--api-url must start with http:// or https://, got '{url}'"),
            })?;
        Ok(self)
    }

    /// Full path of the session file.
    pub fn session_path(&self, home: &Path) -> PathBuf {
        home.join(&self.session.file)
    }
}

/// The `[api]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// The `[session]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionSection {
    #[serde(default = "default_session_file")]
    pub file: String,
}

impl Default for SessionSection {
    fn default() -> Self {
        Self {
            file: default_session_file(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_session_file() -> String {
    "session.json".to_string()
}

/// Trim the URL and make sure it ends with exactly one `/`, so record
/// paths can be appended as `{base}{id}`.
fn normalize_base_url(url: &str) -> Option<String> {
    let url = url.trim();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return None;
    }
    Some(format!("{}/", url.trim_end_matches('/')))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = AppConfig::load(tmp.path()).unwrap();
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api.timeout(), Duration::from_secs(10));
        assert_eq!(config.session_path(tmp.path()), tmp.path().join("session.json"));
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join("config.toml"),
            "[api]\nbase_url = \"https://lab.example.com/api/logs\"\n",
        )
        .unwrap();

        let config = AppConfig::load(tmp.path()).unwrap();
        assert_eq!(config.api.base_url, "https://lab.example.com/api/logs/");
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.session.file, "session.json");
    }

    #[test]
    fn malformed_file_is_invalid_config() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("config.toml"), "[api\nbase_url=").unwrap();
        assert!(matches!(
            AppConfig::load(tmp.path()),
            Err(UselogError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn rejects_non_http_url_and_path_like_session_file() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join("config.toml"),
            "[api]\nbase_url = \"ftp://x\"\n",
        )
        .unwrap();
        assert!(AppConfig::load(tmp.path()).is_err());

        std::fs::write(
            tmp.path().join("config.toml"),
            "[session]\nfile = \"../token.json\"\n",
        )
        .unwrap();
        assert!(AppConfig::load(tmp.path()).is_err());
    }

    #[test]
    fn rejects_empty_session_file_and_zero_timeout() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("config.toml"), "[session]\nfile = \"\"\n").unwrap();
        assert!(matches!(
            AppConfig::load(tmp.path()),
            Err(UselogError::InvalidConfig { detail, .. }) if detail.contains("session.file")
        ));

        std::fs::write(tmp.path().join("config.toml"), "[api]\ntimeout_secs = 0\n").unwrap();
        assert!(matches!(
            AppConfig::load(tmp.path()),
            Err(UselogError::InvalidConfig { detail, .. }) if detail.contains("timeout_secs")
        ));
    }

    #[test]
    fn override_normalizes_trailing_slash() {
        let tmp = TempDir::new().unwrap();
        let config = AppConfig::default()
            .with_base_url(tmp.path(), "http://localhost:9000/api/logs///")
            .unwrap();
        assert_eq!(config.api.base_url, "http://localhost:9000/api/logs/");
    }
}
