//! Configuration for harness runs.
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! `APICHECK_*` environment variables. Command-line flags are applied on top
//! by the binary.

use crate::error::{ApiCheckError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Config file picked up from the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "apicheck.toml";

/// Complete harness configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Target server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Login credentials for the crud suite.
    #[serde(default)]
    pub credentials: Credentials,

    /// Suite behavior.
    #[serde(default)]
    pub suite: SuiteConfig,
}

impl Config {
    /// Load configuration from `path`, or from [`DEFAULT_CONFIG_FILE`] when
    /// `path` is `None` and that file exists. Falls back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.exists() {
                    Self::from_file(fallback)
                } else {
                    Ok(Config::default())
                }
            }
        }
    }

    /// Parse a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ApiCheckError::ConfigError(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    /// Parse TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| ApiCheckError::ConfigError(format!("failed to parse config: {}", e)))
    }

    /// Apply overrides from the process environment.
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_env_with(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("APICHECK_BASE_URL") {
            self.server.base_url = url;
        }
        if let Some(raw) = lookup("APICHECK_TIMEOUT_SECS") {
            self.server.timeout_secs = raw.trim().parse().map_err(|_| {
                ApiCheckError::ConfigError(format!("APICHECK_TIMEOUT_SECS is not a number: {raw}"))
            })?;
        }
        if let Some(email) = lookup("APICHECK_EMAIL") {
            self.credentials.email = email;
        }
        if let Some(password) = lookup("APICHECK_PASSWORD") {
            self.credentials.password = password;
        }
        if let Some(raw) = lookup("APICHECK_PASS_THRESHOLD") {
            self.suite.pass_threshold = raw.trim().parse().map_err(|_| {
                ApiCheckError::ConfigError(format!(
                    "APICHECK_PASS_THRESHOLD is not a number: {raw}"
                ))
            })?;
        }
        Ok(())
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        let url = &self.server.base_url;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ApiCheckError::ConfigError(format!(
                "base_url must start with http:// or https://: {url}"
            )));
        }
        if self.server.timeout_secs == 0 {
            return Err(ApiCheckError::ConfigError(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.suite.pass_threshold) {
            return Err(ApiCheckError::ConfigError(format!(
                "pass_threshold must be within 0.0..=1.0, got {}",
                self.suite.pass_threshold
            )));
        }
        Ok(())
    }
}

/// Target server settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    /// Base URL every request path is appended to.
    pub base_url: String,

    /// Per-request timeout in seconds (default: 10).
    pub timeout_secs: u64,

    /// User-Agent header sent with every request.
    pub user_agent: String,
}

impl ServerConfig {
    /// Returns the request timeout as a Duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3001".to_string(),
            timeout_secs: 10,
            user_agent: "EduCanvas-API-Tester/1.0".to_string(),
        }
    }
}

/// Login credentials.
#[derive(Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Credentials {
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            email: "sjlee87@kakao.com".to_string(),
            password: "test123456@".to_string(),
        }
    }
}

/// Suite behavior.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SuiteConfig {
    /// Fraction of crud cases that must pass for a successful run (default: 0.8).
    pub pass_threshold: f64,

    /// Page size used for list requests (default: 5).
    pub list_limit: u32,

    /// Re-fetch a soft-deleted student to confirm it is no longer active.
    pub verify_soft_delete: bool,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            pass_threshold: 0.8,
            list_limit: 5,
            verify_soft_delete: true,
        }
    }
}
