//! Client configuration
//!
//! Settings come from a TOML file, then `EVENTDASH_*` environment variables
//! on top. Every section may be omitted.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

const ENV_PREFIX: &str = "EVENTDASH_";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub session: SessionConfig,
    pub logging: LoggingConfig,
}

/// Where the events API lives and how long to wait for it
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000/api".to_string(),
            timeout_secs: 30,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Location of the durable session token
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub data_dir: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        let data_dir = dirs::data_local_dir()
            .map(|dir| dir.join("eventdash"))
            .unwrap_or_else(|| PathBuf::from(".eventdash"));
        Self { data_dir }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level for the `eventdash` target; `RUST_LOG` wins when set
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid setting {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl Config {
    /// Read one file and apply the environment on top of it
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Config = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.overlay(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Candidate config files, most specific first
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if let Ok(explicit) = std::env::var("EVENTDASH_CONFIG") {
            paths.push(PathBuf::from(explicit));
        }
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("eventdash").join("config.toml"));
        }
        paths.push(PathBuf::from("eventdash.toml"));
        paths
    }

    /// First readable file from [`Config::search_paths`], else defaults plus
    /// environment. A broken file is reported and skipped.
    pub fn discover() -> Self {
        for path in Self::search_paths().iter().filter(|p| p.is_file()) {
            match Self::from_file(path) {
                Ok(config) => {
                    tracing::debug!(path = %path.display(), "config loaded");
                    return config;
                }
                Err(e) => tracing::warn!(error = %e, "skipping config file"),
            }
        }

        let mut config = Config::default();
        config.overlay(|key| std::env::var(key).ok());
        if let Err(e) = config.validate() {
            tracing::warn!(error = %e, "environment override rejected, using defaults");
            return Config::default();
        }
        config
    }

    fn overlay(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let var = |name: &str| lookup(&format!("{ENV_PREFIX}{name}"));

        if let Some(url) = var("API_URL") {
            self.api.base_url = url;
        }
        if let Some(secs) = var("API_TIMEOUT").and_then(|v| v.parse().ok()) {
            self.api.timeout_secs = secs;
        }
        if let Some(dir) = var("DATA_DIR") {
            self.session.data_dir = PathBuf::from(dir);
        }
        if let Some(level) = var("LOG_LEVEL") {
            self.logging.level = level;
        }
        match var("LOG_FORMAT").as_deref() {
            Some("json") => self.logging.format = LogFormat::Json,
            Some("pretty") => self.logging.format = LogFormat::Pretty,
            _ => {}
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.api.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                key: "api.base_url",
                reason: format!("{url:?} is not an http(s) URL"),
            });
        }
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "api.timeout_secs",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Commented starter file written by `eventdash config`
    pub fn template() -> &'static str {
        r#"# eventdash client settings
#
# EVENTDASH_API_URL, EVENTDASH_API_TIMEOUT, EVENTDASH_DATA_DIR,
# EVENTDASH_LOG_LEVEL and EVENTDASH_LOG_FORMAT override this file.
# EVENTDASH_CONFIG points at a file other than the default locations.

[api]
base_url = "http://localhost:3000/api"
timeout_secs = 30

[session]
# the session token is kept in <data_dir>/token
# data_dir = "/home/me/.local/share/eventdash"

[logging]
level = "warn"
# pretty | json
format = "pretty"
"#
    }
}
