//! Server configuration.
//!
//! Values are layered: built-in defaults, then an optional YAML file, then
//! the `LISTEN` and `SERVE_DIR` environment variables. Command-line flags are
//! applied on top by the binary.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:4221";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("served directory {0} is not an existing directory")]
    InvalidDirectory(PathBuf),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub listen_addr: String,
    /// Root for the `/files/*` routes. File routes answer 404 when unset.
    pub directory: Option<PathBuf>,
    pub limits: Limits,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct Limits {
    pub max_head_bytes: usize,
    pub max_body_bytes: usize,
    pub header_read_timeout_secs: u64,
    pub connection_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            directory: None,
            limits: Limits::default(),
        }
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_head_bytes: 64 * 1024,
            max_body_bytes: 16 * 1024 * 1024,
            header_read_timeout_secs: 10,
            connection_timeout_secs: 30,
        }
    }
}

impl Limits {
    pub fn header_read_timeout(&self) -> Duration {
        Duration::from_secs(self.header_read_timeout_secs)
    }

    pub fn connection_timeout(&self) -> Duration {
        Duration::from_secs(self.connection_timeout_secs)
    }
}

impl Config {
    /// Defaults overridden by the environment.
    pub fn load() -> Self {
        let mut cfg = Self::default();
        cfg.apply_env();
        cfg
    }

    /// A YAML file overridden by the environment.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut cfg = Self::from_yaml_str(&content)?;
        cfg.apply_env();
        Ok(cfg)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    fn apply_env(&mut self) {
        if let Ok(addr) = std::env::var("LISTEN") {
            self.listen_addr = addr;
        }
        if let Ok(dir) = std::env::var("SERVE_DIR") {
            self.directory = Some(PathBuf::from(dir));
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.listen_addr.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "listen_addr",
                reason: "must not be empty".to_string(),
            });
        }

        if let Some(dir) = &self.directory {
            if !dir.is_dir() {
                return Err(ConfigError::InvalidDirectory(dir.clone()));
            }
        }

        let limits = [
            ("limits.max_head_bytes", self.limits.max_head_bytes as u64),
            ("limits.max_body_bytes", self.limits.max_body_bytes as u64),
            ("limits.header_read_timeout_secs", self.limits.header_read_timeout_secs),
            ("limits.connection_timeout_secs", self.limits.connection_timeout_secs),
        ];
        for (field, value) in limits {
            if value == 0 {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: "must be greater than zero".to_string(),
                });
            }
        }

        Ok(())
    }
}
