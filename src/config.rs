/*!
 * Server Configuration
 * Settings loaded from `SANDBOXFS_*` environment variables
 */

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

use crate::core::limits::{
    DEFAULT_BASE_PATH, DEFAULT_BIND_ADDR, DEFAULT_HTTP_WORKERS, DEFAULT_IMAGE_DIR,
    DEFAULT_MAX_BODY_BYTES,
};

pub const ENV_BASE_PATH: &str = "SANDBOXFS_BASE_PATH";
pub const ENV_IMAGE_DIR: &str = "SANDBOXFS_IMAGE_DIR";
pub const ENV_BIND: &str = "SANDBOXFS_BIND";
pub const ENV_ALIAS_LOCKING: &str = "SANDBOXFS_ALIAS_LOCKING";
pub const ENV_MAX_BODY_BYTES: &str = "SANDBOXFS_MAX_BODY_BYTES";
pub const ENV_WORKERS: &str = "SANDBOXFS_WORKERS";

/// Invalid configuration value
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}: invalid socket address {value:?}")]
    InvalidAddress { var: &'static str, value: String },

    #[error("{var}: expected true or false, got {value:?}")]
    InvalidBool { var: &'static str, value: String },

    #[error("{var}: expected a positive byte count, got {value:?}")]
    InvalidSize { var: &'static str, value: String },

    #[error("{var}: expected a positive thread count, got {value:?}")]
    InvalidCount { var: &'static str, value: String },

    #[error("{var}: path cannot be empty")]
    EmptyPath { var: &'static str },
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub base_path: PathBuf,
    pub image_dir: PathBuf,
    pub bind: SocketAddr,
    pub alias_locking: bool,
    pub max_body_bytes: usize,
    pub workers: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_path: PathBuf::from(DEFAULT_BASE_PATH),
            image_dir: PathBuf::from(DEFAULT_IMAGE_DIR),
            bind: SocketAddr::from(DEFAULT_BIND_ADDR),
            alias_locking: true,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            workers: DEFAULT_HTTP_WORKERS,
        }
    }
}

impl ServerConfig {
    /// Load from the process environment, defaulting unset variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_BASE_PATH) {
            config.base_path = parse_path(ENV_BASE_PATH, value)?;
        }
        if let Some(value) = lookup(ENV_IMAGE_DIR) {
            config.image_dir = parse_path(ENV_IMAGE_DIR, value)?;
        }
        if let Some(value) = lookup(ENV_BIND) {
            config.bind = value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidAddress { var: ENV_BIND, value })?;
        }
        if let Some(value) = lookup(ENV_ALIAS_LOCKING) {
            config.alias_locking = parse_bool(ENV_ALIAS_LOCKING, value)?;
        }
        if let Some(value) = lookup(ENV_MAX_BODY_BYTES) {
            config.max_body_bytes = match value.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::InvalidSize {
                        var: ENV_MAX_BODY_BYTES,
                        value,
                    })
                }
            };
        }
        if let Some(value) = lookup(ENV_WORKERS) {
            config.workers = match value.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => return Err(ConfigError::InvalidCount { var: ENV_WORKERS, value }),
            };
        }

        Ok(config)
    }

    pub fn with_base_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.base_path = path.into();
        self
    }

    pub fn with_image_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.image_dir = path.into();
        self
    }

    pub fn with_bind(mut self, bind: SocketAddr) -> Self {
        self.bind = bind;
        self
    }

    pub fn with_alias_locking(mut self, enabled: bool) -> Self {
        self.alias_locking = enabled;
        self
    }
}

fn parse_path(var: &'static str, value: String) -> Result<PathBuf, ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::EmptyPath { var });
    }
    Ok(PathBuf::from(value))
}

fn parse_bool(var: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool { var, value }),
    }
}
