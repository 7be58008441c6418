//! Server configuration from environment variables.

use std::env;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8000;

const HOST_VAR: &str = "TRAFFIC_HOST";
const PORT_VAR: &str = "TRAFFIC_PORT";
const MODEL_PATH_VAR: &str = "TRAFFIC_MODEL_PATH";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid TRAFFIC_PORT '{0}': expected a port number")]
    InvalidPort(String),

    #[error("Failed to resolve default model path: {0}")]
    ModelPath(#[from] io::Error),
}

/// Runtime settings. Every field has a fixed default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub model_path: PathBuf,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup(HOST_VAR)
            .filter(|h| !h.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.into());

        let port = match lookup(PORT_VAR) {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        let model_path = match lookup(MODEL_PATH_VAR).filter(|p| !p.trim().is_empty()) {
            Some(path) => PathBuf::from(path),
            None => traffic_model::default_model_path()?,
        };

        Ok(Self { host, port, model_path })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
