//! Configuration for the trustpoint gateway.
//!
//! Configuration comes from an optional TOML file plus environment
//! overrides for the backend secrets. Missing credentials do not fail
//! startup; they degrade the gateway into a state where every
//! dispatching request is rejected with an opaque 500.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable naming the verification backend base URL.
pub const ENV_API_URL: &str = "TRUSTPOINT_API_URL";

/// Environment variable carrying the verification backend secret key.
pub const ENV_SECRET_KEY: &str = "TRUSTPOINT_SECRET_KEY";

/// Default value for `listen_host` in [`GatewayConfig`].
const DEFAULT_LISTEN_HOST: &str = "127.0.0.1";

/// Default value for `listen_port` in [`GatewayConfig`].
const DEFAULT_LISTEN_PORT: u16 = 3020;

/// Default backend request timeout in ms.
const DEFAULT_TIMEOUT_MS: u64 = 30_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io: {0}")]
    Io(#[from] io::Error),

    #[error("unparsable config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Listener settings for the inbound HTTP surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Addr the gateway will listen on.
    #[serde(default = "default_listen_host")]
    pub listen_host: String,

    /// Port the gateway will listen on.
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,

    /// Origin allowed to call the gateway cross-site. `*` allows any;
    /// absent disables the CORS headers entirely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cors_origin: Option<String>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listen_host: default_listen_host(),
            listen_port: default_listen_port(),
            cors_origin: None,
        }
    }
}

fn default_listen_host() -> String {
    DEFAULT_LISTEN_HOST.to_owned()
}

fn default_listen_port() -> u16 {
    DEFAULT_LISTEN_PORT
}

/// Connection settings for the verification backend.
///
/// Both credentials are usually supplied through the environment
/// ([`ENV_API_URL`], [`ENV_SECRET_KEY`]) rather than the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base service URL of the verification backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// Secret API key authenticating this service to the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_key: Option<String>,

    /// Per-request deadline for backend calls, in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            secret_key: None,
            timeout_ms: default_timeout_ms(),
        }
    }
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

/// Logging configuration (optional section in TOML).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Service label to append to the service name (e.g., "prod", "dev").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_label: Option<String>,

    /// Directory path for file-based logging.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,

    /// Prefix for log file names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file_prefix: Option<String>,

    /// Use JSON format for logs instead of compact format.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json_format: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub gateway: GatewayConfig,

    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Loads configuration from an optional TOML file.
///
/// Environment and CLI overrides are applied separately by the caller so
/// precedence stays visible at the call site.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    match path {
        Some(path) => Ok(toml::from_str(&fs::read_to_string(path)?)?),
        None => Ok(Config::default()),
    }
}

/// Backend secrets gathered from the environment. Env values win over the
/// config file.
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    pub api_url: Option<String>,
    pub secret_key: Option<String>,
}

impl EnvOverrides {
    /// Loads the override set from the process environment.
    pub fn from_env() -> Self {
        Self {
            api_url: env_value(ENV_API_URL),
            secret_key: env_value(ENV_SECRET_KEY),
        }
    }

    /// Applies the overrides onto a loaded config.
    pub fn apply(&self, config: &mut Config) {
        if let Some(api_url) = &self.api_url {
            config.backend.api_url = Some(api_url.clone());
        }
        if let Some(secret_key) = &self.secret_key {
            config.backend.secret_key = Some(secret_key.clone());
        }
    }
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
