//! Logging subsystem.
//!
//! Installs a tracing registry with an env-filtered stdout layer and an
//! optional rolling file layer. `RUST_LOG` overrides the default INFO
//! filter.

use std::path::PathBuf;

use tracing::{info, Level};
use tracing_appender::rolling::RollingFileAppender;
// Re-exported for callers configuring file rotation.
pub use tracing_appender::rolling::Rotation;
use tracing_subscriber::{
    fmt::layer, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

/// Configuration for file-based logging with rotation.
#[derive(Debug, Clone)]
pub struct FileLoggingConfig {
    /// Directory where log files will be written.
    pub directory: PathBuf,
    /// Base filename prefix (e.g., "trustpoint" -> "trustpoint.log").
    pub file_name_prefix: String,
    /// Rotation strategy (daily, hourly, never).
    pub rotation: Rotation,
    /// Use JSON format for file logs instead of compact.
    pub json_format: bool,
}

impl FileLoggingConfig {
    pub fn new(directory: PathBuf, file_name_prefix: String) -> Self {
        Self {
            directory,
            file_name_prefix,
            rotation: Rotation::DAILY,
            json_format: false,
        }
    }

    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_json_format(mut self, json_format: bool) -> Self {
        self.json_format = json_format;
        self
    }
}

/// Main logger configuration.
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Service name recorded on the init event.
    pub service_name: String,
    /// Use JSON format on stdout instead of compact.
    pub json_format: bool,
    /// File logging configuration (optional).
    pub file_logging_config: Option<FileLoggingConfig>,
}

impl LoggerConfig {
    /// Creates a new configuration with service name.
    pub fn new(service_name: String) -> Self {
        Self {
            service_name,
            json_format: false,
            file_logging_config: None,
        }
    }

    /// Enable JSON logging format on stdout.
    pub fn with_json_logging(mut self, enabled: bool) -> Self {
        self.json_format = enabled;
        self
    }

    /// Enable file logging with configuration.
    pub fn with_file_logging(mut self, config: FileLoggingConfig) -> Self {
        self.file_logging_config = Some(config);
        self
    }
}

/// Formats a service name with an optional label suffix.
pub fn format_service_name(base: &str, label: Option<&str>) -> String {
    match label {
        Some(label) => format!("{base}%{label}"),
        None => base.to_owned(),
    }
}

/// Initializes the logging subsystem with the provided config.
pub fn init(config: LoggerConfig) {
    let filt = EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .from_env_lossy();

    let stdout_layer = if config.json_format {
        layer().json().with_filter(filt.clone()).boxed()
    } else {
        layer().compact().with_filter(filt.clone()).boxed()
    };

    let file_layer = config.file_logging_config.as_ref().map(|file_config| {
        let file_appender = RollingFileAppender::new(
            file_config.rotation.clone(),
            &file_config.directory,
            &file_config.file_name_prefix,
        );

        if file_config.json_format {
            layer()
                .json()
                .with_writer(file_appender)
                .with_ansi(false) // No color codes in files
                .with_filter(filt.clone())
                .boxed()
        } else {
            layer()
                .compact()
                .with_writer(file_appender)
                .with_ansi(false) // No color codes in files
                .with_filter(filt)
                .boxed()
        }
    });

    tracing_subscriber::registry()
        .with(stdout_layer)
        .with(file_layer)
        .init();

    info!(service_name = %config.service_name, "logging initialized");
}
