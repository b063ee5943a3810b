//! Server configuration

use std::net::IpAddr;
use std::path::PathBuf;

use clap::Parser;
use imagevault_gateway::StorageConfig;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, Result};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "imagevault-server")]
#[command(about = "HTTP gateway exposing the imagevault images bucket")]
pub struct Args {
    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Server host address
    #[arg(long, env = "IMAGEVAULT_HOST")]
    pub host: Option<String>,

    /// Server port
    #[arg(short, long, env = "IMAGEVAULT_PORT")]
    pub port: Option<u16>,

    /// Bucket holding the images
    #[arg(long, env = "BUCKET_NAME")]
    pub bucket: Option<String>,

    /// Storage access key id
    #[arg(long, env = "ACCESS_KEY", hide_env_values = true)]
    pub access_key: Option<String>,

    /// Storage secret access key
    #[arg(long, env = "SECRET_KEY", hide_env_values = true)]
    pub secret_key: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG")]
    pub log_level: Option<String>,
}

/// Complete server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub monitoring: MonitoringConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Host address to bind to
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Maximum request body size in bytes
    #[serde(default = "default_max_body_size")]
    pub max_body_size: usize,
}

/// Monitoring and logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    /// Log level used when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_timeout() -> u64 {
    30
}

fn default_max_body_size() -> usize {
    16 * 1024 * 1024 // 16MB
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            timeout: default_timeout(),
            max_body_size: default_max_body_size(),
        }
    }
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: ServerSettings::default(),
            storage: StorageConfig::default(),
            monitoring: MonitoringConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration: defaults, then an optional file, then
    /// IMAGEVAULT_* environment variables, then CLI arguments.
    pub fn load(args: &Args) -> Result<Self> {
        let mut builder = config::Config::builder()
            .add_source(config::Config::try_from(&ServerConfig::default())?);

        if let Some(config_path) = &args.config {
            builder = builder.add_source(config::File::from(config_path.clone()));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("IMAGEVAULT")
                .separator("_")
                .try_parsing(true),
        );

        let mut config: ServerConfig = builder.build()?.try_deserialize()?;

        // CLI arguments take precedence over everything else
        if let Some(host) = &args.host {
            config.server.host = host.clone();
        }
        if let Some(port) = args.port {
            config.server.port = port;
        }
        if let Some(bucket) = &args.bucket {
            config.storage.bucket = bucket.clone();
        }
        if let Some(access_key) = &args.access_key {
            config.storage.access_key_id = access_key.clone();
        }
        if let Some(secret_key) = &args.secret_key {
            config.storage.secret_access_key = secret_key.clone();
        }
        if let Some(log_level) = &args.log_level {
            config.monitoring.log_level = log_level.clone();
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration values
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(ApiError::Config(config::ConfigError::Message(
                "Server port must be greater than 0".to_string(),
            )));
        }

        self.server.host.parse::<IpAddr>().map_err(|_| {
            ApiError::Config(config::ConfigError::Message(format!(
                "Invalid host address: {}",
                self.server.host
            )))
        })?;

        self.storage.validate().map_err(|err| {
            ApiError::Config(config::ConfigError::Message(err.to_string()))
        })?;

        Ok(())
    }

    /// The socket address to bind the listener to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> ServerConfig {
        let mut config = ServerConfig::default();
        config.storage.bucket = "sample-images".to_string();
        config.storage.access_key_id = "key".to_string();
        config.storage.secret_access_key = "secret".to_string();
        config
    }

    #[test]
    fn defaults_bind_all_interfaces_on_8080() {
        let config = ServerConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
    }

    #[test]
    fn valid_config_passes_validation() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn zero_port_fails_validation() {
        let mut config = valid_config();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn unparseable_host_fails_validation() {
        let mut config = valid_config();
        config.server.host = "not-an-address".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_bucket_fails_validation() {
        let mut config = valid_config();
        config.storage.bucket.clear();
        assert!(config.validate().is_err());
    }
}
