use serde::{Deserialize, Serialize};

use super::blocklist::BlocklistConfig;
use super::cache::CacheConfig;
use super::engine::EngineConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::metrics::MetricsConfig;
use super::server::ServerConfig;
use super::upstream::UpstreamConfig;

/// Main configuration structure for Ferrous Resolve
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Listener configuration (bind address, UDP and TCP)
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream servers and selection strategy
    #[serde(default)]
    pub upstream: UpstreamConfig,

    #[serde(default)]
    pub blocklist: BlocklistConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub engine: EngineConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// Prometheus endpoint
    #[serde(default)]
    pub metrics: MetricsConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. ferrous-resolve.toml in current directory
    /// 3. /etc/ferrous-resolve/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new("ferrous-resolve.toml").exists() {
            Self::from_file("ferrous-resolve.toml")?
        } else if std::path::Path::new("/etc/ferrous-resolve/config.toml").exists() {
            Self::from_file("/etc/ferrous-resolve/config.toml")?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply command-line overrides to configuration
    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(port) = overrides.udp_port {
            self.server.udp.port = port;
        }
        if let Some(port) = overrides.tcp_port {
            self.server.tcp.port = port;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.upstream.servers.is_empty() {
            return Err(ConfigError::Validation(
                "No upstream servers configured".to_string(),
            ));
        }

        for server in &self.upstream.servers {
            server.socket_addr()?;
        }

        self.server.socket_addr(0)?;

        if !self.server.udp.enabled && !self.server.tcp.enabled {
            return Err(ConfigError::Validation(
                "At least one of UDP or TCP must be enabled".to_string(),
            ));
        }
        if self.server.udp.enabled && self.server.udp.port == 0 {
            return Err(ConfigError::Validation("UDP port cannot be 0".to_string()));
        }
        if self.server.tcp.enabled && self.server.tcp.port == 0 {
            return Err(ConfigError::Validation("TCP port cannot be 0".to_string()));
        }
        if self.server.tcp.enabled && self.server.tcp.idle_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "server.tcp.idle_timeout_ms must be greater than 0".to_string(),
            ));
        }

        if self.metrics.enabled {
            if self.metrics.port == 0 {
                return Err(ConfigError::Validation(
                    "Metrics port cannot be 0".to_string(),
                ));
            }
            if !self.metrics.route.starts_with('/') {
                return Err(ConfigError::Validation(format!(
                    "Metrics route '{}' must start with '/'",
                    self.metrics.route
                )));
            }
        }

        if self.engine.queue_size == 0 {
            return Err(ConfigError::Validation(
                "engine.queue_size must be greater than 0".to_string(),
            ));
        }

        if self.cache.max_cname_depth == 0 {
            return Err(ConfigError::Validation(
                "cache.max_cname_depth must be greater than 0".to_string(),
            ));
        }

        if !self.cache.enabled && !self.cache.local_records.is_empty() {
            return Err(ConfigError::Validation(
                "cache.local_records are served from the cache and need cache.enabled = true"
                    .to_string(),
            ));
        }

        for local in &self.cache.local_records {
            local.to_record().map_err(|e| {
                ConfigError::Validation(format!("Local record '{}': {}", local.domain, e))
            })?;
        }

        Ok(())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub bind_address: Option<String>,
    pub udp_port: Option<u16>,
    pub tcp_port: Option<u16>,
    pub log_level: Option<String>,
}
