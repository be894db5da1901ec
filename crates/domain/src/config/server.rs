use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use super::errors::ConfigError;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    #[serde(default)]
    pub udp: ProtocolConfig,

    #[serde(default)]
    pub tcp: ProtocolConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            udp: ProtocolConfig::default(),
            tcp: ProtocolConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Listen address for `port` on the configured bind address.
    pub fn socket_addr(&self, port: u16) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self.bind_address.parse().map_err(|_| {
            ConfigError::Validation(format!(
                "Invalid bind address '{}'",
                self.bind_address
            ))
        })?;
        Ok(SocketAddr::new(ip, port))
    }
}

/// Listener settings for one transport protocol.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProtocolConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_port")]
    pub port: u16,

    /// How long a connection may sit without delivering a complete frame.
    /// Only TCP connections are reaped.
    #[serde(default = "default_idle_timeout_ms")]
    pub idle_timeout_ms: u64,
}

impl ProtocolConfig {
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_millis(self.idle_timeout_ms)
    }
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            port: default_port(),
            idle_timeout_ms: default_idle_timeout_ms(),
        }
    }
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_true() -> bool {
    true
}

fn default_port() -> u16 {
    53
}

fn default_idle_timeout_ms() -> u64 {
    10_000
}
