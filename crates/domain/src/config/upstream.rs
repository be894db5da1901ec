use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use super::errors::ConfigError;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    #[serde(default)]
    pub strategy: UpstreamStrategy,

    #[serde(default = "default_servers")]
    pub servers: Vec<UpstreamServerConfig>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            strategy: UpstreamStrategy::default(),
            servers: default_servers(),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum UpstreamStrategy {
    Random,

    #[default]
    RoundRobin,

    Latency,

    Sequential,
}

impl UpstreamStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::RoundRobin => "round_robin",
            Self::Latency => "latency",
            Self::Sequential => "sequential",
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamServerConfig {
    pub name: String,

    pub ip: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl UpstreamServerConfig {
    pub fn new(name: impl Into<String>, ip: impl Into<String>, port: u16) -> Self {
        Self {
            name: name.into(),
            ip: ip.into(),
            port,
            timeout_ms: default_timeout_ms(),
        }
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self.ip.parse().map_err(|_| {
            ConfigError::Validation(format!(
                "Upstream '{}' has invalid IP address '{}'",
                self.name, self.ip
            ))
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

fn default_servers() -> Vec<UpstreamServerConfig> {
    vec![
        UpstreamServerConfig::new("cloudflare", "1.1.1.1", 53),
        UpstreamServerConfig::new("google", "8.8.8.8", 53),
    ]
}

fn default_port() -> u16 {
    53
}

fn default_timeout_ms() -> u64 {
    2000
}
