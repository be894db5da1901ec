use serde::{Deserialize, Serialize};

/// Prometheus scrape endpoint. Listens on `server.bind_address`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MetricsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_route")]
    pub route: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            port: default_port(),
            route: default_route(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_port() -> u16 {
    9090
}

fn default_route() -> String {
    "/metrics".to_string()
}
