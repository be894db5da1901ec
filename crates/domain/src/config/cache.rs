use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::local_records::LocalRecordConfig;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_prune_interval")]
    pub prune_interval_ms: u64,

    #[serde(default = "default_max_cname_depth")]
    pub max_cname_depth: usize,

    #[serde(default)]
    pub local_records: Vec<LocalRecordConfig>,
}

impl CacheConfig {
    pub fn prune_interval(&self) -> Duration {
        Duration::from_millis(self.prune_interval_ms)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            prune_interval_ms: default_prune_interval(),
            max_cname_depth: default_max_cname_depth(),
            local_records: Vec::new(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_prune_interval() -> u64 {
    1000
}

fn default_max_cname_depth() -> usize {
    8
}
