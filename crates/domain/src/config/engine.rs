use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EngineConfig {
    /// Capacity of the work queue between listeners and the dispatcher.
    #[serde(default = "default_queue_size")]
    pub queue_size: usize,

    /// How long a listener waits for queue capacity before dropping a query.
    #[serde(default = "default_enqueue_timeout")]
    pub enqueue_timeout_ms: u64,
}

impl EngineConfig {
    pub fn enqueue_timeout(&self) -> Duration {
        Duration::from_millis(self.enqueue_timeout_ms)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            queue_size: default_queue_size(),
            enqueue_timeout_ms: default_enqueue_timeout(),
        }
    }
}

fn default_queue_size() -> usize {
    256
}

fn default_enqueue_timeout() -> u64 {
    50
}
