use ferrous_resolve_application::ports::CacheMaintenancePort;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

const DEFAULT_PRUNE_INTERVAL_MS: u64 = 1000;

/// Periodically sweeps expired entries out of the record cache.
pub struct CacheHousekeepingJob {
    maintenance: Arc<dyn CacheMaintenancePort>,
    interval: Duration,
    shutdown: CancellationToken,
}

impl CacheHousekeepingJob {
    pub fn new(maintenance: Arc<dyn CacheMaintenancePort>) -> Self {
        Self {
            maintenance,
            interval: Duration::from_millis(DEFAULT_PRUNE_INTERVAL_MS),
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval.max(Duration::from_millis(1));
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn start(self: Arc<Self>) {
        info!(
            interval_ms = self.interval.as_millis() as u64,
            "Starting cache housekeeping job"
        );

        let mut interval = tokio::time::interval(self.interval);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    info!("CacheHousekeepingJob: shutting down");
                    break;
                }
                _ = interval.tick() => {
                    match self.maintenance.run_compaction_cycle().await {
                        Ok(outcome) => {
                            if outcome.entries_removed > 0 {
                                debug!(
                                    entries_removed = outcome.entries_removed,
                                    cache_size = outcome.cache_size,
                                    "Cache sweep completed"
                                );
                            }
                        }
                        Err(e) => {
                            error!(error = %e, "Cache sweep failed");
                        }
                    }
                }
            }
        }
    }
}
