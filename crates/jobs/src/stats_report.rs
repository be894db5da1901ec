use ferrous_resolve_application::ports::StatsPort;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::info;

const DEFAULT_REPORT_INTERVAL_SECS: u64 = 60;

/// Logs a summary of the resolver counters at a fixed interval.
pub struct StatsReportJob {
    stats: Arc<dyn StatsPort>,
    interval: Duration,
    shutdown: CancellationToken,
}

impl StatsReportJob {
    pub fn new(stats: Arc<dyn StatsPort>) -> Self {
        Self {
            stats,
            interval: Duration::from_secs(DEFAULT_REPORT_INTERVAL_SECS),
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

    fn report(&self) {
        let stats = self.stats.snapshot();
        info!(
            total_queries = stats.total_queries,
            cache_hits = stats.cache_hits,
            cache_misses = stats.cache_misses,
            cache_hit_rate = format!("{:.1}%", stats.cache_hit_rate()),
            blocked = stats.blocked,
            upstream_exchanges = stats.upstream_exchanges,
            upstream_failures = stats.upstream_failures,
            dropped = stats.dropped,
            avg_resolution_us = stats.avg_resolution_us(),
            avg_upstream_us = stats.avg_upstream_us(),
            "Resolver stats"
        );
    }

    pub async fn start(self: Arc<Self>) {
        info!(
            interval_secs = self.interval.as_secs(),
            "Starting stats report job"
        );

        let mut interval = tokio::time::interval(self.interval);
        // the first tick completes immediately and there is nothing to report yet
        interval.tick().await;

        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    self.report();
                    info!("StatsReportJob: shutting down");
                    break;
                }
                _ = interval.tick() => self.report(),
            }
        }
    }
}
