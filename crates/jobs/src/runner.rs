use crate::{CacheHousekeepingJob, StatsReportJob};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

pub trait SpawnableJob: Send + Sync + 'static {
    fn with_cancellation(self, token: CancellationToken) -> Self;
    fn start_job(self: Arc<Self>) -> JoinHandle<()>;
}

macro_rules! impl_spawnable_job {
    ($t:ty) => {
        impl SpawnableJob for $t {
            fn with_cancellation(self, token: CancellationToken) -> Self {
                self.with_cancellation(token)
            }

            fn start_job(self: Arc<Self>) -> JoinHandle<()> {
                tokio::spawn(async move { self.start().await })
            }
        }
    };
}

impl_spawnable_job!(CacheHousekeepingJob);
impl_spawnable_job!(StatsReportJob);

fn spawn_job<J: SpawnableJob>(
    job: Option<J>,
    shutdown: &Option<CancellationToken>,
) -> Option<JoinHandle<()>> {
    let job = job?;
    let job = match shutdown {
        Some(token) => job.with_cancellation(token.clone()),
        None => job,
    };
    Some(Arc::new(job).start_job())
}

/// Starts the configured background jobs with a shared shutdown token.
pub struct JobRunner {
    cache_housekeeping: Option<CacheHousekeepingJob>,
    stats_report: Option<StatsReportJob>,
    shutdown: Option<CancellationToken>,
}

impl JobRunner {
    pub fn new() -> Self {
        Self {
            cache_housekeeping: None,
            stats_report: None,
            shutdown: None,
        }
    }

    pub fn with_cache_housekeeping(mut self, job: CacheHousekeepingJob) -> Self {
        self.cache_housekeeping = Some(job);
        self
    }

    pub fn with_stats_report(mut self, job: StatsReportJob) -> Self {
        self.stats_report = Some(job);
        self
    }

    pub fn with_shutdown_token(mut self, token: CancellationToken) -> Self {
        self.shutdown = Some(token);
        self
    }

    /// Spawn every configured job. The handles finish once the shutdown
    /// token is cancelled.
    pub async fn start(self) -> Vec<JoinHandle<()>> {
        info!("Starting background job runner");

        let handles: Vec<JoinHandle<()>> = [
            spawn_job(self.cache_housekeeping, &self.shutdown),
            spawn_job(self.stats_report, &self.shutdown),
        ]
        .into_iter()
        .flatten()
        .collect();

        info!(jobs = handles.len(), "All background jobs started");
        handles
    }
}

impl Default for JobRunner {
    fn default() -> Self {
        Self::new()
    }
}
