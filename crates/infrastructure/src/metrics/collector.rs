use super::ResolverMetrics;
use ferrous_resolve_application::events::ResolutionEvent;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Drains the resolution event channel into [`ResolverMetrics`].
pub struct MetricsCollector {
    metrics: ResolverMetrics,
    receiver: mpsc::UnboundedReceiver<ResolutionEvent>,
}

impl MetricsCollector {
    pub fn new(metrics: ResolverMetrics, receiver: mpsc::UnboundedReceiver<ResolutionEvent>) -> Self {
        Self { metrics, receiver }
    }

    /// Runs until every emitter is dropped or `shutdown` fires. Events still
    /// buffered at shutdown are folded in before returning.
    pub async fn run(mut self, shutdown: CancellationToken) {
        info!("Metrics collector started");

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    while let Ok(event) = self.receiver.try_recv() {
                        self.metrics.track(&event);
                    }
                    break;
                }
                event = self.receiver.recv() => {
                    let Some(event) = event else {
                        debug!("Metrics collector: all emitters dropped");
                        break;
                    };
                    self.metrics.track(&event);
                }
            }
        }

        info!("Metrics collector stopped");
    }
}
