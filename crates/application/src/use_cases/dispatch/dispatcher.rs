use super::queue::WorkReceiver;
use crate::use_cases::resolution::ResolutionEngine;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Drains the work queue, resolving each item on its own task.
pub struct QueryDispatcher {
    engine: Arc<ResolutionEngine>,
}

impl QueryDispatcher {
    pub fn new(engine: Arc<ResolutionEngine>) -> Self {
        Self { engine }
    }

    /// Runs until the queue closes or `shutdown` is cancelled. Items already
    /// spawned finish on their own.
    pub async fn run(&self, mut receiver: WorkReceiver, shutdown: CancellationToken) {
        info!("Query dispatcher started");

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    info!("Query dispatcher: shutting down");
                    break;
                }
                item = receiver.recv() => {
                    let Some(item) = item else {
                        info!("Query dispatcher: work queue closed");
                        break;
                    };
                    let engine = Arc::clone(&self.engine);
                    tokio::spawn(async move {
                        engine.process(item).await;
                    });
                }
            }
        }
    }
}
