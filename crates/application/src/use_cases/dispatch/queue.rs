use crate::events::{ResolutionEvent, ResolutionEventEmitter};
use crate::ports::WorkItem;
use ferrous_resolve_domain::DomainError;
use std::time::Duration;
use tokio::sync::mpsc::{self, error::SendTimeoutError};
use tracing::warn;

pub type WorkReceiver = mpsc::Receiver<Box<dyn WorkItem>>;

/// Producer side of the bounded queue between listeners and the dispatcher.
#[derive(Clone)]
pub struct WorkQueue {
    sender: mpsc::Sender<Box<dyn WorkItem>>,
    enqueue_timeout: Duration,
    emitter: ResolutionEventEmitter,
}

impl WorkQueue {
    pub fn bounded(capacity: usize, enqueue_timeout: Duration) -> (Self, WorkReceiver) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        let queue = Self {
            sender,
            enqueue_timeout,
            emitter: ResolutionEventEmitter::new_disabled(),
        };
        (queue, receiver)
    }

    pub fn with_emitter(mut self, emitter: ResolutionEventEmitter) -> Self {
        self.emitter = emitter;
        self
    }

    /// Enqueue `item`, waiting at most the enqueue timeout for capacity.
    ///
    /// When the queue stays full the item is dropped without a response.
    pub async fn submit(&self, item: Box<dyn WorkItem>) -> Result<(), DomainError> {
        match self.sender.send_timeout(item, self.enqueue_timeout).await {
            Ok(()) => Ok(()),
            Err(SendTimeoutError::Timeout(item)) => {
                let protocol = item.protocol();
                warn!(
                    protocol = %protocol,
                    domain = item.question().map(|q| &*q.domain).unwrap_or(""),
                    timeout_ms = self.enqueue_timeout.as_millis() as u64,
                    "Work queue full, dropping query"
                );
                self.emitter
                    .emit(ResolutionEvent::WorkItemDropped { protocol });
                Err(DomainError::QueueFull)
            }
            Err(SendTimeoutError::Closed(_)) => Err(DomainError::QueueClosed),
        }
    }

    /// Free slots left before submissions start waiting.
    pub fn capacity(&self) -> usize {
        self.sender.capacity()
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}
