use super::ResolutionEvent;
use tokio::sync::mpsc;

/// Fire-and-forget sender for resolution events.
///
/// A disabled emitter drops every event. Send failures are ignored, so a
/// missing or lagging consumer never slows resolution down.
#[derive(Clone)]
pub struct ResolutionEventEmitter {
    sender: Option<mpsc::UnboundedSender<ResolutionEvent>>,
}

impl ResolutionEventEmitter {
    pub fn new_disabled() -> Self {
        Self { sender: None }
    }

    pub fn new_enabled() -> (Self, mpsc::UnboundedReceiver<ResolutionEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let emitter = Self { sender: Some(tx) };
        (emitter, rx)
    }

    pub fn emit(&self, event: ResolutionEvent) {
        if let Some(ref tx) = self.sender {
            let _ = tx.send(event);
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.sender.is_some()
    }
}

impl Default for ResolutionEventEmitter {
    fn default() -> Self {
        Self::new_disabled()
    }
}

impl std::fmt::Debug for ResolutionEventEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolutionEventEmitter")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}
