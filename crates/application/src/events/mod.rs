mod emitter;
mod types;

pub use emitter::ResolutionEventEmitter;
pub use types::{ResolutionEvent, ResolutionStage};
