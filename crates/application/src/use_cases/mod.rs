pub mod dispatch;
pub mod resolution;

pub use dispatch::{QueryDispatcher, WorkQueue, WorkReceiver};
pub use resolution::{
    blocked_response, create_response, format_error_response, ResolutionEngine,
};
