mod dispatcher;
mod queue;

pub use dispatcher::QueryDispatcher;
pub use queue::{WorkQueue, WorkReceiver};
