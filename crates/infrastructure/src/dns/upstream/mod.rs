mod handle;
mod pool;
mod strategy;

pub use handle::{RttStats, UpstreamHandle};
pub use pool::UpstreamPool;
pub use strategy::Strategy;
