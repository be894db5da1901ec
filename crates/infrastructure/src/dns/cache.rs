mod compaction;
mod key;
mod metrics;
mod port;
mod record;
mod storage;

pub use key::CacheKey;
pub use metrics::CacheMetrics;
pub use record::CachedAnswer;
pub use storage::RecordCache;
