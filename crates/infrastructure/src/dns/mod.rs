pub mod blocklist;
pub mod cache;
pub mod codec;
pub mod listener;
pub mod transport;
pub mod upstream;

pub use blocklist::{Blocklist, BlocklistLoader, LoadReport};
pub use cache::{CacheKey, CacheMetrics, CachedAnswer, RecordCache};
pub use codec::{MessageCodec, RecordTypeMapper};
pub use listener::{TcpListenerTask, UdpListenerTask};
pub use upstream::{Strategy, UpstreamHandle, UpstreamPool};
