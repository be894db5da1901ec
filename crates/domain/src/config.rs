pub mod blocklist;
pub mod cache;
pub mod engine;
pub mod errors;
pub mod local_records;
pub mod logging;
pub mod metrics;
pub mod root;
pub mod server;
pub mod upstream;

pub use blocklist::BlocklistConfig;
pub use cache::CacheConfig;
pub use engine::EngineConfig;
pub use errors::ConfigError;
pub use local_records::LocalRecordConfig;
pub use logging::LoggingConfig;
pub use metrics::MetricsConfig;
pub use root::{CliOverrides, Config};
pub use server::{ProtocolConfig, ServerConfig};
pub use upstream::{UpstreamConfig, UpstreamServerConfig, UpstreamStrategy};
