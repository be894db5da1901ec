//! Ferrous Resolve Domain Layer
pub mod blocklist;
pub mod config;
pub mod dns_message;
pub mod dns_name;
pub mod dns_protocol;
pub mod dns_query;
pub mod dns_record;
pub mod errors;

pub use blocklist::BlockEntry;
pub use config::{
    BlocklistConfig, CacheConfig, CliOverrides, Config, ConfigError, EngineConfig,
    LocalRecordConfig, LoggingConfig, MetricsConfig, ProtocolConfig, ServerConfig, UpstreamConfig,
    UpstreamServerConfig, UpstreamStrategy,
};
pub use dns_message::{DnsMessage, MessageHeader, OpCode, ResponseCode};
pub use dns_name::to_fqdn;
pub use dns_protocol::Protocol;
pub use dns_query::{DnsQuery, CLASS_IN};
pub use dns_record::{min_ttl, DnsRecord, RecordData, RecordType};
pub use errors::DomainError;
