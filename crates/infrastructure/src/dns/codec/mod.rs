//! Conversion between [`DnsMessage`](ferrous_resolve_domain::DnsMessage) and
//! DNS wire format, backed by `hickory-proto`.

mod message;
mod message_builder;
mod record_type_map;
mod records;

pub use message::MessageCodec;
pub use message_builder::MessageBuilder;
pub use record_type_map::RecordTypeMapper;
