mod record;
mod record_type;

pub use record::{min_ttl, DnsRecord, RecordData};
pub use record_type::RecordType;
