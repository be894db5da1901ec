use ferrous_resolve_domain::{DnsRecord, RecordType};
use std::time::Duration;

/// Port for the record cache used by the resolution engine.
///
/// Names are normalized by the implementation, so callers may pass them in any
/// case with or without the trailing dot.
pub trait RecordCachePort: Send + Sync {
    /// Reserve the ordering stamp for a write whose records are about to be
    /// fetched. Stamps increase monotonically.
    fn begin_write(&self) -> u64;

    /// Insert or replace the answer stored under `(name, record_type)`.
    /// The write is discarded when the entry already holds a newer stamp.
    fn add(
        &self,
        name: &str,
        record_type: RecordType,
        records: Vec<DnsRecord>,
        ttl: Duration,
        stamp: u64,
    );

    /// Live answer for `(name, record_type)`, following cached CNAME chains.
    fn query(&self, name: &str, record_type: RecordType) -> Option<Vec<DnsRecord>>;
}
