use super::storage::RecordCache;
use async_trait::async_trait;
use ferrous_resolve_application::ports::{
    CacheCompactionOutcome, CacheMaintenancePort, RecordCachePort,
};
use ferrous_resolve_domain::{DnsRecord, DomainError, RecordType};
use std::time::Duration;

impl RecordCachePort for RecordCache {
    fn begin_write(&self) -> u64 {
        self.next_stamp()
    }

    fn add(
        &self,
        name: &str,
        record_type: RecordType,
        records: Vec<DnsRecord>,
        ttl: Duration,
        stamp: u64,
    ) {
        self.insert_stamped(name, record_type, records, ttl, stamp);
    }

    fn query(&self, name: &str, record_type: RecordType) -> Option<Vec<DnsRecord>> {
        self.get(name, record_type)
    }
}

#[async_trait]
impl CacheMaintenancePort for RecordCache {
    async fn run_compaction_cycle(&self) -> Result<CacheCompactionOutcome, DomainError> {
        let entries_removed = self.compact();
        Ok(CacheCompactionOutcome {
            entries_removed,
            cache_size: self.len(),
        })
    }
}
