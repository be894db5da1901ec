use super::key::CacheKey;
use super::{CacheMetrics, CachedAnswer};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use ferrous_resolve_domain::{to_fqdn, CacheConfig, DnsRecord, DomainError, RecordType};
use rustc_hash::{FxBuildHasher, FxHashMap};
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

pub const DEFAULT_MAX_CNAME_DEPTH: usize = 8;

/// Concurrent `(name, type)` → record set cache with TTL expiry.
pub struct RecordCache {
    pub(super) entries: DashMap<CacheKey, CachedAnswer, FxBuildHasher>,
    pub(super) metrics: Arc<CacheMetrics>,
    stamps: AtomicU64,
    max_cname_depth: usize,
}

impl RecordCache {
    pub fn new(max_cname_depth: usize) -> Self {
        Self {
            entries: DashMap::with_hasher(FxBuildHasher),
            metrics: Arc::new(CacheMetrics::default()),
            stamps: AtomicU64::new(0),
            max_cname_depth: max_cname_depth.max(1),
        }
    }

    /// Build the cache and seed it with the configured local records.
    pub fn from_config(config: &CacheConfig) -> Result<Self, DomainError> {
        let cache = Self::new(config.max_cname_depth);

        let mut grouped: FxHashMap<(String, RecordType), Vec<DnsRecord>> = FxHashMap::default();
        for local in &config.local_records {
            let record = local.to_record()?;
            grouped
                .entry((record.name.to_string(), record.record_type()))
                .or_default()
                .push(record);
        }

        let local_count = grouped.len();
        for ((name, record_type), records) in grouped {
            cache.add_permanent(&name, record_type, records);
        }

        info!(
            max_cname_depth = cache.max_cname_depth,
            local_records = local_count,
            "Record cache initialized"
        );

        Ok(cache)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn metrics(&self) -> Arc<CacheMetrics> {
        Arc::clone(&self.metrics)
    }

    pub fn max_cname_depth(&self) -> usize {
        self.max_cname_depth
    }

    /// Reserve the ordering stamp for a write that is about to start.
    #[inline]
    pub fn next_stamp(&self) -> u64 {
        self.stamps.fetch_add(1, AtomicOrdering::Relaxed) + 1
    }

    /// Store `records` under `(name, record_type)` for `ttl`.
    pub fn insert(
        &self,
        name: &str,
        record_type: RecordType,
        records: Vec<DnsRecord>,
        ttl: Duration,
    ) {
        let stamp = self.next_stamp();
        self.insert_stamped(name, record_type, records, ttl, stamp);
    }

    /// Store an answer whose stamp was reserved with [`Self::next_stamp`].
    /// The write is discarded when the entry already holds a newer stamp.
    pub fn insert_stamped(
        &self,
        name: &str,
        record_type: RecordType,
        records: Vec<DnsRecord>,
        ttl: Duration,
        stamp: u64,
    ) {
        let answer = CachedAnswer::new(records, ttl, stamp, Instant::now());
        self.store(CacheKey::new(name, record_type), answer);
    }

    /// Store `records` under `(name, record_type)` without expiry.
    pub fn add_permanent(&self, name: &str, record_type: RecordType, records: Vec<DnsRecord>) {
        let stamp = self.next_stamp();
        self.store(
            CacheKey::new(name, record_type),
            CachedAnswer::permanent(records, stamp),
        );
    }

    fn store(&self, key: CacheKey, answer: CachedAnswer) {
        match self.entries.entry(key) {
            Entry::Occupied(mut occupied) => {
                if occupied.get().stamp() > answer.stamp() {
                    self.metrics
                        .stale_writes
                        .fetch_add(1, AtomicOrdering::Relaxed);
                    debug!(
                        domain = %occupied.key().domain,
                        record_type = %occupied.key().record_type,
                        "Discarding cache write older than current entry"
                    );
                    return;
                }
                occupied.insert(answer);
            }
            Entry::Vacant(vacant) => {
                vacant.insert(answer);
            }
        }
        self.metrics
            .insertions
            .fetch_add(1, AtomicOrdering::Relaxed);
    }

    /// Live records for `(name, record_type)`.
    ///
    /// On a direct miss, cached CNAMEs are followed up to the configured
    /// depth; the result then holds the CNAME records followed by the final
    /// answer. A cycle, a chain that is too long or a chain that ends without
    /// records is a miss.
    pub fn get(&self, name: &str, record_type: RecordType) -> Option<Vec<DnsRecord>> {
        let now = Instant::now();
        let mut current = to_fqdn(name);
        let mut chain: Vec<DnsRecord> = Vec::new();
        let mut visited: Vec<String> = Vec::new();

        for _ in 0..=self.max_cname_depth {
            if let Some(records) = self.lookup_live(&current, record_type, now) {
                self.metrics.hits.fetch_add(1, AtomicOrdering::Relaxed);
                chain.extend(records);
                return Some(chain);
            }

            if record_type == RecordType::CNAME {
                break;
            }

            let Some(aliases) = self.lookup_live(&current, RecordType::CNAME, now) else {
                break;
            };
            let Some(target) = aliases.iter().find_map(|r| r.cname_target()).map(to_fqdn) else {
                break;
            };

            visited.push(current);
            if visited.contains(&target) {
                debug!(domain = %name, target = %target, "CNAME cycle in cache");
                break;
            }

            chain.extend(aliases);
            current = target;
        }

        self.metrics.misses.fetch_add(1, AtomicOrdering::Relaxed);
        None
    }

    fn lookup_live(&self, name: &str, record_type: RecordType, now: Instant) -> Option<Vec<DnsRecord>> {
        let key = CacheKey::new(name, record_type);

        let expired_stamp = {
            let entry = self.entries.get(&key)?;
            if !entry.is_expired_at(now) {
                return Some(entry.records_at(now));
            }
            entry.stamp()
        };

        // Only remove the entry we saw expire; a concurrent refresh survives.
        if self
            .entries
            .remove_if(&key, |_, answer| answer.stamp() == expired_stamp)
            .is_some()
        {
            self.metrics
                .lazy_removals
                .fetch_add(1, AtomicOrdering::Relaxed);
        }
        None
    }
}

impl Default for RecordCache {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CNAME_DEPTH)
    }
}
