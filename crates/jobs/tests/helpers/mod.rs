#![allow(dead_code)]
use async_trait::async_trait;
use ferrous_resolve_application::ports::{
    CacheCompactionOutcome, CacheMaintenancePort, ResolverStats, StatsPort,
};
use ferrous_resolve_domain::DomainError;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

pub struct MockCacheMaintenancePort {
    compaction_calls: AtomicUsize,
    should_fail: AtomicBool,
}

impl MockCacheMaintenancePort {
    pub fn new() -> Self {
        Self {
            compaction_calls: AtomicUsize::new(0),
            should_fail: AtomicBool::new(false),
        }
    }

    pub fn failing() -> Self {
        let mock = Self::new();
        mock.should_fail.store(true, Ordering::SeqCst);
        mock
    }

    pub fn compaction_call_count(&self) -> usize {
        self.compaction_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CacheMaintenancePort for MockCacheMaintenancePort {
    async fn run_compaction_cycle(&self) -> Result<CacheCompactionOutcome, DomainError> {
        self.compaction_calls.fetch_add(1, Ordering::SeqCst);
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::Config("mock compaction failure".to_string()));
        }
        Ok(CacheCompactionOutcome {
            entries_removed: 1,
            cache_size: 10,
        })
    }
}

pub struct MockStatsPort {
    snapshots: AtomicUsize,
}

impl MockStatsPort {
    pub fn new() -> Self {
        Self {
            snapshots: AtomicUsize::new(0),
        }
    }

    pub fn snapshot_count(&self) -> usize {
        self.snapshots.load(Ordering::SeqCst)
    }
}

impl StatsPort for MockStatsPort {
    fn snapshot(&self) -> ResolverStats {
        self.snapshots.fetch_add(1, Ordering::SeqCst);
        ResolverStats {
            total_queries: 4,
            cache_hits: 1,
            cache_misses: 3,
            ..ResolverStats::default()
        }
    }
}
