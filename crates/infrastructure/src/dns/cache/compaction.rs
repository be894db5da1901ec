use super::storage::RecordCache;
use std::sync::atomic::Ordering as AtomicOrdering;
use std::time::Instant;
use tracing::debug;

impl RecordCache {
    /// Remove every entry that has expired. Works shard by shard, so lookups
    /// on other shards proceed during the sweep.
    pub fn compact(&self) -> usize {
        let now = Instant::now();
        let mut removed = 0usize;

        self.entries.retain(|_, answer| {
            let keep = !answer.is_expired_at(now);
            if !keep {
                removed += 1;
            }
            keep
        });

        if removed > 0 {
            self.metrics
                .compactions
                .fetch_add(removed as u64, AtomicOrdering::Relaxed);

            debug!(
                removed,
                cache_size = self.entries.len(),
                "Cache compaction completed"
            );
        }

        removed
    }
}
