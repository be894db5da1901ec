/// Point-in-time copy of the resolver counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolverStats {
    pub total_queries: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub blocked: u64,
    pub upstream_exchanges: u64,
    pub upstream_failures: u64,
    pub dropped: u64,
    pub total_resolution_us: u64,
    pub total_upstream_us: u64,
}

impl ResolverStats {
    pub fn cache_hit_rate(&self) -> f64 {
        let lookups = self.cache_hits + self.cache_misses;
        if lookups == 0 {
            0.0
        } else {
            self.cache_hits as f64 / lookups as f64 * 100.0
        }
    }

    pub fn avg_resolution_us(&self) -> u64 {
        self.total_resolution_us
            .checked_div(self.total_queries)
            .unwrap_or(0)
    }

    pub fn avg_upstream_us(&self) -> u64 {
        self.total_upstream_us
            .checked_div(self.upstream_exchanges)
            .unwrap_or(0)
    }
}

pub trait StatsPort: Send + Sync {
    fn snapshot(&self) -> ResolverStats;
}
