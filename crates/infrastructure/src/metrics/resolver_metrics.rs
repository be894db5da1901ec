use ferrous_resolve_application::events::{ResolutionEvent, ResolutionStage};
use ferrous_resolve_application::ports::{ResolverStats, StatsPort};
use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
};
use std::sync::Arc;

pub const PROMETHEUS_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

const REQUEST_BUCKETS: &[f64] = &[0.01, 0.1, 0.25];
const UPSTREAM_BUCKETS: &[f64] = &[0.01, 0.02, 0.03, 0.04, 0.05];

const US_PER_SEC: f64 = 1_000_000.0;

struct Collectors {
    registry: Registry,
    total_queries: IntCounter,
    cache_hits: IntCounter,
    cache_misses: IntCounter,
    blocked: IntCounter,
    upstream_failures: IntCounter,
    total_resolution_us: IntCounter,
    total_upstream_us: IntCounter,
    upstream_exchanges: IntCounter,
    dropped: IntCounter,
    dropped_by_protocol: IntCounterVec,
    resolved: IntCounterVec,
    upstream_by_server: IntCounterVec,
    request_duration: HistogramVec,
    resolution_duration: HistogramVec,
    upstream_duration: HistogramVec,
}

/// Prometheus collectors fed from [`ResolutionEvent`]s. Clones share the
/// same registry.
#[derive(Clone)]
pub struct ResolverMetrics {
    inner: Arc<Collectors>,
}

impl ResolverMetrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let counter = |name: &str, help: &str| -> Result<IntCounter, prometheus::Error> {
            let counter = IntCounter::with_opts(Opts::new(name, help))?;
            registry.register(Box::new(counter.clone()))?;
            Ok(counter)
        };
        let counter_vec =
            |name: &str, help: &str, label: &str| -> Result<IntCounterVec, prometheus::Error> {
                let counter = IntCounterVec::new(Opts::new(name, help), &[label])?;
                registry.register(Box::new(counter.clone()))?;
                Ok(counter)
            };
        let histogram = |name: &str,
                         help: &str,
                         buckets: &[f64],
                         label: &str|
         -> Result<HistogramVec, prometheus::Error> {
            let opts = HistogramOpts::new(name, help).buckets(buckets.to_vec());
            let histogram = HistogramVec::new(opts, &[label])?;
            registry.register(Box::new(histogram.clone()))?;
            Ok(histogram)
        };

        let collectors = Collectors {
            total_queries: counter("dns_total_queries", "Total number of DNS queries answered.")?,
            cache_hits: counter("dns_cache_hits", "Queries answered from the record cache.")?,
            cache_misses: counter("dns_cache_misses", "Record cache lookups that missed.")?,
            blocked: counter("dns_blocked_count", "Queries answered by the blocklist.")?,
            upstream_failures: counter(
                "dns_upstream_failures",
                "Upstream exchanges that failed or timed out.",
            )?,
            total_resolution_us: counter(
                "dns_resolution_microseconds_total",
                "Cumulative time spent resolving queries.",
            )?,
            total_upstream_us: counter(
                "dns_upstream_microseconds_total",
                "Cumulative upstream round-trip time.",
            )?,
            upstream_exchanges: counter(
                "dns_upstream_exchanges",
                "Upstream exchanges attempted.",
            )?,
            dropped: counter(
                "dns_dropped_queries",
                "Queries dropped because the work queue was full.",
            )?,
            dropped_by_protocol: counter_vec(
                "dns_dropped_queries_by_protocol",
                "Dropped queries by the transport they arrived on.",
                "protocol",
            )?,
            resolved: counter_vec(
                "dns_resolved_queries",
                "Answered queries by the stage that produced the answer.",
                "stage",
            )?,
            upstream_by_server: counter_vec(
                "dns_upstream_exchanges_by_server",
                "Upstream exchanges by server.",
                "server",
            )?,
            request_duration: histogram(
                "dns_request_duration",
                "Duration of request starting from networking layer to response.",
                REQUEST_BUCKETS,
                "protocol",
            )?,
            resolution_duration: histogram(
                "dns_resolution_duration",
                "Time taken to process a request after handoff from networking layer.",
                REQUEST_BUCKETS,
                "stage",
            )?,
            upstream_duration: histogram(
                "dns_upstream_duration",
                "Time taken to query upstream DNS server.",
                UPSTREAM_BUCKETS,
                "server",
            )?,
            registry,
        };

        Ok(Self {
            inner: Arc::new(collectors),
        })
    }

    pub fn track(&self, event: &ResolutionEvent) {
        let m = &self.inner;
        match event {
            ResolutionEvent::QueryReceived { .. } => {}
            ResolutionEvent::Blocked { .. } => m.blocked.inc(),
            ResolutionEvent::CacheHit { .. } => m.cache_hits.inc(),
            ResolutionEvent::CacheMiss { .. } => m.cache_misses.inc(),
            ResolutionEvent::UpstreamExchange {
                server,
                rtt_us,
                success,
            } => {
                m.upstream_exchanges.inc();
                m.upstream_by_server.with_label_values(&[&**server]).inc();
                m.upstream_duration
                    .with_label_values(&[&**server])
                    .observe(*rtt_us as f64 / US_PER_SEC);
                m.total_upstream_us.inc_by(*rtt_us);
                if !success {
                    m.upstream_failures.inc();
                }
            }
            ResolutionEvent::Resolved { stage, duration_us } => {
                m.total_queries.inc();
                m.total_resolution_us.inc_by(*duration_us);
                m.resolved.with_label_values(&[stage.as_str()]).inc();
                m.resolution_duration
                    .with_label_values(&[stage.as_str()])
                    .observe(*duration_us as f64 / US_PER_SEC);
            }
            ResolutionEvent::Responded {
                protocol,
                duration_us,
            } => {
                m.request_duration
                    .with_label_values(&[protocol.as_str()])
                    .observe(*duration_us as f64 / US_PER_SEC);
            }
            ResolutionEvent::WorkItemDropped { protocol } => {
                m.dropped.inc();
                m.dropped_by_protocol
                    .with_label_values(&[protocol.as_str()])
                    .inc();
            }
        }
    }

    pub fn stage_count(&self, stage: ResolutionStage) -> u64 {
        self.inner.resolved.with_label_values(&[stage.as_str()]).get()
    }

    pub fn upstream_count(&self, server: &str) -> u64 {
        self.inner.upstream_by_server.with_label_values(&[server]).get()
    }

    /// Number of request durations observed for `protocol`.
    pub fn request_count(&self, protocol: &str) -> u64 {
        self.inner
            .request_duration
            .with_label_values(&[protocol])
            .get_sample_count()
    }

    /// Render every collector in the Prometheus text exposition format.
    pub fn render(&self) -> Result<Vec<u8>, prometheus::Error> {
        let metric_families = self.inner.registry.gather();
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&metric_families, &mut buffer)?;
        Ok(buffer)
    }
}

impl StatsPort for ResolverMetrics {
    fn snapshot(&self) -> ResolverStats {
        let m = &self.inner;
        ResolverStats {
            total_queries: m.total_queries.get(),
            cache_hits: m.cache_hits.get(),
            cache_misses: m.cache_misses.get(),
            blocked: m.blocked.get(),
            upstream_exchanges: m.upstream_exchanges.get(),
            upstream_failures: m.upstream_failures.get(),
            dropped: m.dropped.get(),
            total_resolution_us: m.total_resolution_us.get(),
            total_upstream_us: m.total_upstream_us.get(),
        }
    }
}

impl std::fmt::Debug for ResolverMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolverMetrics")
            .field("snapshot", &self.snapshot())
            .finish()
    }
}
