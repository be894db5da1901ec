use ferrous_resolve_application::events::ResolutionEventEmitter;
use ferrous_resolve_application::use_cases::{ResolutionEngine, WorkQueue, WorkReceiver};
use ferrous_resolve_domain::Config;
use ferrous_resolve_infrastructure::dns::{BlocklistLoader, RecordCache, UpstreamPool};
use ferrous_resolve_infrastructure::metrics::{MetricsCollector, ResolverMetrics};
use std::sync::Arc;
use tracing::{info, warn};

pub struct DnsServices {
    pub engine: Arc<ResolutionEngine>,
    pub cache: Arc<RecordCache>,
    pub metrics: ResolverMetrics,
    pub collector: MetricsCollector,
    pub queue: WorkQueue,
    pub receiver: WorkReceiver,
}

impl DnsServices {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        info!("Initializing DNS services");

        let (emitter, events) = ResolutionEventEmitter::new_enabled();
        let metrics = ResolverMetrics::new()?;
        let collector = MetricsCollector::new(metrics.clone(), events);

        let cache = Arc::new(RecordCache::from_config(&config.cache)?);

        let loader = BlocklistLoader::new()?;
        let (blocklist, report) = loader.load_config(&config.blocklist).await;
        if report.failed > 0 {
            warn!(
                failed = report.failed,
                total = report.total,
                "Some blocklist sources could not be loaded"
            );
        }

        let pool = UpstreamPool::from_config(&config.upstream)?.with_emitter(emitter.clone());
        info!(
            servers = pool.handles().len(),
            strategy = pool.strategy().name(),
            "Upstream pool ready"
        );

        let mut engine = ResolutionEngine::new(Arc::new(blocklist), cache.clone(), Arc::new(pool))
            .with_emitter(emitter.clone());
        if !config.cache.enabled {
            info!("Record cache disabled");
            engine = engine.without_cache();
        }

        let (queue, receiver) =
            WorkQueue::bounded(config.engine.queue_size, config.engine.enqueue_timeout());
        info!(
            capacity = queue.capacity(),
            enqueue_timeout_ms = config.engine.enqueue_timeout().as_millis() as u64,
            "Work queue ready"
        );

        Ok(Self {
            engine: Arc::new(engine),
            cache,
            metrics,
            collector,
            queue: queue.with_emitter(emitter),
            receiver,
        })
    }
}
