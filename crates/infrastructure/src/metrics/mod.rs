mod collector;
mod http;
mod resolver_metrics;

pub use collector::MetricsCollector;
pub use http::metrics_router;
pub use resolver_metrics::{ResolverMetrics, PROMETHEUS_CONTENT_TYPE};
