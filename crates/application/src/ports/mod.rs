mod blocklist_port;
mod cache_maintenance_port;
mod record_cache_port;
mod stats_port;
mod upstream_port;
mod work_item;

pub use blocklist_port::BlocklistPort;
pub use cache_maintenance_port::{CacheCompactionOutcome, CacheMaintenancePort};
pub use record_cache_port::RecordCachePort;
pub use stats_port::{ResolverStats, StatsPort};
pub use upstream_port::UpstreamPort;
pub use work_item::WorkItem;
