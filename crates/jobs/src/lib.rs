pub mod cache_housekeeping;
pub mod runner;
pub mod stats_report;

pub use cache_housekeeping::CacheHousekeepingJob;
pub use runner::JobRunner;
pub use stats_report::StatsReportJob;
