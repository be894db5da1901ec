use ferrous_resolve_domain::{Protocol, RecordType};
use std::sync::Arc;

/// Stage of the pipeline that produced a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionStage {
    Blocked,
    Cache,
    Upstream,
    Fallback,
    FormatError,
}

impl ResolutionStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Blocked => "blocked",
            Self::Cache => "cache",
            Self::Upstream => "upstream",
            Self::Fallback => "fallback",
            Self::FormatError => "format_error",
        }
    }
}

#[derive(Debug, Clone)]
pub enum ResolutionEvent {
    QueryReceived {
        domain: Arc<str>,
        record_type: RecordType,
    },
    Blocked {
        domain: Arc<str>,
        category: String,
        reason: String,
    },
    CacheHit {
        domain: Arc<str>,
        record_type: RecordType,
    },
    CacheMiss {
        domain: Arc<str>,
        record_type: RecordType,
    },
    UpstreamExchange {
        server: Arc<str>,
        rtt_us: u64,
        success: bool,
    },
    Resolved {
        stage: ResolutionStage,
        duration_us: u64,
    },
    /// A response was handed back to the transport; `duration_us` runs from
    /// the moment the listener read the query.
    Responded {
        protocol: Protocol,
        duration_us: u64,
    },
    WorkItemDropped {
        protocol: Protocol,
    },
}
