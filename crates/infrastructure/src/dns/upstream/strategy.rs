use super::handle::UpstreamHandle;
use ferrous_resolve_domain::UpstreamStrategy;
use std::sync::atomic::{AtomicUsize, Ordering};

/// How the pool picks one upstream per query.
#[derive(Debug)]
pub enum Strategy {
    /// Uniformly random handle.
    Random,
    /// Handles in turn, shared across all callers.
    RoundRobin { next: AtomicUsize },
    /// Lowest mean RTT; unobserved handles count as zero and ties go to the
    /// earliest handle.
    Latency,
    /// Always the first handle.
    Sequential,
}

impl Strategy {
    pub fn round_robin() -> Self {
        Self::RoundRobin {
            next: AtomicUsize::new(0),
        }
    }

    pub fn from_config(strategy: UpstreamStrategy) -> Self {
        match strategy {
            UpstreamStrategy::Random => Self::Random,
            UpstreamStrategy::RoundRobin => Self::round_robin(),
            UpstreamStrategy::Latency => Self::Latency,
            UpstreamStrategy::Sequential => Self::Sequential,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::RoundRobin { .. } => "round_robin",
            Self::Latency => "latency",
            Self::Sequential => "sequential",
        }
    }

    pub fn select<'a>(&self, handles: &'a [UpstreamHandle]) -> Option<&'a UpstreamHandle> {
        if handles.is_empty() {
            return None;
        }

        let index = match self {
            Self::Random => fastrand::usize(..handles.len()),
            Self::RoundRobin { next } => next.fetch_add(1, Ordering::Relaxed) % handles.len(),
            Self::Latency => lowest_mean_rtt(handles),
            Self::Sequential => 0,
        };
        handles.get(index)
    }
}

fn lowest_mean_rtt(handles: &[UpstreamHandle]) -> usize {
    let mut best = 0;
    let mut best_rtt = handles[0].mean_rtt();

    for (index, handle) in handles.iter().enumerate().skip(1) {
        let rtt = handle.mean_rtt();
        if rtt < best_rtt {
            best = index;
            best_rtt = rtt;
        }
    }
    best
}
