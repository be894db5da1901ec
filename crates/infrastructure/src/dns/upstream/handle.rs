use crate::dns::transport::{DnsTransport, FallbackTransport};
use ferrous_resolve_domain::{DomainError, UpstreamServerConfig};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tracing::debug;

/// Accumulated round-trip times of one upstream.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RttStats {
    pub sum: Duration,
    pub count: u64,
}

impl RttStats {
    pub fn mean(&self) -> Duration {
        if self.count == 0 {
            return Duration::ZERO;
        }
        let nanos = self.sum.as_nanos() / u128::from(self.count);
        Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
    }
}

/// A configured upstream server and its RTT history.
pub struct UpstreamHandle {
    name: Arc<str>,
    addr: SocketAddr,
    timeout: Duration,
    stats: Mutex<RttStats>,
    transport: Arc<dyn DnsTransport>,
}

impl UpstreamHandle {
    pub fn new(name: impl Into<Arc<str>>, addr: SocketAddr, timeout: Duration) -> Self {
        Self {
            name: name.into(),
            addr,
            timeout,
            stats: Mutex::new(RttStats::default()),
            transport: Arc::new(FallbackTransport::new(addr)),
        }
    }

    pub fn from_config(config: &UpstreamServerConfig) -> Result<Self, DomainError> {
        let addr = config
            .socket_addr()
            .map_err(|e| DomainError::Config(e.to_string()))?;
        Ok(Self::new(config.name.as_str(), addr, config.timeout()))
    }

    /// Replace the default UDP-with-TCP-fallback transport.
    pub fn with_transport(mut self, transport: Arc<dyn DnsTransport>) -> Self {
        self.transport = transport;
        self
    }

    pub fn name(&self) -> &Arc<str> {
        &self.name
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn stats(&self) -> MutexGuard<'_, RttStats> {
        match self.stats.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    pub fn record_rtt(&self, rtt: Duration) {
        let mut stats = self.stats();
        stats.sum += rtt;
        stats.count += 1;
    }

    pub fn rtt_stats(&self) -> RttStats {
        *self.stats()
    }

    /// Mean RTT, zero while nothing has been observed.
    pub fn mean_rtt(&self) -> Duration {
        self.stats().mean()
    }

    /// Send `message_bytes` and wait for the reply, bounded by this handle's
    /// timeout.
    pub async fn exchange(&self, message_bytes: &[u8]) -> Result<Vec<u8>, DomainError> {
        let response = self.transport.send(message_bytes, self.timeout).await?;
        debug!(
            server = %self.name,
            protocol = response.protocol_used,
            bytes = response.bytes.len(),
            "Upstream replied"
        );
        Ok(response.bytes)
    }
}

impl std::fmt::Debug for UpstreamHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamHandle")
            .field("name", &self.name)
            .field("addr", &self.addr)
            .field("timeout", &self.timeout)
            .field("transport", &self.transport.protocol_name())
            .finish()
    }
}
