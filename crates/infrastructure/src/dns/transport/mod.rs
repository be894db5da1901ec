mod fallback;
pub mod tcp;
pub mod udp;

use async_trait::async_trait;
use ferrous_resolve_domain::DomainError;
use std::time::Duration;

pub use fallback::FallbackTransport;
pub use tcp::TcpTransport;
pub use udp::UdpTransport;

#[derive(Debug)]
pub struct TransportResponse {
    pub bytes: Vec<u8>,
    /// Transport that carried the reply, `"TCP"` after a truncation retry.
    pub protocol_used: &'static str,
}

/// One request/response exchange with a DNS server.
#[async_trait]
pub trait DnsTransport: Send + Sync {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError>;

    fn protocol_name(&self) -> &'static str;
}

/// TC bit of a wire message.
pub(crate) fn is_truncated(message_bytes: &[u8]) -> bool {
    message_bytes.len() > 2 && message_bytes[2] & 0x02 != 0
}
