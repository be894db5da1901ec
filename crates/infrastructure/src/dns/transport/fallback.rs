use super::{is_truncated, DnsTransport, TcpTransport, TransportResponse, UdpTransport};
use async_trait::async_trait;
use ferrous_resolve_domain::DomainError;
use std::net::SocketAddr;
use std::time::{Duration, Instant};
use tracing::debug;

/// UDP first; a truncated reply is retried once over TCP within what is left
/// of the timeout.
pub struct FallbackTransport {
    udp: UdpTransport,
    tcp: TcpTransport,
    server_addr: SocketAddr,
}

impl FallbackTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self {
            udp: UdpTransport::new(server_addr),
            tcp: TcpTransport::new(server_addr),
            server_addr,
        }
    }
}

#[async_trait]
impl DnsTransport for FallbackTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        let start = Instant::now();
        let response = self.udp.send(message_bytes, timeout).await?;

        if !is_truncated(&response.bytes) {
            return Ok(response);
        }

        let remaining = timeout.saturating_sub(start.elapsed());
        if remaining.is_zero() {
            return Err(DomainError::TransportTimeout {
                server: self.server_addr.to_string(),
            });
        }

        debug!(server = %self.server_addr, "Truncated UDP response, retrying over TCP");
        self.tcp.send(message_bytes, remaining).await
    }

    fn protocol_name(&self) -> &'static str {
        "UDP+TCP"
    }
}
