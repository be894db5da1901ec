//! UDP transport for upstream queries.
//!
//! Each exchange binds a fresh ephemeral socket. Replies larger than the
//! receive buffer are cut; the caller retries over TCP when TC is set.

use super::{DnsTransport, TransportResponse};
use async_trait::async_trait;
use ferrous_resolve_domain::DomainError;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::{debug, warn};

/// Maximum UDP DNS response size with EDNS(0)
const MAX_UDP_RESPONSE_SIZE: usize = 4096;

pub struct UdpTransport {
    server_addr: SocketAddr,
}

impl UdpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self { server_addr }
    }

    fn io_error(&self, what: &str, e: std::io::Error) -> DomainError {
        DomainError::TransportIo {
            server: self.server_addr.to_string(),
            reason: format!("{}: {}", what, e),
        }
    }

    fn timeout_error(&self) -> DomainError {
        DomainError::TransportTimeout {
            server: self.server_addr.to_string(),
        }
    }
}

#[async_trait]
impl DnsTransport for UdpTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        let bind_addr = if self.server_addr.is_ipv4() {
            SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0))
        } else {
            SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0))
        };

        let socket = UdpSocket::bind(bind_addr)
            .await
            .map_err(|e| self.io_error("bind failed", e))?;

        let exchange = async {
            socket
                .send_to(message_bytes, self.server_addr)
                .await
                .map_err(|e| self.io_error("send failed", e))?;

            let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];
            loop {
                let (received, from_addr) = socket
                    .recv_from(&mut recv_buf)
                    .await
                    .map_err(|e| self.io_error("receive failed", e))?;

                if from_addr != self.server_addr {
                    warn!(
                        expected = %self.server_addr,
                        received_from = %from_addr,
                        "UDP response from unexpected source"
                    );
                    continue;
                }

                recv_buf.truncate(received);
                return Ok::<_, DomainError>(recv_buf);
            }
        };

        let bytes = tokio::time::timeout(timeout, exchange)
            .await
            .map_err(|_| self.timeout_error())??;

        debug!(
            server = %self.server_addr,
            bytes_received = bytes.len(),
            "UDP response received"
        );

        Ok(TransportResponse {
            bytes,
            protocol_used: "UDP",
        })
    }

    fn protocol_name(&self) -> &'static str {
        "UDP"
    }
}
