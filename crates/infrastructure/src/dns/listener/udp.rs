use crate::dns::codec::MessageCodec;
use async_trait::async_trait;
use ferrous_resolve_application::ports::WorkItem;
use ferrous_resolve_application::use_cases::WorkQueue;
use ferrous_resolve_domain::{DnsMessage, DomainError, Protocol};
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::UdpSocket;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

pub const UDP_BUFFER_SIZE: usize = 512;

/// A query received over UDP, answered with `send_to` on the listener socket.
pub struct UdpWorkItem {
    socket: Arc<UdpSocket>,
    peer: SocketAddr,
    message: DnsMessage,
    received_at: Instant,
}

impl UdpWorkItem {
    pub fn new(socket: Arc<UdpSocket>, peer: SocketAddr, message: DnsMessage) -> Self {
        Self {
            socket,
            peer,
            message,
            received_at: Instant::now(),
        }
    }

    pub fn peer(&self) -> SocketAddr {
        self.peer
    }
}

#[async_trait]
impl WorkItem for UdpWorkItem {
    fn message(&self) -> &DnsMessage {
        &self.message
    }

    fn protocol(&self) -> Protocol {
        Protocol::Udp
    }

    fn received_at(&self) -> Instant {
        self.received_at
    }

    async fn respond(self: Box<Self>, response: DnsMessage) -> Result<(), DomainError> {
        let bytes = MessageCodec::encode(&response)?;
        self.socket
            .send_to(&bytes, self.peer)
            .await
            .map_err(|e| DomainError::RespondFailed(format!("udp {}: {}", self.peer, e)))?;
        Ok(())
    }
}

pub struct UdpListenerTask {
    socket: Arc<UdpSocket>,
    queue: WorkQueue,
}

impl UdpListenerTask {
    pub async fn bind(addr: SocketAddr, queue: WorkQueue) -> io::Result<Self> {
        let socket = UdpSocket::bind(addr).await?;
        Ok(Self {
            socket: Arc::new(socket),
            queue,
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    /// Receive until `shutdown` fires or the work queue closes.
    pub async fn run(self, shutdown: CancellationToken) {
        let local_addr = self.local_addr().ok();
        info!(bind_address = ?local_addr, "UDP listener started");

        let mut buf = [0u8; UDP_BUFFER_SIZE];
        loop {
            let (len, peer) = tokio::select! {
                _ = shutdown.cancelled() => break,
                received = self.socket.recv_from(&mut buf) => match received {
                    Ok(received) => received,
                    Err(e) => {
                        // ICMP port unreachable from a previous send surfaces here on some platforms
                        debug!(error = %e, "UDP receive error");
                        continue;
                    }
                },
            };

            let message = match MessageCodec::decode(&buf[..len]) {
                Ok(message) => message,
                Err(e) => {
                    debug!(peer = %peer, bytes = len, error = %e, "Dropping undecodable UDP packet");
                    continue;
                }
            };

            let item = UdpWorkItem::new(Arc::clone(&self.socket), peer, message);
            match self.queue.submit(Box::new(item)).await {
                Ok(()) | Err(DomainError::QueueFull) => {}
                Err(e) => {
                    error!(error = %e, "UDP listener cannot submit work");
                    break;
                }
            }
        }

        info!(bind_address = ?local_addr, "UDP listener stopped");
    }
}
