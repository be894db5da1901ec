use crate::dns::codec::MessageCodec;
use crate::dns::transport::tcp::{read_with_length_prefix, send_with_length_prefix};
use async_trait::async_trait;
use ferrous_resolve_application::ports::WorkItem;
use ferrous_resolve_application::use_cases::WorkQueue;
use ferrous_resolve_domain::{DnsMessage, DomainError, Protocol};
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// A query received on a TCP connection. Responses for pipelined queries on
/// the same connection share one write half.
pub struct TcpWorkItem {
    writer: Arc<Mutex<OwnedWriteHalf>>,
    peer: SocketAddr,
    message: DnsMessage,
    received_at: Instant,
}

impl TcpWorkItem {
    pub fn new(writer: Arc<Mutex<OwnedWriteHalf>>, peer: SocketAddr, message: DnsMessage) -> Self {
        Self {
            writer,
            peer,
            message,
            received_at: Instant::now(),
        }
    }
}

#[async_trait]
impl WorkItem for TcpWorkItem {
    fn message(&self) -> &DnsMessage {
        &self.message
    }

    fn protocol(&self) -> Protocol {
        Protocol::Tcp
    }

    fn received_at(&self) -> Instant {
        self.received_at
    }

    async fn respond(self: Box<Self>, response: DnsMessage) -> Result<(), DomainError> {
        let bytes = MessageCodec::encode(&response)?;
        let mut writer = self.writer.lock().await;
        send_with_length_prefix(&mut *writer, &bytes)
            .await
            .map_err(|e| DomainError::RespondFailed(format!("tcp {}: {}", self.peer, e)))
    }
}

const DEFAULT_TCP_IDLE_TIMEOUT: Duration = Duration::from_secs(10);

pub struct TcpListenerTask {
    listener: TcpListener,
    queue: WorkQueue,
    idle_timeout: Duration,
}

impl TcpListenerTask {
    pub async fn bind(addr: SocketAddr, queue: WorkQueue) -> io::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self {
            listener,
            queue,
            idle_timeout: DEFAULT_TCP_IDLE_TIMEOUT,
        })
    }

    /// Close connections that go this long without delivering a full frame.
    pub fn with_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accept connections until `shutdown` fires. Each connection is served
    /// on its own task.
    pub async fn run(self, shutdown: CancellationToken) {
        let local_addr = self.local_addr().ok();
        info!(bind_address = ?local_addr, "TCP listener started");

        loop {
            let (stream, peer) = tokio::select! {
                _ = shutdown.cancelled() => break,
                accepted = self.listener.accept() => match accepted {
                    Ok(accepted) => accepted,
                    Err(e) => {
                        warn!(error = %e, "TCP accept failed");
                        continue;
                    }
                },
            };

            debug!(peer = %peer, "TCP connection accepted");
            let queue = self.queue.clone();
            let shutdown = shutdown.clone();
            let idle_timeout = self.idle_timeout;
            tokio::spawn(async move {
                serve_connection(stream, peer, queue, idle_timeout, shutdown).await;
            });
        }

        info!(bind_address = ?local_addr, "TCP listener stopped");
    }
}

async fn serve_connection(
    stream: TcpStream,
    peer: SocketAddr,
    queue: WorkQueue,
    idle_timeout: Duration,
    shutdown: CancellationToken,
) {
    let (mut reader, writer): (OwnedReadHalf, OwnedWriteHalf) = stream.into_split();
    let writer = Arc::new(Mutex::new(writer));

    loop {
        let frame = tokio::select! {
            _ = shutdown.cancelled() => break,
            frame = tokio::time::timeout(idle_timeout, read_with_length_prefix(&mut reader)) => frame,
        };

        let frame = match frame {
            Ok(Ok(frame)) => frame,
            Err(_) => {
                debug!(peer = %peer, timeout_ms = idle_timeout.as_millis() as u64, "TCP connection idle, closing");
                break;
            }
            Ok(Err(e)) if e.kind() == io::ErrorKind::UnexpectedEof => break,
            Ok(Err(e)) => {
                debug!(peer = %peer, error = %e, "TCP read failed, closing connection");
                break;
            }
        };

        let message = match MessageCodec::decode(&frame) {
            Ok(message) => message,
            Err(e) => {
                debug!(peer = %peer, bytes = frame.len(), error = %e, "Dropping undecodable TCP frame");
                continue;
            }
        };

        let item = TcpWorkItem::new(Arc::clone(&writer), peer, message);
        match queue.submit(Box::new(item)).await {
            Ok(()) | Err(DomainError::QueueFull) => {}
            Err(e) => {
                error!(peer = %peer, error = %e, "TCP connection cannot submit work");
                break;
            }
        }
    }

    debug!(peer = %peer, "TCP connection closed");
}
