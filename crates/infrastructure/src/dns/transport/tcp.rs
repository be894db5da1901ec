use super::{DnsTransport, TransportResponse};
use async_trait::async_trait;
use ferrous_resolve_domain::DomainError;
use std::io;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::debug;

/// DNS over TCP with the two-byte length prefix. One connection per exchange.
pub struct TcpTransport {
    server_addr: SocketAddr,
}

impl TcpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self { server_addr }
    }
}

#[async_trait]
impl DnsTransport for TcpTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        let exchange = async {
            let mut stream = TcpStream::connect(self.server_addr).await?;
            stream.set_nodelay(true)?;
            send_with_length_prefix(&mut stream, message_bytes).await?;
            read_with_length_prefix(&mut stream).await
        };

        let bytes = tokio::time::timeout(timeout, exchange)
            .await
            .map_err(|_| DomainError::TransportTimeout {
                server: self.server_addr.to_string(),
            })?
            .map_err(|e| DomainError::TransportIo {
                server: self.server_addr.to_string(),
                reason: e.to_string(),
            })?;

        debug!(
            server = %self.server_addr,
            response_len = bytes.len(),
            "TCP response received"
        );

        Ok(TransportResponse {
            bytes,
            protocol_used: "TCP",
        })
    }

    fn protocol_name(&self) -> &'static str {
        "TCP"
    }
}

/// Write one length-prefixed DNS message.
pub(crate) async fn send_with_length_prefix<S>(
    stream: &mut S,
    message_bytes: &[u8],
) -> io::Result<()>
where
    S: AsyncWriteExt + Unpin,
{
    let length = u16::try_from(message_bytes.len()).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("message too large for TCP: {} bytes", message_bytes.len()),
        )
    })?;

    let mut frame = Vec::with_capacity(message_bytes.len() + 2);
    frame.extend_from_slice(&length.to_be_bytes());
    frame.extend_from_slice(message_bytes);

    stream.write_all(&frame).await?;
    stream.flush().await
}

/// Read one length-prefixed DNS message.
pub(crate) async fn read_with_length_prefix<S>(stream: &mut S) -> io::Result<Vec<u8>>
where
    S: AsyncReadExt + Unpin,
{
    let mut len_buf = [0u8; 2];
    stream.read_exact(&mut len_buf).await?;

    let message_len = u16::from_be_bytes(len_buf) as usize;
    let mut message = vec![0u8; message_len];
    stream.read_exact(&mut message).await?;

    Ok(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_length_prefix_framing() {
        let (mut client, mut server) = tokio::io::duplex(1024);

        send_with_length_prefix(&mut client, b"hello dns").await.unwrap();
        let frame = read_with_length_prefix(&mut server).await.unwrap();

        assert_eq!(frame, b"hello dns");
    }

    #[tokio::test]
    async fn test_short_stream_is_error() {
        let (mut client, mut server) = tokio::io::duplex(64);
        client.write_all(&[0x00, 0x10, 0x01]).await.unwrap();
        drop(client);

        assert!(read_with_length_prefix(&mut server).await.is_err());
    }
}
