#![allow(dead_code)]
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, UdpSocket};
use tokio::sync::oneshot;

pub const MOCK_ANSWER_IP: [u8; 4] = [93, 184, 216, 34];
pub const MOCK_ANSWER_TTL: u32 = 300;

/// `10 5 5060 sip.example.com.`
pub const MOCK_SRV_RDATA: &[u8] = &[
    0x00, 0x0a, 0x00, 0x05, 0x13, 0xc4, 3, b's', b'i', b'p', 7, b'e', b'x', b'a', b'm', b'p',
    b'l', b'e', 3, b'c', b'o', b'm', 0,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockMode {
    /// Answer every query with one A record.
    Answer,
    /// Never reply.
    Silent,
    /// Reply over UDP with TC=1 and no answers; answer fully over TCP on the
    /// same port.
    Truncate,
    /// Answer with a transaction id that does not match the query.
    WrongId,
    /// Answer every query with one SRV record.
    Srv,
}

pub struct MockDnsServer {
    addr: SocketAddr,
    calls: Arc<AtomicUsize>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start(mode: MockMode) -> Result<Self, std::io::Error> {
        let socket = UdpSocket::bind("127.0.0.1:0").await?;
        let local_addr = socket.local_addr()?;
        let calls = Arc::new(AtomicUsize::new(0));

        let tcp = if mode == MockMode::Truncate {
            Some(TcpListener::bind(local_addr).await?)
        } else {
            None
        };

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();
        let counter = Arc::clone(&calls);

        tokio::spawn(async move {
            let mut buf = vec![0u8; 512];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            counter.fetch_add(1, Ordering::SeqCst);
                            let response = match mode {
                                MockMode::Answer => Self::build_mock_response(&buf[..len]),
                                MockMode::Srv => Self::build_response(&buf[..len], 33, MOCK_SRV_RDATA),
                                MockMode::Silent => continue,
                                MockMode::Truncate => Self::build_truncated_response(&buf[..len]),
                                MockMode::WrongId => {
                                    let mut response = Self::build_mock_response(&buf[..len]);
                                    if response.len() >= 2 {
                                        response[0] ^= 0xff;
                                    }
                                    response
                                }
                            };
                            let _ = socket.send_to(&response, peer).await;
                        }
                    }
                    accepted = accept(&tcp) => {
                        if let Ok((mut stream, _)) = accepted {
                            tokio::spawn(async move {
                                let mut len_buf = [0u8; 2];
                                if stream.read_exact(&mut len_buf).await.is_err() {
                                    return;
                                }
                                let mut query = vec![0u8; u16::from_be_bytes(len_buf) as usize];
                                if stream.read_exact(&mut query).await.is_err() {
                                    return;
                                }
                                let response = Self::build_mock_response(&query);
                                let _ = stream.write_all(&(response.len() as u16).to_be_bytes()).await;
                                let _ = stream.write_all(&response).await;
                            });
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr: local_addr,
            calls,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Number of UDP datagrams received so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn build_mock_response(query: &[u8]) -> Vec<u8> {
        Self::build_response(query, 1, &MOCK_ANSWER_IP)
    }

    fn build_response(query: &[u8], record_type: u16, rdata: &[u8]) -> Vec<u8> {
        if query.len() < 12 {
            return vec![];
        }

        let mut response = Vec::with_capacity(512);

        response.extend_from_slice(&query[0..2]);
        // QR, RD, RA
        response.push(0x81);
        response.push(0x80);
        response.extend_from_slice(&query[4..6]);
        response.extend_from_slice(&[0x00, 0x01]);
        response.extend_from_slice(&[0x00, 0x00]);
        response.extend_from_slice(&[0x00, 0x00]);

        if query.len() > 12 {
            response.extend_from_slice(&query[12..]);
        }

        response.extend_from_slice(&[0xc0, 0x0c]);
        response.extend_from_slice(&record_type.to_be_bytes());
        response.extend_from_slice(&[0x00, 0x01]);
        response.extend_from_slice(&MOCK_ANSWER_TTL.to_be_bytes());
        response.extend_from_slice(&(rdata.len() as u16).to_be_bytes());
        response.extend_from_slice(rdata);

        response
    }

    fn build_truncated_response(query: &[u8]) -> Vec<u8> {
        if query.len() < 12 {
            return vec![];
        }

        let mut response = Vec::with_capacity(query.len());
        response.extend_from_slice(&query[0..2]);
        // QR, TC, RD
        response.push(0x83);
        response.push(0x80);
        response.extend_from_slice(&query[4..6]);
        response.extend_from_slice(&[0x00, 0x00, 0x00, 0x00, 0x00, 0x00]);
        if query.len() > 12 {
            response.extend_from_slice(&query[12..]);
        }
        response
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

async fn accept(
    listener: &Option<TcpListener>,
) -> std::io::Result<(tokio::net::TcpStream, SocketAddr)> {
    match listener {
        Some(listener) => listener.accept().await,
        None => std::future::pending().await,
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
