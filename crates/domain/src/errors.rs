use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("Malformed DNS message: {0}")]
    MalformedMessage(String),

    #[error("Failed to encode DNS message: {0}")]
    EncodeFailed(String),

    #[error("Transport timeout talking to {server}")]
    TransportTimeout { server: String },

    #[error("Transport error with {server}: {reason}")]
    TransportIo { server: String, reason: String },

    #[error("Response id {received} from {server} does not match query id {expected}")]
    ResponseIdMismatch {
        server: String,
        expected: u16,
        received: u16,
    },

    #[error("Blocklist source {origin} failed: {reason}")]
    BlocklistSource { origin: String, reason: String },

    #[error("Work queue is full")]
    QueueFull,

    #[error("Work queue is closed")]
    QueueClosed,

    #[error("Failed to deliver response: {0}")]
    RespondFailed(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl DomainError {
    pub fn is_transport_error(&self) -> bool {
        matches!(
            self,
            DomainError::TransportTimeout { .. }
                | DomainError::TransportIo { .. }
                | DomainError::ResponseIdMismatch { .. }
        )
    }
}
