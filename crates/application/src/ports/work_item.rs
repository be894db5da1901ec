use async_trait::async_trait;
use ferrous_resolve_domain::{DnsMessage, DnsQuery, DomainError, Protocol};
use std::time::Instant;

/// A decoded query waiting for an answer, independent of the transport it
/// arrived on.
///
/// `respond` takes the item by value, so a query is answered at most once.
#[async_trait]
pub trait WorkItem: Send + Sync {
    fn message(&self) -> &DnsMessage;

    fn question(&self) -> Option<&DnsQuery> {
        self.message().first_question()
    }

    fn protocol(&self) -> Protocol;

    /// When the listener read the query off the network.
    fn received_at(&self) -> Instant;

    /// Encode `response` and write it back to the client.
    async fn respond(self: Box<Self>, response: DnsMessage) -> Result<(), DomainError>;
}
