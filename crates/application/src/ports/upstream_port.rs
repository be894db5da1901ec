use async_trait::async_trait;
use ferrous_resolve_domain::{DnsMessage, DnsRecord};

#[async_trait]
pub trait UpstreamPort: Send + Sync {
    /// Forward the first question of `request` to one upstream server.
    ///
    /// Returns the answer records, or an empty vector when the exchange failed
    /// or the upstream had nothing to say.
    async fn query(&self, request: &DnsMessage) -> Vec<DnsRecord>;
}
