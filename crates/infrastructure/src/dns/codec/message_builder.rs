use super::message::MessageCodec;
use ferrous_resolve_domain::{DnsMessage, DnsQuery, DomainError};

/// Builds the queries sent to upstream servers.
pub struct MessageBuilder;

impl MessageBuilder {
    /// Recursive query for `question` with a fresh random id.
    ///
    /// Returns the id alongside the bytes for response matching.
    pub fn build_query(question: &DnsQuery) -> Result<(u16, Vec<u8>), DomainError> {
        let id = fastrand::u16(..);
        let upstream_question =
            DnsQuery::new(question.lookup_name(), question.record_type).with_class(question.class);

        let bytes = MessageCodec::encode(&DnsMessage::query(id, upstream_question))?;
        Ok((id, bytes))
    }
}
