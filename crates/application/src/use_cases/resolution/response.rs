use ferrous_resolve_domain::{
    DnsMessage, DnsQuery, DnsRecord, MessageHeader, RecordData, RecordType, ResponseCode,
};
use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::Arc;

/// Alias target returned for blocked CNAME questions.
pub const BLOCKED_CNAME_TARGET: &str = "blocked.local.";

/// Build the response to `request` carrying `answers`.
///
/// Id, opcode, RD and the question section come from the request. QR and RA
/// are always set, TC is cleared and names are written uncompressed.
pub fn create_response(
    request: &DnsMessage,
    answers: Vec<DnsRecord>,
    authoritative: bool,
) -> DnsMessage {
    DnsMessage {
        header: MessageHeader {
            id: request.header.id,
            op_code: request.header.op_code,
            response: true,
            authoritative,
            truncated: false,
            recursion_desired: request.header.recursion_desired,
            recursion_available: true,
            response_code: ResponseCode::NoError,
        },
        queries: request.queries.clone(),
        answers,
        compress: false,
    }
}

/// Sinkhole answer for a blocked `question`: unspecified address for A and
/// AAAA, `blocked.local.` for CNAME, nothing for other types. TTL 0, AA set.
pub fn blocked_response(request: &DnsMessage, question: &DnsQuery) -> DnsMessage {
    let owner = Arc::clone(&question.domain);
    let data = match question.record_type {
        RecordType::A => Some(RecordData::A(Ipv4Addr::UNSPECIFIED)),
        RecordType::AAAA => Some(RecordData::AAAA(Ipv6Addr::UNSPECIFIED)),
        RecordType::CNAME => Some(RecordData::CNAME(Arc::from(BLOCKED_CNAME_TARGET))),
        _ => None,
    };
    let answers = data
        .map(|data| vec![DnsRecord::new(owner, 0, data)])
        .unwrap_or_default();

    create_response(request, answers, true)
}

/// Minimal FORMERR reply for a request that carries no question.
pub fn format_error_response(request: &DnsMessage) -> DnsMessage {
    DnsMessage {
        header: MessageHeader {
            id: request.header.id,
            op_code: request.header.op_code,
            response: true,
            authoritative: false,
            truncated: false,
            recursion_desired: request.header.recursion_desired,
            recursion_available: true,
            response_code: ResponseCode::FormErr,
        },
        queries: Vec::new(),
        answers: Vec::new(),
        compress: false,
    }
}
