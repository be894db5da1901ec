use super::record_type_map::RecordTypeMapper;
use super::records::{self, parse_name};
use ferrous_resolve_domain::{
    DnsMessage, DnsQuery, DomainError, MessageHeader, OpCode, ResponseCode,
};
use hickory_proto::op::{
    Message, MessageType, OpCode as HickoryOpCode, Query, ResponseCode as HickoryResponseCode,
};
use hickory_proto::rr::DNSClass;
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder, NameEncoding};

/// Wire codec for [`DnsMessage`].
pub struct MessageCodec;

impl MessageCodec {
    /// Decode a wire message. Authority and additional sections are ignored.
    pub fn decode(bytes: &[u8]) -> Result<DnsMessage, DomainError> {
        let message = Message::from_vec(bytes)
            .map_err(|e| DomainError::MalformedMessage(e.to_string()))?;

        let header = MessageHeader {
            id: message.id(),
            op_code: OpCode::from_u8(u8::from(message.op_code())),
            response: message.message_type() == MessageType::Response,
            authoritative: message.authoritative(),
            truncated: message.truncated(),
            recursion_desired: message.recursion_desired(),
            recursion_available: message.recursion_available(),
            response_code: ResponseCode::from_u16(u16::from(message.response_code())),
        };

        let queries = message
            .queries()
            .iter()
            .map(|query| {
                DnsQuery::new(
                    query.name().to_utf8(),
                    RecordTypeMapper::from_hickory(query.query_type()),
                )
                .with_class(u16::from(query.query_class()))
            })
            .collect();

        let answers = message
            .answers()
            .iter()
            .filter_map(records::from_hickory)
            .collect();

        Ok(DnsMessage {
            header,
            queries,
            answers,
            compress: true,
        })
    }

    /// Encode `message`. Names are written uncompressed when
    /// `message.compress` is false.
    pub fn encode(message: &DnsMessage) -> Result<Vec<u8>, DomainError> {
        let header = &message.header;
        let message_type = if header.response {
            MessageType::Response
        } else {
            MessageType::Query
        };

        let mut wire = Message::new(
            header.id,
            message_type,
            HickoryOpCode::from_u8(header.op_code.to_u8()),
        );
        wire.set_authoritative(header.authoritative);
        wire.set_truncated(header.truncated);
        wire.set_recursion_desired(header.recursion_desired);
        wire.set_recursion_available(header.recursion_available);
        let response_code: HickoryResponseCode = header.response_code.to_u16().into();
        wire.set_response_code(response_code);

        for question in &message.queries {
            let mut query = Query::new();
            query.set_name(parse_name(&question.domain)?);
            query.set_query_type(RecordTypeMapper::to_hickory(question.record_type));
            query.set_query_class(DNSClass::from(question.class));
            wire.add_query(query);
        }

        for answer in &message.answers {
            wire.add_answer(records::to_hickory(answer)?);
        }

        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);
        if !message.compress {
            // Uncompressed keeps the original case of every label.
            encoder.set_name_encoding(NameEncoding::Uncompressed);
        }
        wire.emit(&mut encoder)
            .map_err(|e| DomainError::EncodeFailed(e.to_string()))?;

        Ok(buf)
    }
}
