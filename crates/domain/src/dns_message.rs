use crate::{DnsQuery, DnsRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpCode {
    Query,
    Status,
    Notify,
    Update,
    Other(u8),
}

impl OpCode {
    pub fn from_u8(code: u8) -> Self {
        match code {
            0 => OpCode::Query,
            2 => OpCode::Status,
            4 => OpCode::Notify,
            5 => OpCode::Update,
            other => OpCode::Other(other),
        }
    }

    pub fn to_u8(&self) -> u8 {
        match self {
            OpCode::Query => 0,
            OpCode::Status => 2,
            OpCode::Notify => 4,
            OpCode::Update => 5,
            OpCode::Other(code) => *code,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseCode {
    NoError,
    FormErr,
    ServFail,
    NXDomain,
    NotImp,
    Refused,
    Other(u16),
}

impl ResponseCode {
    pub fn from_u16(code: u16) -> Self {
        match code {
            0 => ResponseCode::NoError,
            1 => ResponseCode::FormErr,
            2 => ResponseCode::ServFail,
            3 => ResponseCode::NXDomain,
            4 => ResponseCode::NotImp,
            5 => ResponseCode::Refused,
            other => ResponseCode::Other(other),
        }
    }

    pub fn to_u16(&self) -> u16 {
        match self {
            ResponseCode::NoError => 0,
            ResponseCode::FormErr => 1,
            ResponseCode::ServFail => 2,
            ResponseCode::NXDomain => 3,
            ResponseCode::NotImp => 4,
            ResponseCode::Refused => 5,
            ResponseCode::Other(code) => *code,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseCode::NoError => "NOERROR",
            ResponseCode::FormErr => "FORMERR",
            ResponseCode::ServFail => "SERVFAIL",
            ResponseCode::NXDomain => "NXDOMAIN",
            ResponseCode::NotImp => "NOTIMP",
            ResponseCode::Refused => "REFUSED",
            ResponseCode::Other(_) => "UNKNOWN",
        }
    }
}

/// Header flags and identifiers of a DNS message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageHeader {
    pub id: u16,
    pub op_code: OpCode,
    /// QR bit.
    pub response: bool,
    pub authoritative: bool,
    pub truncated: bool,
    pub recursion_desired: bool,
    pub recursion_available: bool,
    pub response_code: ResponseCode,
}

impl Default for MessageHeader {
    fn default() -> Self {
        Self {
            id: 0,
            op_code: OpCode::Query,
            response: false,
            authoritative: false,
            truncated: false,
            recursion_desired: false,
            recursion_available: false,
            response_code: ResponseCode::NoError,
        }
    }
}

/// Decoded DNS message, independent of any wire codec.
///
/// Authority and additional sections are not modelled: the resolver never
/// produces them and ignores them on input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsMessage {
    pub header: MessageHeader,

    pub queries: Vec<DnsQuery>,

    pub answers: Vec<DnsRecord>,

    /// Whether the encoder may use name compression.
    pub compress: bool,
}

impl DnsMessage {
    /// A recursive query carrying a single question.
    pub fn query(id: u16, question: DnsQuery) -> Self {
        Self {
            header: MessageHeader {
                id,
                recursion_desired: true,
                ..MessageHeader::default()
            },
            queries: vec![question],
            answers: Vec::new(),
            compress: true,
        }
    }

    pub fn id(&self) -> u16 {
        self.header.id
    }

    pub fn first_question(&self) -> Option<&DnsQuery> {
        self.queries.first()
    }
}
