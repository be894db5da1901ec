#![allow(dead_code)]
pub mod dns_server_mock;
pub mod http_server_mock;

use ferrous_resolve_domain::{DnsMessage, DnsQuery, DnsRecord, RecordData, RecordType};
use std::net::Ipv4Addr;

pub use dns_server_mock::{
    MockDnsServer, MockMode, MOCK_ANSWER_IP, MOCK_ANSWER_TTL, MOCK_SRV_RDATA,
};
pub use http_server_mock::MockHttpServer;

pub fn a_record(name: &str, ip: [u8; 4], ttl: u32) -> DnsRecord {
    DnsRecord::new(name, ttl, RecordData::A(Ipv4Addr::from(ip)))
}

pub fn cname_record(name: &str, target: &str, ttl: u32) -> DnsRecord {
    DnsRecord::new(name, ttl, RecordData::CNAME(target.into()))
}

pub fn query(id: u16, domain: &str, record_type: RecordType) -> DnsMessage {
    DnsMessage::query(id, DnsQuery::new(domain, record_type))
}
