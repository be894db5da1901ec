use super::RecordType;
use crate::dns_name::{names_equal, to_fqdn};
use crate::DomainError;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::Arc;

/// Payload of a resource record. Types the resolver looks inside are
/// modelled; everything else travels as opaque, uncompressed RDATA.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordData {
    A(Ipv4Addr),
    AAAA(Ipv6Addr),
    CNAME(Arc<str>),
    NS(Arc<str>),
    PTR(Arc<str>),
    MX { preference: u16, exchange: Arc<str> },
    /// Character-strings, kept as raw bytes.
    TXT(Vec<Vec<u8>>),
    Other { record_type: RecordType, rdata: Vec<u8> },
}

impl RecordData {
    pub fn record_type(&self) -> RecordType {
        match self {
            RecordData::A(_) => RecordType::A,
            RecordData::AAAA(_) => RecordType::AAAA,
            RecordData::CNAME(_) => RecordType::CNAME,
            RecordData::NS(_) => RecordType::NS,
            RecordData::PTR(_) => RecordType::PTR,
            RecordData::MX { .. } => RecordType::MX,
            RecordData::TXT(_) => RecordType::TXT,
            RecordData::Other { record_type, .. } => *record_type,
        }
    }
}

/// A resource record of class `IN`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsRecord {
    pub name: Arc<str>,

    pub ttl: u32,

    pub data: RecordData,
}

impl DnsRecord {
    pub fn new(name: impl Into<Arc<str>>, ttl: u32, data: RecordData) -> Self {
        Self {
            name: name.into(),
            ttl,
            data,
        }
    }

    /// Builds a record from its textual form, as written in local record
    /// configuration: `("router.lan", "A", "192.168.1.1", 300)`.
    pub fn parse(
        domain: &str,
        record_type: &str,
        value: &str,
        ttl: u32,
    ) -> Result<Self, DomainError> {
        let name = to_fqdn(domain);
        if name == "." {
            return Err(DomainError::InvalidDomainName(domain.to_string()));
        }

        let record_type: RecordType = record_type
            .parse()
            .map_err(DomainError::InvalidRecord)?;
        let value = value.trim();

        let invalid =
            |what: &str| DomainError::InvalidRecord(format!("{} '{}' for {}", what, value, name));

        let data = match record_type {
            RecordType::A => RecordData::A(value.parse().map_err(|_| invalid("Invalid IPv4"))?),
            RecordType::AAAA => {
                RecordData::AAAA(value.parse().map_err(|_| invalid("Invalid IPv6"))?)
            }
            RecordType::CNAME => RecordData::CNAME(Arc::from(to_fqdn(value))),
            RecordType::NS => RecordData::NS(Arc::from(to_fqdn(value))),
            RecordType::PTR => RecordData::PTR(Arc::from(to_fqdn(value))),
            RecordType::MX => {
                let (preference, exchange) = value
                    .split_once(char::is_whitespace)
                    .ok_or_else(|| invalid("Invalid MX"))?;
                RecordData::MX {
                    preference: preference.parse().map_err(|_| invalid("Invalid MX"))?,
                    exchange: Arc::from(to_fqdn(exchange)),
                }
            }
            RecordType::TXT => RecordData::TXT(vec![value.as_bytes().to_vec()]),
            other => {
                return Err(DomainError::InvalidRecord(format!(
                    "Unsupported local record type: {}",
                    other
                )))
            }
        };

        Ok(Self::new(name, ttl, data))
    }

    pub fn record_type(&self) -> RecordType {
        self.data.record_type()
    }

    pub fn with_ttl(&self, ttl: u32) -> Self {
        Self {
            name: Arc::clone(&self.name),
            ttl,
            data: self.data.clone(),
        }
    }

    /// Alias target, when this is a CNAME that does not point at itself.
    pub fn cname_target(&self) -> Option<&str> {
        match &self.data {
            RecordData::CNAME(target) if !names_equal(target, &self.name) => Some(target),
            _ => None,
        }
    }
}

/// Smallest TTL across a record set.
pub fn min_ttl(records: &[DnsRecord]) -> Option<u32> {
    records.iter().map(|r| r.ttl).min()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_a_record() {
        let record = DnsRecord::parse("router.lan", "A", "192.168.1.1", 300).unwrap();
        assert_eq!(&*record.name, "router.lan.");
        assert_eq!(record.ttl, 300);
        assert_eq!(record.data, RecordData::A(Ipv4Addr::new(192, 168, 1, 1)));
    }

    #[test]
    fn test_parse_cname_normalizes_target() {
        let record = DnsRecord::parse("www.lan", "cname", "Host.LAN", 60).unwrap();
        assert_eq!(record.data, RecordData::CNAME(Arc::from("host.lan.")));
        assert_eq!(record.cname_target(), Some("host.lan."));
    }

    #[test]
    fn test_parse_mx_record() {
        let record = DnsRecord::parse("lan", "MX", "10 mail.lan", 60).unwrap();
        assert_eq!(
            record.data,
            RecordData::MX {
                preference: 10,
                exchange: Arc::from("mail.lan.")
            }
        );
    }

    #[test]
    fn test_parse_rejects_bad_address() {
        assert!(DnsRecord::parse("host.lan", "A", "not-an-ip", 60).is_err());
        assert!(DnsRecord::parse("host.lan", "AAAA", "10.0.0.1", 60).is_err());
    }

    #[test]
    fn test_parse_rejects_unsupported_type() {
        assert!(DnsRecord::parse("host.lan", "SOA", "x", 60).is_err());
    }

    #[test]
    fn test_opaque_record_keeps_its_type() {
        let data = RecordData::Other {
            record_type: RecordType::SRV,
            rdata: vec![0, 10, 0, 5, 19, 196, 0],
        };
        assert_eq!(data.record_type(), RecordType::SRV);
    }

    #[test]
    fn test_parse_txt_keeps_bytes() {
        let record = DnsRecord::parse("lan", "TXT", "v=spf1 -all", 60).unwrap();
        assert_eq!(record.data, RecordData::TXT(vec![b"v=spf1 -all".to_vec()]));
    }

    #[test]
    fn test_self_referencing_cname_has_no_target() {
        let record = DnsRecord::new("a.example.", 60, RecordData::CNAME(Arc::from("A.example")));
        assert_eq!(record.cname_target(), None);
    }

    #[test]
    fn test_min_ttl() {
        let records = vec![
            DnsRecord::new("a.", 300, RecordData::A(Ipv4Addr::LOCALHOST)),
            DnsRecord::new("a.", 30, RecordData::A(Ipv4Addr::LOCALHOST)),
        ];
        assert_eq!(min_ttl(&records), Some(30));
        assert_eq!(min_ttl(&[]), None);
    }
}
