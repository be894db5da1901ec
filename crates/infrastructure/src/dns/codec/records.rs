use super::record_type_map::RecordTypeMapper;
use ferrous_resolve_domain::{to_fqdn, DnsRecord, DomainError, RecordData};
use hickory_proto::rr::{rdata, Name, RData, Record};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder, NameEncoding};
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

pub(super) fn parse_name(name: &str) -> Result<Name, DomainError> {
    Name::from_str(name)
        .map_err(|e| DomainError::InvalidDomainName(format!("Invalid domain '{}': {}", name, e)))
}

fn name_to_fqdn(name: &Name) -> Arc<str> {
    Arc::from(to_fqdn(&name.to_utf8()))
}

/// RDATA with every embedded name written out in full, so the bytes stay
/// valid wherever they are placed later.
fn opaque_rdata(data: &RData) -> Result<Vec<u8>, DomainError> {
    let mut buf = Vec::new();
    let mut encoder = BinEncoder::new(&mut buf);
    encoder.set_name_encoding(NameEncoding::Uncompressed);
    data.emit(&mut encoder)
        .map_err(|e| DomainError::EncodeFailed(e.to_string()))?;
    Ok(buf)
}

/// Convert a decoded answer. Types without a dedicated variant become
/// [`RecordData::Other`].
pub(super) fn from_hickory(record: &Record) -> Option<DnsRecord> {
    let data = match record.data() {
        RData::A(a) => RecordData::A(a.0),
        RData::AAAA(aaaa) => RecordData::AAAA(aaaa.0),
        RData::CNAME(cname) => RecordData::CNAME(name_to_fqdn(&cname.0)),
        RData::NS(ns) => RecordData::NS(name_to_fqdn(&ns.0)),
        RData::PTR(ptr) => RecordData::PTR(name_to_fqdn(&ptr.0)),
        RData::MX(mx) => RecordData::MX {
            preference: mx.preference(),
            exchange: name_to_fqdn(mx.exchange()),
        },
        RData::TXT(txt) => RecordData::TXT(txt.txt_data().iter().map(|p| p.to_vec()).collect()),
        RData::Update0(_) => return None,
        other => match opaque_rdata(other) {
            Ok(rdata) => RecordData::Other {
                record_type: RecordTypeMapper::from_hickory(other.record_type()),
                rdata,
            },
            Err(e) => {
                debug!(
                    name = %record.name(),
                    record_type = ?other.record_type(),
                    error = %e,
                    "Dropping answer record with unencodable data"
                );
                return None;
            }
        },
    };

    Some(DnsRecord::new(name_to_fqdn(record.name()), record.ttl(), data))
}

pub(super) fn to_hickory(record: &DnsRecord) -> Result<Record, DomainError> {
    let name = parse_name(&record.name)?;
    let rdata = match &record.data {
        RecordData::A(ip) => RData::A(rdata::A(*ip)),
        RecordData::AAAA(ip) => RData::AAAA(rdata::AAAA(*ip)),
        RecordData::CNAME(target) => RData::CNAME(rdata::CNAME(parse_name(target)?)),
        RecordData::NS(target) => RData::NS(rdata::NS(parse_name(target)?)),
        RecordData::PTR(target) => RData::PTR(rdata::PTR(parse_name(target)?)),
        RecordData::MX {
            preference,
            exchange,
        } => RData::MX(rdata::MX::new(*preference, parse_name(exchange)?)),
        RecordData::TXT(parts) => RData::TXT(rdata::TXT::from_bytes(
            parts.iter().map(Vec::as_slice).collect(),
        )),
        RecordData::Other { record_type, rdata } => RData::Unknown {
            code: RecordTypeMapper::to_hickory(*record_type),
            rdata: rdata::NULL::with(rdata.clone()),
        },
    };

    Ok(Record::from_rdata(name, record.ttl, rdata))
}
