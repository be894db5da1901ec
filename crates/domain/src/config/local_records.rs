use serde::{Deserialize, Serialize};

use crate::{DnsRecord, DomainError};

/// A statically configured record served from the cache without expiry.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LocalRecordConfig {
    pub domain: String,

    #[serde(rename = "type")]
    pub record_type: String,

    pub value: String,

    #[serde(default = "default_ttl")]
    pub ttl: u32,
}

impl LocalRecordConfig {
    pub fn to_record(&self) -> Result<DnsRecord, DomainError> {
        DnsRecord::parse(&self.domain, &self.record_type, &self.value, self.ttl)
    }
}

fn default_ttl() -> u32 {
    300
}
