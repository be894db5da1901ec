use crate::dns_name::to_fqdn;
use crate::RecordType;
use std::sync::Arc;

/// DNS class `IN`.
pub const CLASS_IN: u16 = 1;

/// One entry of a message's question section.
///
/// `domain` is kept exactly as received so that responses can echo the
/// question unchanged; use [`DnsQuery::lookup_name`] for comparisons.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DnsQuery {
    pub domain: Arc<str>,
    pub record_type: RecordType,
    pub class: u16,
}

impl DnsQuery {
    pub fn new(domain: impl Into<Arc<str>>, record_type: RecordType) -> Self {
        Self {
            domain: domain.into(),
            record_type,
            class: CLASS_IN,
        }
    }

    pub fn with_class(mut self, class: u16) -> Self {
        self.class = class;
        self
    }

    pub fn lookup_name(&self) -> String {
        to_fqdn(&self.domain)
    }
}
