use crate::dns_name::to_fqdn;
use serde::{Deserialize, Serialize};

/// A blocked domain together with why it is blocked.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BlockEntry {
    pub domain: String,

    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub reason: String,
}

impl BlockEntry {
    pub fn new(
        domain: impl Into<String>,
        category: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            domain: domain.into(),
            category: category.into(),
            reason: reason.into(),
        }
    }

    /// Lookup key of this entry.
    pub fn fqdn(&self) -> String {
        to_fqdn(&self.domain)
    }
}
