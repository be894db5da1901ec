use ferrous_resolve_domain::{to_fqdn, RecordType};
use std::sync::Arc;

/// `(name, type)` with the name in lowercase FQDN form.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub domain: Arc<str>,
    pub record_type: RecordType,
}

impl CacheKey {
    #[inline]
    pub fn new(domain: &str, record_type: RecordType) -> Self {
        Self {
            domain: Arc::from(to_fqdn(domain)),
            record_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_normalizes_name() {
        assert_eq!(
            CacheKey::new("Example.COM", RecordType::A),
            CacheKey::new("example.com.", RecordType::A)
        );
        assert_ne!(
            CacheKey::new("example.com", RecordType::A),
            CacheKey::new("example.com", RecordType::AAAA)
        );
    }
}
