use ferrous_resolve_domain::DnsRecord;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// One cached record set. Immutable once stored: a newer write replaces the
/// whole entry.
#[derive(Debug, Clone)]
pub struct CachedAnswer {
    records: Arc<[DnsRecord]>,
    expires_at: Option<Instant>,
    stamp: u64,
}

impl CachedAnswer {
    pub fn new(records: Vec<DnsRecord>, ttl: Duration, stamp: u64, now: Instant) -> Self {
        Self {
            records: Arc::from(records),
            expires_at: now.checked_add(ttl),
            stamp,
        }
    }

    /// Entry that never expires. Used for static local records.
    pub fn permanent(records: Vec<DnsRecord>, stamp: u64) -> Self {
        Self {
            records: Arc::from(records),
            expires_at: None,
            stamp,
        }
    }

    #[inline]
    pub fn stamp(&self) -> u64 {
        self.stamp
    }

    #[inline]
    pub fn expires_at(&self) -> Option<Instant> {
        self.expires_at
    }

    #[inline]
    pub fn is_permanent(&self) -> bool {
        self.expires_at.is_none()
    }

    #[inline]
    pub fn is_expired_at(&self, now: Instant) -> bool {
        matches!(self.expires_at, Some(expires_at) if now >= expires_at)
    }

    /// Records with their TTL lowered to the remaining lifetime.
    pub fn records_at(&self, now: Instant) -> Vec<DnsRecord> {
        let Some(expires_at) = self.expires_at else {
            return self.records.to_vec();
        };

        let remaining = expires_at.saturating_duration_since(now).as_secs();
        let remaining = u32::try_from(remaining).unwrap_or(u32::MAX);
        self.records
            .iter()
            .map(|record| record.with_ttl(record.ttl.min(remaining)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferrous_resolve_domain::RecordData;
    use std::net::Ipv4Addr;

    fn record(ttl: u32) -> DnsRecord {
        DnsRecord::new("example.com.", ttl, RecordData::A(Ipv4Addr::new(192, 0, 2, 1)))
    }

    #[test]
    fn test_expiry_boundary() {
        let now = Instant::now();
        let answer = CachedAnswer::new(vec![record(10)], Duration::from_secs(10), 1, now);

        assert!(!answer.is_expired_at(now));
        assert!(!answer.is_expired_at(now + Duration::from_secs(9)));
        assert!(answer.is_expired_at(now + Duration::from_secs(10)));
    }

    #[test]
    fn test_remaining_ttl_is_clamped() {
        let now = Instant::now();
        let answer = CachedAnswer::new(
            vec![record(30), record(600)],
            Duration::from_secs(300),
            1,
            now,
        );

        let ttls: Vec<u32> = answer
            .records_at(now + Duration::from_secs(100))
            .iter()
            .map(|r| r.ttl)
            .collect();
        assert_eq!(ttls, vec![30, 200]);
    }

    #[test]
    fn test_permanent_never_expires() {
        let answer = CachedAnswer::permanent(vec![record(300)], 1);
        let later = Instant::now() + Duration::from_secs(86_400);

        assert!(answer.is_permanent());
        assert!(!answer.is_expired_at(later));
        assert_eq!(answer.records_at(later)[0].ttl, 300);
    }
}
