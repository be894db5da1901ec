use ferrous_resolve_domain::BlockEntry;

/// Read-only view of the loaded blocklist.
pub trait BlocklistPort: Send + Sync {
    /// Exact match on the FQDN-normalized `name`.
    fn query(&self, name: &str) -> Option<&BlockEntry>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
