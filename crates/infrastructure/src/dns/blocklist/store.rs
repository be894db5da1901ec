use ferrous_resolve_application::ports::BlocklistPort;
use ferrous_resolve_domain::{to_fqdn, BlockEntry};
use rustc_hash::FxHashMap;

/// Immutable set of blocked names keyed by FQDN.
#[derive(Debug, Default)]
pub struct Blocklist {
    entries: FxHashMap<String, BlockEntry>,
    duplicates: usize,
}

impl Blocklist {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from entries in load order. The first entry for a name wins.
    pub fn from_entries(entries: impl IntoIterator<Item = BlockEntry>) -> Self {
        let mut map: FxHashMap<String, BlockEntry> = FxHashMap::default();
        let mut duplicates = 0;

        for entry in entries {
            let key = entry.fqdn();
            if key == "." {
                continue;
            }
            if map.contains_key(&key) {
                duplicates += 1;
                continue;
            }
            map.insert(key, entry);
        }

        Self {
            entries: map,
            duplicates,
        }
    }

    pub fn get(&self, name: &str) -> Option<&BlockEntry> {
        self.entries.get(&to_fqdn(name))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries dropped because an earlier source already listed the name.
    pub fn duplicates(&self) -> usize {
        self.duplicates
    }
}

impl BlocklistPort for Blocklist {
    fn query(&self, name: &str) -> Option<&BlockEntry> {
        self.get(name)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
