use serde::{Deserialize, Serialize};

/// Blocklist sources, loaded once at startup.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BlocklistConfig {
    /// Paths of local files.
    #[serde(default)]
    pub local: Vec<String>,

    /// HTTP(S) URLs.
    #[serde(default)]
    pub remote: Vec<String>,
}

impl BlocklistConfig {
    pub fn source_count(&self) -> usize {
        self.local.len() + self.remote.len()
    }
}
