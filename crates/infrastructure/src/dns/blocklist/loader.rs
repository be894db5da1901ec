use super::parser::parse_source;
use super::store::Blocklist;
use ferrous_resolve_domain::{BlockEntry, BlocklistConfig, DomainError};
use futures::future::join_all;
use std::time::{Duration, Instant};
use tracing::{info, warn};

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Counts from one blocklist load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Sources read and parsed.
    pub loaded: usize,
    /// Sources skipped after an error.
    pub failed: usize,
    /// Sources configured.
    pub total: usize,
    /// Distinct blocked names.
    pub domains: usize,
    /// Entries ignored because an earlier source listed the same name.
    pub duplicates: usize,
}

/// Reads local and remote blocklist sources into a [`Blocklist`].
pub struct BlocklistLoader {
    client: reqwest::Client,
}

impl BlocklistLoader {
    pub fn new() -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("ferrous-resolve/", env!("CARGO_PKG_VERSION")))
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|e| DomainError::BlocklistSource {
                origin: "http client".to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self { client })
    }

    pub async fn load_config(&self, config: &BlocklistConfig) -> (Blocklist, LoadReport) {
        self.load(&config.local, &config.remote).await
    }

    /// Load every source. A failed source is logged and skipped; the others
    /// still contribute. Local files come first, then remote URLs, each in
    /// the order given.
    pub async fn load(&self, local: &[String], remote: &[String]) -> (Blocklist, LoadReport) {
        let start = Instant::now();
        let mut report = LoadReport {
            total: local.len() + remote.len(),
            ..LoadReport::default()
        };
        let mut entries: Vec<BlockEntry> = Vec::new();

        for path in local {
            match read_local(path).await {
                Ok(parsed) => {
                    info!(path = %path, entries = parsed.len(), "Loaded local blocklist");
                    report.loaded += 1;
                    entries.extend(parsed);
                }
                Err(e) => {
                    warn!(path = %path, error = %e, "Skipping blocklist source");
                    report.failed += 1;
                }
            }
        }

        let fetches = remote.iter().map(|url| fetch_remote(&self.client, url));
        for (url, result) in remote.iter().zip(join_all(fetches).await) {
            match result {
                Ok(parsed) => {
                    info!(url = %url, entries = parsed.len(), "Fetched remote blocklist");
                    report.loaded += 1;
                    entries.extend(parsed);
                }
                Err(e) => {
                    warn!(url = %url, error = %e, "Skipping blocklist source");
                    report.failed += 1;
                }
            }
        }

        let blocklist = Blocklist::from_entries(entries);
        report.domains = blocklist.len();
        report.duplicates = blocklist.duplicates();

        info!(
            loaded = report.loaded,
            failed = report.failed,
            total = report.total,
            domains = report.domains,
            duplicates = report.duplicates,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Blocklist loaded"
        );

        (blocklist, report)
    }
}

async fn read_local(path: &str) -> Result<Vec<BlockEntry>, DomainError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| DomainError::BlocklistSource {
            origin: path.to_string(),
            reason: e.to_string(),
        })?;
    parse_source(&text, path)
}

async fn fetch_remote(client: &reqwest::Client, url: &str) -> Result<Vec<BlockEntry>, DomainError> {
    let failed = |reason: String| DomainError::BlocklistSource {
        origin: url.to_string(),
        reason,
    };

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| failed(format!("fetch error: {}", e)))?;

    if !response.status().is_success() {
        return Err(failed(format!("HTTP {}", response.status().as_u16())));
    }

    let text = response
        .text()
        .await
        .map_err(|e| failed(format!("read error: {}", e)))?;
    parse_source(&text, url)
}
