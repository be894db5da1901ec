use ferrous_resolve_domain::{to_fqdn, BlockEntry, DomainError};
use serde::Deserialize;

/// Category given to entries from plain domain lists and hosts files.
pub const PLAIN_LIST_CATEGORY: &str = "list";

#[derive(Debug, Deserialize)]
struct BlocklistDocument {
    #[serde(default)]
    blocks: Vec<BlockEntry>,
}

/// Parse one blocklist source.
///
/// A TOML document with `[[blocks]]` tables is read as structured entries.
/// Anything that is not TOML is read as a plain list: one domain per line or
/// hosts-file lines, `#` starting a comment.
pub fn parse_source(text: &str, origin: &str) -> Result<Vec<BlockEntry>, DomainError> {
    match toml::from_str::<BlocklistDocument>(text) {
        Ok(document) => Ok(document
            .blocks
            .into_iter()
            .filter(|entry| to_fqdn(&entry.domain) != ".")
            .collect()),
        Err(e) if text.contains("[[blocks]]") => Err(DomainError::BlocklistSource {
            origin: origin.to_string(),
            reason: e.to_string(),
        }),
        Err(_) => {
            let reason = format!("listed in {}", origin);
            Ok(text
                .lines()
                .filter_map(parse_list_line)
                .map(|domain| BlockEntry::new(domain, PLAIN_LIST_CATEGORY, reason.as_str()))
                .collect())
        }
    }
}

/// Domain named by a plain list or hosts-file line, if any.
pub fn parse_list_line(line: &str) -> Option<String> {
    let line = match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    };
    let line = line.trim();

    if line.is_empty() || line.starts_with('!') {
        return None;
    }

    let parts: Vec<&str> = line.split_whitespace().collect();

    if parts.len() >= 2 {
        let addr = parts[0];
        let domain = parts[1];

        let is_hosts_addr = matches!(addr, "0.0.0.0" | "127.0.0.1" | "::" | "::1");
        if !is_hosts_addr {
            return None;
        }
        if matches!(
            domain,
            "localhost" | "0.0.0.0" | "broadcasthost" | "ip6-localhost" | "ip6-loopback"
        ) {
            return None;
        }
        if !domain.contains('.') {
            return None;
        }
        return Some(domain.to_ascii_lowercase());
    }

    if parts.len() == 1 && parts[0].contains('.') {
        return Some(parts[0].to_ascii_lowercase());
    }

    None
}
