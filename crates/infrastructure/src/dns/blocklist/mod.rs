mod loader;
mod parser;
mod store;

pub use loader::{BlocklistLoader, LoadReport};
pub use parser::{parse_list_line, parse_source};
pub use store::Blocklist;
