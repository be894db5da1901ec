mod engine;
mod response;

pub use engine::ResolutionEngine;
pub use response::{blocked_response, create_response, format_error_response, BLOCKED_CNAME_TARGET};
