//! Ferrous Resolve Application Layer
//!
//! Ports implemented by the infrastructure crate and the use cases that drive
//! them: the resolution engine and the work queue that feeds it.
pub mod events;
pub mod ports;
pub mod use_cases;
