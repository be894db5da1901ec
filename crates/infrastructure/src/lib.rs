//! Ferrous Resolve Infrastructure Layer
//!
//! Adapters behind the application ports: record cache, blocklist, upstream
//! pool, hickory wire codec, UDP/TCP listeners, and the metrics collector
//! with its Prometheus endpoint.
pub mod dns;
pub mod metrics;
