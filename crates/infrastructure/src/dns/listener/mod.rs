//! Network front ends. Each decoded query becomes a [`WorkItem`] on the
//! shared work queue; the items answer the client themselves.
//!
//! [`WorkItem`]: ferrous_resolve_application::ports::WorkItem

mod tcp;
mod udp;

pub use tcp::{TcpListenerTask, TcpWorkItem};
pub use udp::{UdpListenerTask, UdpWorkItem, UDP_BUFFER_SIZE};
