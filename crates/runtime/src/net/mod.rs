//! Network plumbing around the simulation worker.
//!
//! Transports stay outside the crate: they hand raw bytes to a
//! [`NetworkInbox`] and drain outbound bytes from a [`ChannelSink`].

mod inbox;
mod sink;

pub use inbox::NetworkInbox;
pub use sink::ChannelSink;
