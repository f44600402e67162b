//! Shared building blocks for the CodeSync relay and client.
//!
//! - `logger`: tracing subscriber setup for both binaries
//! - `protocol`: wire events exchanged over the WebSocket
//! - `time`: clock abstraction and timestamp formatting

pub mod logger;
pub mod protocol;
pub mod time;
