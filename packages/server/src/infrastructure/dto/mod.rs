//! Data Transfer Objects (DTOs) for the relay.
//!
//! DTOs are organized by protocol:
//! - `websocket`: wire events (shared with the client crate)
//! - `http`: HTTP API response DTOs

pub mod conversion;
pub mod http;

pub use codesync_shared::protocol as websocket;
