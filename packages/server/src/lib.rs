//! CodeSync relay library.
//!
//! Tracks room membership, fans out code edits and seeds newcomers with the
//! room's last known buffer over WebSocket.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
