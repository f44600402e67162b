//! CLI client for the CodeSync relay.

pub mod buffer;
pub mod command;
pub mod error;
pub mod executor;
pub mod formatter;
pub mod presence;
pub mod room;
pub mod runner;
pub mod session;
mod ui;

pub use runner::{ClientConfig, run_client};
