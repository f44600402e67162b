//! Relay-wide ordering of membership and snapshot mutations.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

/// Serializes room events across connection tasks.
///
/// A use-case holds the guard from its first registry read until its last
/// push, so every client's channel receives events in the order the registry
/// changed.
#[derive(Clone, Default)]
pub struct EventSequencer {
    gate: Arc<Mutex<()>>,
}

impl EventSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self) -> MutexGuard<'_, ()> {
        self.gate.lock().await
    }
}
