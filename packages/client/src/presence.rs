//! Local mirror of the room membership.

use codesync_shared::protocol::ClientInfo;

/// Room members as last announced by the relay, in join order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PresenceTracker {
    members: Vec<ClientInfo>,
}

impl PresenceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole list (on `JOINED`)
    pub fn replace_all(&mut self, members: Vec<ClientInfo>) {
        self.members = members;
    }

    /// Remove one identity; unknown identities are ignored
    pub fn remove(&mut self, socket_id: &str) -> Option<ClientInfo> {
        let index = self.members.iter().position(|m| m.socket_id == socket_id)?;
        Some(self.members.remove(index))
    }

    pub fn members(&self) -> &[ClientInfo] {
        &self.members
    }

    pub fn clear(&mut self) {
        self.members.clear();
    }
}
