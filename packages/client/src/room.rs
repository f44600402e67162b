//! Client-side view of the room: own identity, presence and buffer.
//!
//! [`RoomView::apply`] folds relay events into local state and reports what
//! changed as [`Notice`]s for the UI. Local edits produce the `CODE_CHANGE`
//! event to emit.

use codesync_shared::protocol::{ClientEvent, ClientInfo, ServerEvent};

use crate::{buffer::CodeBuffer, presence::PresenceTracker};

/// Connection lifecycle as seen by this client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Transport is open; not a member yet
    Connecting,
    Joined,
    /// Terminal
    Disconnected,
}

/// Something the UI should tell the user about
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The relay assigned our identity
    Connected { socket_id: String },
    /// Our own join was confirmed
    EnteredRoom { members: Vec<ClientInfo> },
    ParticipantJoined { username: String },
    ParticipantLeft { username: String },
    /// The buffer was overwritten by a remote edit or snapshot
    BufferReplaced { from_sync: bool },
    /// The relay rejected our last event
    Rejected { message: String },
}

#[derive(Debug)]
pub struct RoomView {
    room_id: String,
    username: String,
    self_id: Option<String>,
    phase: Phase,
    presence: PresenceTracker,
    buffer: CodeBuffer,
}

impl RoomView {
    /// Names are trimmed like the relay trims them, so our own `JOINED` matches
    pub fn new(room_id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            room_id: room_id.into().trim().to_string(),
            username: username.into().trim().to_string(),
            self_id: None,
            phase: Phase::Connecting,
            presence: PresenceTracker::new(),
            buffer: CodeBuffer::new(),
        }
    }

    pub fn room_id(&self) -> &str {
        &self.room_id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn self_id(&self) -> Option<&str> {
        self.self_id.as_deref()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn presence(&self) -> &PresenceTracker {
        &self.presence
    }

    pub fn buffer(&self) -> &CodeBuffer {
        &self.buffer
    }

    /// The `JOIN` event for this room and user
    pub fn join_event(&self) -> ClientEvent {
        ClientEvent::Join {
            room_id: self.room_id.clone(),
            username: self.username.clone(),
        }
    }

    /// Fold one relay event into local state
    pub fn apply(&mut self, event: ServerEvent) -> Vec<Notice> {
        if self.phase == Phase::Disconnected {
            return Vec::new();
        }

        let mut notices = Vec::new();
        match event {
            ServerEvent::Connected { socket_id } => {
                self.self_id = Some(socket_id.clone());
                notices.push(Notice::Connected { socket_id });
            }
            ServerEvent::Joined {
                clients,
                username,
                socket_id,
            } => {
                self.presence.replace_all(clients);
                let is_self = self.self_id.as_deref() == Some(socket_id.as_str());
                if is_self && self.phase == Phase::Connecting {
                    self.phase = Phase::Joined;
                    notices.push(Notice::EnteredRoom {
                        members: self.presence.members().to_vec(),
                    });
                }
                if !is_self && username != self.username {
                    notices.push(Notice::ParticipantJoined { username });
                }
            }
            ServerEvent::SyncCode { code, socket_id } => {
                if self.self_id.as_deref() == Some(socket_id.as_str()) {
                    self.buffer.replace(code);
                    notices.push(Notice::BufferReplaced { from_sync: true });
                } else {
                    tracing::debug!("Ignoring SYNC_CODE addressed to '{}'", socket_id);
                }
            }
            ServerEvent::CodeChange { code, .. } => {
                self.buffer.replace(code);
                notices.push(Notice::BufferReplaced { from_sync: false });
            }
            ServerEvent::Disconnected { socket_id, username } => {
                if self.presence.remove(&socket_id).is_some() {
                    notices.push(Notice::ParticipantLeft { username });
                }
            }
            ServerEvent::Error { message } => {
                notices.push(Notice::Rejected { message });
            }
        }
        notices
    }

    /// Append a line locally; `None` until the join is confirmed
    pub fn append_line(&mut self, line: &str) -> Option<ClientEvent> {
        self.edit(|buffer| buffer.append_line(line))
    }

    pub fn clear(&mut self) -> Option<ClientEvent> {
        self.edit(CodeBuffer::clear)
    }

    /// Replace the buffer with `code` (e.g. a loaded file)
    pub fn load(&mut self, code: String) -> Option<ClientEvent> {
        self.edit(move |buffer| buffer.replace(code))
    }

    /// The transport is gone; no further events are applied
    pub fn mark_disconnected(&mut self) {
        self.phase = Phase::Disconnected;
        self.presence.clear();
    }

    fn edit(&mut self, f: impl FnOnce(&mut CodeBuffer)) -> Option<ClientEvent> {
        if self.phase != Phase::Joined {
            return None;
        }
        f(&mut self.buffer);
        Some(ClientEvent::CodeChange {
            room_id: self.room_id.clone(),
            code: self.buffer.as_str().to_string(),
        })
    }
}
