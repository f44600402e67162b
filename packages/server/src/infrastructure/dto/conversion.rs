//! Conversion logic between DTOs and domain entities.

use codesync_shared::time::timestamp_to_rfc3339;

use crate::domain::{Participant, RelayEvent, Room};
use crate::infrastructure::dto::{
    http::{ParticipantDetailDto, RoomDetailDto, RoomSummaryDto},
    websocket::{ClientInfo, ServerEvent},
};

// ========================================
// Domain → Wire event
// ========================================

impl From<&Participant> for ClientInfo {
    fn from(participant: &Participant) -> Self {
        Self {
            socket_id: participant.id.as_str().to_string(),
            username: participant.display_name.as_str().to_string(),
        }
    }
}

impl From<&RelayEvent> for ServerEvent {
    fn from(event: &RelayEvent) -> Self {
        match event {
            RelayEvent::Connected { participant_id } => ServerEvent::Connected {
                socket_id: participant_id.as_str().to_string(),
            },
            RelayEvent::Joined { members, joiner } => ServerEvent::Joined {
                clients: members.iter().map(ClientInfo::from).collect(),
                username: joiner.display_name.as_str().to_string(),
                socket_id: joiner.id.as_str().to_string(),
            },
            RelayEvent::CodeSynced { target, code } => ServerEvent::SyncCode {
                code: code.as_str().to_string(),
                socket_id: target.as_str().to_string(),
            },
            RelayEvent::CodeChanged { room_id, code } => ServerEvent::CodeChange {
                room_id: room_id.as_str().to_string(),
                code: code.as_str().to_string(),
            },
            RelayEvent::Left { participant } => ServerEvent::Disconnected {
                socket_id: participant.id.as_str().to_string(),
                username: participant.display_name.as_str().to_string(),
            },
            RelayEvent::Rejected { reason } => ServerEvent::Error {
                message: reason.clone(),
            },
        }
    }
}

// ========================================
// Domain → HTTP DTO
// ========================================

impl From<&Room> for RoomSummaryDto {
    fn from(room: &Room) -> Self {
        Self {
            id: room.id.as_str().to_string(),
            participants: room
                .members
                .iter()
                .map(|p| p.display_name.as_str().to_string())
                .collect(),
            created_at: timestamp_to_rfc3339(room.created_at.value()),
        }
    }
}

impl From<&Room> for RoomDetailDto {
    fn from(room: &Room) -> Self {
        Self {
            id: room.id.as_str().to_string(),
            participants: room
                .members
                .iter()
                .map(|p| ParticipantDetailDto {
                    socket_id: p.id.as_str().to_string(),
                    username: p.display_name.as_str().to_string(),
                    joined_at: timestamp_to_rfc3339(p.joined_at.value()),
                })
                .collect(),
            code_length: room.snapshot.len(),
            created_at: timestamp_to_rfc3339(room.created_at.value()),
        }
    }
}
