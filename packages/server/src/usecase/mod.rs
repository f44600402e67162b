//! UseCase layer: the relay's reactions to transport events.
//!
//! Every use-case that mutates membership or the snapshot runs under the
//! shared [`EventSequencer`], so broadcasts leave the relay in mutation order.

mod change_code;
mod connect_participant;
mod disconnect_participant;
mod error;
mod get_room_detail;
mod get_rooms;
mod join_room;
mod sequencer;
mod sync_code;

pub use change_code::ChangeCodeUseCase;
pub use connect_participant::ConnectParticipantUseCase;
pub use disconnect_participant::{DisconnectOutcome, DisconnectParticipantUseCase};
pub use error::{CodeSyncError, ConnectError, DisconnectError, GetRoomDetailError, JoinError};
pub use get_room_detail::GetRoomDetailUseCase;
pub use get_rooms::GetRoomsUseCase;
pub use join_room::{JoinOutcome, JoinRoomUseCase};
pub use sequencer::EventSequencer;
pub use sync_code::SyncCodeUseCase;
