//! Domain layer: room membership, participants and the ports the use-cases
//! depend on.
//!
//! Infrastructure implements [`RoomRepository`] and [`MessagePusher`]; nothing
//! in this module knows about WebSocket frames or JSON.

pub mod entity;
pub mod error;
pub mod event;
pub mod factory;
pub mod message_pusher;
pub mod repository;
pub mod value_object;

pub use entity::{Participant, Room};
pub use error::{MessagePushError, RepositoryError, RoomError, ValueObjectError};
pub use event::RelayEvent;
pub use factory::ParticipantIdFactory;
pub use message_pusher::{MessagePusher, PusherChannel};
#[cfg(test)]
pub use message_pusher::MockMessagePusher;
pub use repository::RoomRepository;
pub use value_object::{CodeSnapshot, DisplayName, ParticipantId, RoomId, Timestamp};
