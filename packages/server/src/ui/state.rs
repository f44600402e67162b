//! Server state and dependency wiring.

use std::sync::Arc;

use codesync_shared::time::Clock;

use crate::{
    domain::{MessagePusher, RoomRepository},
    usecase::{
        ChangeCodeUseCase, ConnectParticipantUseCase, DisconnectParticipantUseCase,
        EventSequencer, GetRoomDetailUseCase, GetRoomsUseCase, JoinRoomUseCase, SyncCodeUseCase,
    },
};

/// Shared application state
pub struct AppState {
    /// ConnectParticipantUseCase（接続受付のユースケース）
    pub connect_participant_usecase: ConnectParticipantUseCase,
    /// JoinRoomUseCase（ルーム参加のユースケース）
    pub join_room_usecase: JoinRoomUseCase,
    /// ChangeCodeUseCase（編集伝搬のユースケース）
    pub change_code_usecase: ChangeCodeUseCase,
    /// SyncCodeUseCase（スナップショット転送のユースケース）
    pub sync_code_usecase: SyncCodeUseCase,
    /// DisconnectParticipantUseCase（参加者切断のユースケース）
    pub disconnect_participant_usecase: DisconnectParticipantUseCase,
    /// GetRoomsUseCase（ルーム一覧取得のユースケース）
    pub get_rooms_usecase: GetRoomsUseCase,
    /// GetRoomDetailUseCase（ルーム詳細取得のユースケース）
    pub get_room_detail_usecase: GetRoomDetailUseCase,
}

impl AppState {
    /// Wire every use-case against one repository, one pusher and one sequencer.
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let sequencer = EventSequencer::new();
        Self {
            connect_participant_usecase: ConnectParticipantUseCase::new(message_pusher.clone()),
            join_room_usecase: JoinRoomUseCase::new(
                repository.clone(),
                message_pusher.clone(),
                sequencer.clone(),
                clock,
            ),
            change_code_usecase: ChangeCodeUseCase::new(
                repository.clone(),
                message_pusher.clone(),
                sequencer.clone(),
            ),
            sync_code_usecase: SyncCodeUseCase::new(
                repository.clone(),
                message_pusher.clone(),
                sequencer.clone(),
            ),
            disconnect_participant_usecase: DisconnectParticipantUseCase::new(
                repository.clone(),
                message_pusher,
                sequencer,
            ),
            get_rooms_usecase: GetRoomsUseCase::new(repository.clone()),
            get_room_detail_usecase: GetRoomDetailUseCase::new(repository),
        }
    }
}
