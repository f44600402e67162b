//! UseCase: 特定の参加者へのスナップショット転送（クライアント発の SYNC_CODE）
//!
//! 参加時の初期化は relay が保持するスナップショットで行う（`JoinRoomUseCase`）。
//! このユースケースはクライアントが明示的に送った SYNC_CODE を宛先へ中継するだけで、
//! relay のスナップショットは更新しない。

use std::sync::Arc;

use crate::domain::{CodeSnapshot, MessagePusher, ParticipantId, RelayEvent, RoomRepository};

use super::{error::CodeSyncError, sequencer::EventSequencer};

/// スナップショット転送のユースケース
pub struct SyncCodeUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    sequencer: EventSequencer,
}

impl SyncCodeUseCase {
    /// 新しい SyncCodeUseCase を作成
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        sequencer: EventSequencer,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            sequencer,
        }
    }

    /// 送信者と同じルームにいる `target` へコードを転送
    pub async fn execute(
        &self,
        sender: &ParticipantId,
        target: ParticipantId,
        code: CodeSnapshot,
    ) -> Result<(), CodeSyncError> {
        let _guard = self.sequencer.acquire().await;

        let sender_room = self
            .repository
            .room_of(sender)
            .await
            .ok_or(CodeSyncError::NotJoined)?;
        if self.repository.room_of(&target).await.as_ref() != Some(&sender_room) {
            return Err(CodeSyncError::TargetNotInRoom(target.into_string()));
        }

        let event = RelayEvent::CodeSynced {
            target: target.clone(),
            code,
        };
        self.message_pusher
            .push_to(&target, &event)
            .await
            .map_err(|e| CodeSyncError::DeliveryFailed(e.to_string()))
    }
}
