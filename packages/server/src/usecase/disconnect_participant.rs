//! UseCase: 参加者切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectParticipantUseCase::execute() メソッド
//! - 切断時のメンバー削除と、残りのメンバーへの DISCONNECTED 通知
//!
//! ### なぜこのテストが必要か
//! - 切断した参加者が台帳から確実に消えることを保証する
//! - 通知は残りのメンバーにだけ届く（切断した接続は既に存在しない）
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加者の切断と通知
//! - エッジケース：最後の参加者の切断（通知対象なし、ルーム破棄）
//! - エッジケース：ルームに参加する前に切断した接続

use std::sync::Arc;

use crate::domain::{MessagePusher, Participant, ParticipantId, RelayEvent, RoomId, RoomRepository};

use super::{error::DisconnectError, sequencer::EventSequencer};

/// 切断処理の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisconnectOutcome {
    pub room_id: RoomId,
    pub participant: Participant,
    /// DISCONNECTED を通知した残りのメンバー
    pub notified: Vec<ParticipantId>,
}

/// 参加者切断のユースケース
///
/// 明示的な退出とネットワーク断は区別できないため、どちらもこのユースケースで扱う。
pub struct DisconnectParticipantUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    sequencer: EventSequencer,
}

impl DisconnectParticipantUseCase {
    /// 新しい DisconnectParticipantUseCase を作成
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

    /// 参加者切断を実行
    ///
    /// # Returns
    ///
    /// * `Ok(Some(DisconnectOutcome))` - ルームから削除し、残りのメンバーに通知した
    /// * `Ok(None)` - ルームに参加する前に切断した接続（登録解除のみ）
    /// * `Err(DisconnectError)` - 台帳の不整合
    pub async fn execute(
        &self,
        participant_id: &ParticipantId,
    ) -> Result<Option<DisconnectOutcome>, DisconnectError> {
        let _guard = self.sequencer.acquire().await;

        // 1. MessagePusher からクライアントを登録解除
        self.message_pusher.unregister_client(participant_id).await;

        // 2. 未参加の接続なら終了
        if self.repository.room_of(participant_id).await.is_none() {
            return Ok(None);
        }

        // 3. Repository 経由で参加者を削除（空になったルームは破棄される）
        let (room, participant) = self.repository.remove_participant(participant_id).await?;

        // 4. 残りのメンバーへ DISCONNECTED
        let notified = room.member_ids();
        if !notified.is_empty() {
            let event = RelayEvent::Left {
                participant: participant.clone(),
            };
            if let Err(e) = self
                .message_pusher
                .broadcast(notified.clone(), &event)
                .await
            {
                tracing::warn!("Failed to broadcast DISCONNECTED for '{}': {}", participant_id, e);
            }
        }

        Ok(Some(DisconnectOutcome {
            room_id: room.id,
            participant,
            notified,
        }))
    }
}
