//! UseCase: 編集内容の伝搬（CODE_CHANGE）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ChangeCodeUseCase::execute() メソッド
//! - 送信者以外のメンバーへのバッファ全体のブロードキャストとスナップショット更新
//!
//! ### どのような状況を想定しているか
//! - 正常系：編集が他のメンバーに届き、スナップショットが最後の編集になる
//! - 異常系：所属していないルームへの編集、未参加の接続からの編集
//! - エッジケース：送信者しかいないルーム（ブロードキャスト対象なし）

use std::sync::Arc;

use crate::domain::{
    CodeSnapshot, MessagePusher, ParticipantId, RelayEvent, RoomId, RoomRepository,
};

use super::{error::CodeSyncError, sequencer::EventSequencer};

/// 編集伝搬のユースケース
///
/// 受信側は無条件に上書きする（last writer wins）。同時編集の競合解決は行わない。
pub struct ChangeCodeUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    sequencer: EventSequencer,
}

impl ChangeCodeUseCase {
    /// 新しい ChangeCodeUseCase を作成
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

    /// 編集内容の伝搬を実行
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<ParticipantId>)` - ブロードキャスト対象
    /// * `Err(CodeSyncError)` - 送信者が `room_id` のメンバーではない
    pub async fn execute(
        &self,
        sender: &ParticipantId,
        room_id: RoomId,
        code: CodeSnapshot,
    ) -> Result<Vec<ParticipantId>, CodeSyncError> {
        let _guard = self.sequencer.acquire().await;

        // 1. 送信者の所属を確認
        match self.repository.room_of(sender).await {
            Some(current) if current == room_id => {}
            Some(_) => return Err(CodeSyncError::NotInRoom(room_id.into_string())),
            None => return Err(CodeSyncError::NotJoined),
        }

        // 2. 新規参加者の初期値としてスナップショットを更新
        self.repository
            .update_snapshot(&room_id, code.clone())
            .await?;

        // 3. 送信者以外へブロードキャスト
        let room = self.repository.get_room(&room_id).await?;
        let targets = room.other_member_ids(sender);
        let event = RelayEvent::CodeChanged { room_id, code };
        self.message_pusher
            .broadcast(targets.clone(), &event)
            .await
            .map_err(|e| CodeSyncError::DeliveryFailed(e.to_string()))?;

        Ok(targets)
    }
}
