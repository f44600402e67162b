//! UseCase: 接続受付処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectParticipantUseCase::execute() メソッド
//! - 接続ごとの ID 払い出しと MessagePusher への登録
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規接続に一意な ID が割り当てられ、CONNECTED が届く
//! - 正常系：拒否理由が接続元だけに届く

use std::sync::Arc;

use crate::domain::{MessagePusher, ParticipantId, ParticipantIdFactory, PusherChannel, RelayEvent};

use super::error::ConnectError;

/// 接続受付のユースケース
///
/// 参加者はこの時点ではどのルームにも所属していない（`CONNECTING` 状態）。
pub struct ConnectParticipantUseCase {
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl ConnectParticipantUseCase {
    /// 新しい ConnectParticipantUseCase を作成
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// 接続受付を実行
    ///
    /// # Arguments
    ///
    /// * `sender` - クライアントへのメッセージ送信用チャンネル
    ///
    /// # Returns
    ///
    /// * `Ok(ParticipantId)` - この接続に割り当てた ID
    /// * `Err(ConnectError)` - 受付失敗
    pub async fn execute(&self, sender: PusherChannel) -> Result<ParticipantId, ConnectError> {
        // 1. ID を払い出す（接続の寿命の間だけ有効で、再利用しない）
        let participant_id = ParticipantIdFactory::generate()?;

        // 2. MessagePusher にクライアントを登録
        self.message_pusher
            .register_client(participant_id.clone(), sender)
            .await;

        // 3. 割り当てた ID を本人に通知
        let event = RelayEvent::Connected {
            participant_id: participant_id.clone(),
        };
        if let Err(e) = self.message_pusher.push_to(&participant_id, &event).await {
            self.message_pusher.unregister_client(&participant_id).await;
            return Err(ConnectError::AnnounceFailed(e.to_string()));
        }

        Ok(participant_id)
    }

    /// 直前のイベントを拒否したことを接続元に通知
    pub async fn reject(&self, participant_id: &ParticipantId, reason: impl Into<String>) {
        let event = RelayEvent::Rejected {
            reason: reason.into(),
        };
        if let Err(e) = self.message_pusher.push_to(participant_id, &event).await {
            tracing::warn!(
                "Failed to send rejection to client '{}': {}",
                participant_id,
                e
            );
        }
    }
}
