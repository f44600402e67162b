//! MessagePusher trait 定義
//!
//! 接続中のクライアントへイベントを届けるためのインターフェース。
//! WebSocket などの具体的な送信手段は Infrastructure 層が実装します。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{MessagePushError, ParticipantId, RelayEvent};

/// クライアントへの送信チャンネル（エンコード済みのフレームを流す）
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// MessagePusher trait
///
/// 送信は fire-and-forget であり、受信確認は行わない。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// クライアントの送信チャンネルを登録
    async fn register_client(&self, client_id: ParticipantId, sender: PusherChannel);

    /// クライアントの送信チャンネルを登録解除
    async fn unregister_client(&self, client_id: &ParticipantId);

    /// 特定のクライアントにイベントを送信
    async fn push_to(
        &self,
        client_id: &ParticipantId,
        event: &RelayEvent,
    ) -> Result<(), MessagePushError>;

    /// 複数のクライアントにイベントを送信（一部の送信失敗は許容）
    async fn broadcast(
        &self,
        targets: Vec<ParticipantId>,
        event: &RelayEvent,
    ) -> Result<(), MessagePushError>;
}
