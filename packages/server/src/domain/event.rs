//! relay が接続先へ通知するイベント（ドメイン表現）
//!
//! ワイヤ形式への変換は Infrastructure 層（`infrastructure::dto::conversion`）が担う。

use super::{
    entity::Participant,
    value_object::{CodeSnapshot, ParticipantId, RoomId},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayEvent {
    /// 接続に ID が割り当てられた
    Connected { participant_id: ParticipantId },
    /// 参加者がルームに入った（全メンバーのリスト付き）
    Joined {
        members: Vec<Participant>,
        joiner: Participant,
    },
    /// 特定の参加者宛てのスナップショット
    CodeSynced {
        target: ParticipantId,
        code: CodeSnapshot,
    },
    /// 他の参加者による編集
    CodeChanged { room_id: RoomId, code: CodeSnapshot },
    /// 参加者が切断した
    Left { participant: Participant },
    /// 直前のイベントを拒否した
    Rejected { reason: String },
}
