//! ドメインエンティティ: Participant と Room

use super::{
    error::RoomError,
    value_object::{CodeSnapshot, DisplayName, ParticipantId, RoomId, Timestamp},
};

/// ルームの参加者
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub id: ParticipantId,
    pub display_name: DisplayName,
    pub joined_at: Timestamp,
}

impl Participant {
    pub fn new(id: ParticipantId, display_name: DisplayName, joined_at: Timestamp) -> Self {
        Self {
            id,
            display_name,
            joined_at,
        }
    }
}

/// 共有コードバッファを持つルーム
///
/// `members` に順序の不変条件はない（表示用に参加順で保持している）。
/// `snapshot` は relay が最後に中継したコードであり、各参加者の手元の
/// バッファと一致する保証はない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub id: RoomId,
    pub members: Vec<Participant>,
    pub snapshot: CodeSnapshot,
    pub created_at: Timestamp,
}

impl Room {
    /// 参加者なし・空バッファのルームを作成
    pub fn new(id: RoomId, created_at: Timestamp) -> Self {
        Self {
            id,
            members: Vec::new(),
            snapshot: CodeSnapshot::empty(),
            created_at,
        }
    }

    /// 参加者を追加
    pub fn add_member(&mut self, participant: Participant) -> Result<(), RoomError> {
        if self.contains(&participant.id) {
            return Err(RoomError::AlreadyMember(participant.id.into_string()));
        }
        self.members.push(participant);
        Ok(())
    }

    /// 参加者を削除し、削除された参加者を返す（存在しなければ `None`）
    pub fn remove_member(&mut self, id: &ParticipantId) -> Option<Participant> {
        let index = self.members.iter().position(|p| &p.id == id)?;
        Some(self.members.remove(index))
    }

    pub fn contains(&self, id: &ParticipantId) -> bool {
        self.members.iter().any(|p| &p.id == id)
    }

    pub fn member_ids(&self) -> Vec<ParticipantId> {
        self.members.iter().map(|p| p.id.clone()).collect()
    }

    /// 指定した参加者以外のメンバー ID
    pub fn other_member_ids(&self, exclude: &ParticipantId) -> Vec<ParticipantId> {
        self.members
            .iter()
            .filter(|p| &p.id != exclude)
            .map(|p| p.id.clone())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// スナップショットを置き換える（last writer wins）
    pub fn replace_snapshot(&mut self, snapshot: CodeSnapshot) {
        self.snapshot = snapshot;
    }
}
