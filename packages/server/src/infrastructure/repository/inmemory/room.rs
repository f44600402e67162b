//! InMemory Room Repository 実装
//!
//! ドメイン層が定義する RoomRepository trait の具体的な実装。
//! HashMap をインメモリ DB として使用します。ルームはプロセスの寿命の間だけ
//! 保持され、シリアライズはされません。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    CodeSnapshot, Participant, ParticipantId, RepositoryError, Room, RoomId, RoomRepository,
};

/// 台帳の中身: ルーム本体と、参加者 → 所属ルームの索引
#[derive(Default)]
struct Registry {
    rooms: HashMap<RoomId, Room>,
    membership: HashMap<ParticipantId, RoomId>,
}

/// インメモリ Room Repository 実装
#[derive(Default)]
pub struct InMemoryRoomRepository {
    registry: Mutex<Registry>,
}

impl InMemoryRoomRepository {
    /// 空の InMemoryRoomRepository を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn add_participant(
        &self,
        room_id: RoomId,
        participant: Participant,
    ) -> Result<Room, RepositoryError> {
        let mut registry = self.registry.lock().await;

        if let Some(current) = registry.membership.get(&participant.id) {
            return Err(RepositoryError::AlreadyInRoom {
                participant: participant.id.as_str().to_string(),
                room: current.as_str().to_string(),
            });
        }

        let participant_id = participant.id.clone();
        let created_at = participant.joined_at;
        let room = registry
            .rooms
            .entry(room_id.clone())
            .or_insert_with(|| {
                tracing::debug!("Room '{}' created", room_id);
                Room::new(room_id.clone(), created_at)
            });
        room.add_member(participant)
            .map_err(|_| RepositoryError::AlreadyInRoom {
                participant: participant_id.as_str().to_string(),
                room: room_id.as_str().to_string(),
            })?;
        let room = room.clone();

        registry.membership.insert(participant_id, room_id);
        Ok(room)
    }

    async fn remove_participant(
        &self,
        participant_id: &ParticipantId,
    ) -> Result<(Room, Participant), RepositoryError> {
        let mut registry = self.registry.lock().await;

        let room_id = registry
            .membership
            .remove(participant_id)
            .ok_or_else(|| RepositoryError::ParticipantNotFound(participant_id.to_string()))?;
        let room = registry
            .rooms
            .get_mut(&room_id)
            .ok_or_else(|| RepositoryError::RoomNotFound(room_id.to_string()))?;
        let participant = room
            .remove_member(participant_id)
            .ok_or_else(|| RepositoryError::ParticipantNotFound(participant_id.to_string()))?;
        let room = room.clone();

        if room.is_empty() {
            registry.rooms.remove(&room_id);
            tracing::debug!("Room '{}' became empty and was removed", room_id);
        }

        Ok((room, participant))
    }

    async fn room_of(&self, participant_id: &ParticipantId) -> Option<RoomId> {
        let registry = self.registry.lock().await;
        registry.membership.get(participant_id).cloned()
    }

    async fn get_room(&self, room_id: &RoomId) -> Result<Room, RepositoryError> {
        let registry = self.registry.lock().await;
        registry
            .rooms
            .get(room_id)
            .cloned()
            .ok_or_else(|| RepositoryError::RoomNotFound(room_id.to_string()))
    }

    async fn get_rooms(&self) -> Vec<Room> {
        let registry = self.registry.lock().await;
        let mut rooms: Vec<Room> = registry.rooms.values().cloned().collect();
        rooms.sort_by(|a, b| a.id.cmp(&b.id));
        rooms
    }

    async fn update_snapshot(
        &self,
        room_id: &RoomId,
        snapshot: CodeSnapshot,
    ) -> Result<(), RepositoryError> {
        let mut registry = self.registry.lock().await;
        let room = registry
            .rooms
            .get_mut(room_id)
            .ok_or_else(|| RepositoryError::RoomNotFound(room_id.to_string()))?;
        room.replace_snapshot(snapshot);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DisplayName, Timestamp};

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - InMemoryRoomRepository の参加・退出・スナップショット更新
    // - ルームの暗黙的な作成と、空になった時点での破棄
    // - 1 参加者 1 ルームの不変条件
    //
    // 【なぜこのテストが必要か】
    // - Repository は UseCase から呼ばれる台帳の中核
    // - rooms と membership の索引が常に一致している必要がある
    // ========================================

    fn participant(id: &str, name: &str) -> Participant {
        Participant::new(
            ParticipantId::new(id.to_string()).unwrap(),
            DisplayName::new(name.to_string()).unwrap(),
            Timestamp::new(1000),
        )
    }

    fn room_id(value: &str) -> RoomId {
        RoomId::new(value.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_first_join_creates_room() {
        // テスト項目: 最初の参加でルームが暗黙に作成される
        // given (前提条件):
        let repo = InMemoryRoomRepository::new();

        // when (操作):
        let room = repo
            .add_participant(room_id("r1"), participant("A", "alice"))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(room.id.as_str(), "r1");
        assert_eq!(room.members.len(), 1);
        assert_eq!(room.created_at, Timestamp::new(1000));
        assert_eq!(repo.get_rooms().await.len(), 1);
        assert_eq!(
            repo.room_of(&ParticipantId::new("A".to_string()).unwrap())
                .await,
            Some(room_id("r1"))
        );
    }

    #[tokio::test]
    async fn test_same_room_id_joins_same_room() {
        // テスト項目: 同じ room id で参加すると同じルームに入る
        // given (前提条件):
        let repo = InMemoryRoomRepository::new();
        repo.add_participant(room_id("r1"), participant("A", "alice"))
            .await
            .unwrap();

        // when (操作):
        let room = repo
            .add_participant(room_id("r1"), participant("B", "bob"))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(room.members.len(), 2);
        assert_eq!(repo.get_rooms().await.len(), 1);
    }

    #[tokio::test]
    async fn test_second_room_is_rejected() {
        // テスト項目: 既にルームに所属している参加者は別のルームに参加できない
        // given (前提条件):
        let repo = InMemoryRoomRepository::new();
        repo.add_participant(room_id("r1"), participant("A", "alice"))
            .await
            .unwrap();

        // when (操作):
        let result = repo
            .add_participant(room_id("r2"), participant("A", "alice"))
            .await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(RepositoryError::AlreadyInRoom {
                participant: "A".to_string(),
                room: "r1".to_string(),
            })
        );
        assert!(repo.get_room(&room_id("r2")).await.is_err());
    }

    #[tokio::test]
    async fn test_last_leave_removes_room() {
        // テスト項目: 最後の参加者が抜けるとルームが破棄され、スナップショットも消える
        // given (前提条件):
        let repo = InMemoryRoomRepository::new();
        let a = ParticipantId::new("A".to_string()).unwrap();
        repo.add_participant(room_id("r1"), participant("A", "alice"))
            .await
            .unwrap();
        repo.update_snapshot(&room_id("r1"), CodeSnapshot::new("x".to_string()).unwrap())
            .await
            .unwrap();

        // when (操作):
        let (room, removed) = repo.remove_participant(&a).await.unwrap();

        // then (期待する結果):
        assert!(room.is_empty());
        assert_eq!(removed.display_name.as_str(), "alice");
        assert_eq!(
            repo.get_room(&room_id("r1")).await,
            Err(RepositoryError::RoomNotFound("r1".to_string()))
        );

        // 再参加すると空のバッファから始まる
        let room = repo
            .add_participant(room_id("r1"), participant("B", "bob"))
            .await
            .unwrap();
        assert!(room.snapshot.is_empty());
    }

    #[tokio::test]
    async fn test_remove_keeps_remaining_members() {
        // テスト項目: 参加者を削除しても残りのメンバーは保持される
        // given (前提条件):
        let repo = InMemoryRoomRepository::new();
        repo.add_participant(room_id("r1"), participant("A", "alice"))
            .await
            .unwrap();
        repo.add_participant(room_id("r1"), participant("B", "bob"))
            .await
            .unwrap();

        // when (操作):
        let (room, _) = repo
            .remove_participant(&ParticipantId::new("A".to_string()).unwrap())
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(room.member_ids(), vec![ParticipantId::new("B".to_string()).unwrap()]);
        assert_eq!(repo.get_room(&room_id("r1")).await.unwrap().members.len(), 1);
    }

    #[tokio::test]
    async fn test_remove_unknown_participant() {
        // テスト項目: 所属していない参加者の削除は ParticipantNotFound になる
        // given (前提条件):
        let repo = InMemoryRoomRepository::new();

        // when (操作):
        let result = repo
            .remove_participant(&ParticipantId::new("ghost".to_string()).unwrap())
            .await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(RepositoryError::ParticipantNotFound("ghost".to_string()))
        );
    }

    #[tokio::test]
    async fn test_update_snapshot_of_missing_room() {
        // テスト項目: 存在しないルームのスナップショット更新は RoomNotFound になる
        // given (前提条件):
        let repo = InMemoryRoomRepository::new();

        // when (操作):
        let result = repo
            .update_snapshot(&room_id("nope"), CodeSnapshot::empty())
            .await;

        // then (期待する結果):
        assert_eq!(result, Err(RepositoryError::RoomNotFound("nope".to_string())));
    }
}
