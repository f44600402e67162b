//! UseCase: ルーム一覧取得

use std::sync::Arc;

use crate::domain::{Room, RoomRepository};

/// ルーム一覧取得のユースケース
pub struct GetRoomsUseCase {
    repository: Arc<dyn RoomRepository>,
}

impl GetRoomsUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// 現在存在する全てのルーム（room id 順）
    pub async fn execute(&self) -> Vec<Room> {
        self.repository.get_rooms().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{DisplayName, Participant, ParticipantId, RoomId, Timestamp},
        infrastructure::repository::InMemoryRoomRepository,
    };

    #[tokio::test]
    async fn test_get_rooms_sorted_by_id() {
        // テスト項目: ルーム一覧が room id 順で返される
        // given (前提条件):
        let repository = Arc::new(InMemoryRoomRepository::new());
        for (room, member) in [("zeta", "A"), ("alpha", "B")] {
            repository
                .add_participant(
                    RoomId::new(room.to_string()).unwrap(),
                    Participant::new(
                        ParticipantId::new(member.to_string()).unwrap(),
                        DisplayName::new(member.to_string()).unwrap(),
                        Timestamp::new(0),
                    ),
                )
                .await
                .unwrap();
        }
        let usecase = GetRoomsUseCase::new(repository);

        // when (操作):
        let rooms = usecase.execute().await;

        // then (期待する結果):
        let ids: Vec<&str> = rooms.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["alpha", "zeta"]);
    }
}
