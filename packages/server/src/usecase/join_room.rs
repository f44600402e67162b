//! UseCase: ルーム参加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() メソッド
//! - メンバー登録 → 全員への JOINED → 新規参加者へのスナップショット送信
//!
//! ### なぜこのテストが必要か
//! - 新規参加者のバッファが既存メンバーと収束することを保証する
//! - 空のルームに入った参加者には SYNC_CODE が送られないことを保証する
//! - 1 接続 1 ルームの方針（2 回目の JOIN は拒否）を保証する
//!
//! ### どのような状況を想定しているか
//! - 正常系：空のルームへの参加、既存ルームへの参加
//! - 異常系：2 つ目のルームへの参加

use std::sync::Arc;

use codesync_shared::time::Clock;

use crate::domain::{
    DisplayName, MessagePusher, Participant, ParticipantId, RelayEvent, RepositoryError, RoomId,
    RoomRepository, Timestamp,
};

use super::{error::JoinError, sequencer::EventSequencer};

/// 参加処理の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinOutcome {
    pub room_id: RoomId,
    pub participant: Participant,
    /// 参加後のメンバー（参加者本人を含む）
    pub members: Vec<Participant>,
    /// 新規参加者にスナップショットを送ったか
    pub seeded: bool,
}

/// ルーム参加のユースケース
pub struct JoinRoomUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    sequencer: EventSequencer,
    clock: Arc<dyn Clock>,
}

impl JoinRoomUseCase {
    /// 新しい JoinRoomUseCase を作成
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        sequencer: EventSequencer,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            sequencer,
            clock,
        }
    }

    /// ルーム参加を実行
    ///
    /// 副作用は次の順序で行われる:
    ///
    /// 1. 参加者をルームのメンバーに追加（ルームが無ければ作成）
    /// 2. 参加者本人を含む全メンバーへ JOINED をブロードキャスト
    /// 3. 参加前に他のメンバーがいた場合のみ、relay が保持するスナップショットを
    ///    SYNC_CODE として参加者本人へ送信
    ///
    /// # Returns
    ///
    /// * `Ok(JoinOutcome)` - 参加成功
    /// * `Err(JoinError)` - 参加失敗（メンバーは変化しない）
    pub async fn execute(
        &self,
        participant_id: ParticipantId,
        room_id: RoomId,
        display_name: DisplayName,
    ) -> Result<JoinOutcome, JoinError> {
        let _guard = self.sequencer.acquire().await;

        // 1. メンバー登録
        let participant = Participant::new(
            participant_id.clone(),
            display_name,
            Timestamp::new(self.clock.now_millis()),
        );
        let room = self
            .repository
            .add_participant(room_id.clone(), participant.clone())
            .await
            .map_err(|e| match e {
                RepositoryError::AlreadyInRoom { room, .. } => JoinError::AlreadyInRoom(room),
                other => JoinError::Repository(other),
            })?;

        // 2. 全メンバー（本人を含む）へ JOINED
        let joined = RelayEvent::Joined {
            members: room.members.clone(),
            joiner: participant.clone(),
        };
        if let Err(e) = self
            .message_pusher
            .broadcast(room.member_ids(), &joined)
            .await
        {
            tracing::warn!("Failed to broadcast JOINED for '{}': {}", participant_id, e);
        }

        // 3. 既存メンバーがいればスナップショットを送る
        let mut seeded = false;
        if room.members.len() > 1 {
            let sync = RelayEvent::CodeSynced {
                target: participant_id.clone(),
                code: room.snapshot.clone(),
            };
            match self.message_pusher.push_to(&participant_id, &sync).await {
                Ok(()) => seeded = true,
                Err(e) => {
                    tracing::warn!("Failed to seed '{}' with snapshot: {}", participant_id, e)
                }
            }
        }

        Ok(JoinOutcome {
            room_id,
            participant,
            members: room.members,
            seeded,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{CodeSnapshot, MockMessagePusher},
        infrastructure::{
            dto::websocket::{ClientInfo, ServerEvent},
            message_pusher::WebSocketMessagePusher,
            repository::InMemoryRoomRepository,
        },
    };
    use codesync_shared::time::FixedClock;
    use tokio::sync::mpsc;

    struct Fixture {
        repository: Arc<InMemoryRoomRepository>,
        pusher: Arc<WebSocketMessagePusher>,
        usecase: JoinRoomUseCase,
    }

    fn fixture() -> Fixture {
        let repository = Arc::new(InMemoryRoomRepository::new());
        let pusher = Arc::new(WebSocketMessagePusher::new());
        let usecase = JoinRoomUseCase::new(
            repository.clone(),
            pusher.clone(),
            EventSequencer::new(),
            Arc::new(FixedClock::new(1000)),
        );
        Fixture {
            repository,
            pusher,
            usecase,
        }
    }

    async fn connect(
        pusher: &WebSocketMessagePusher,
        id: &str,
    ) -> (ParticipantId, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let participant_id = ParticipantId::new(id.to_string()).unwrap();
        pusher.register_client(participant_id.clone(), tx).await;
        (participant_id, rx)
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<String>) -> Vec<ServerEvent> {
        let mut events = Vec::new();
        while let Ok(frame) = rx.try_recv() {
            events.push(ServerEvent::from_json(&frame).unwrap());
        }
        events
    }

    fn room_id() -> RoomId {
        RoomId::new("r1".to_string()).unwrap()
    }

    fn name(value: &str) -> DisplayName {
        DisplayName::new(value.to_string()).unwrap()
    }

    fn info(id: &str, name: &str) -> ClientInfo {
        ClientInfo {
            socket_id: id.to_string(),
            username: name.to_string(),
        }
    }

    #[tokio::test]
    async fn test_first_joiner_gets_joined_but_no_sync() {
        // テスト項目: 空のルームに参加した場合、JOINED のみが届き SYNC_CODE は届かない
        // given (前提条件):
        let f = fixture();
        let (a, mut rx_a) = connect(&f.pusher, "A").await;

        // when (操作):
        let outcome = f.usecase.execute(a, room_id(), name("alice")).await.unwrap();

        // then (期待する結果):
        assert!(!outcome.seeded);
        assert_eq!(
            drain(&mut rx_a),
            vec![ServerEvent::Joined {
                clients: vec![info("A", "alice")],
                username: "alice".to_string(),
                socket_id: "A".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_second_joiner_is_seeded_with_snapshot() {
        // テスト項目: alice のいるルームに bob が参加すると、両者に JOINED が届き
        //             bob にだけスナップショットが SYNC_CODE として届く
        // given (前提条件):
        let f = fixture();
        let (a, mut rx_a) = connect(&f.pusher, "A").await;
        let (b, mut rx_b) = connect(&f.pusher, "B").await;
        f.usecase.execute(a, room_id(), name("alice")).await.unwrap();
        f.repository
            .update_snapshot(&room_id(), CodeSnapshot::new("print(1)".to_string()).unwrap())
            .await
            .unwrap();
        drain(&mut rx_a);

        // when (操作):
        let outcome = f.usecase.execute(b, room_id(), name("bob")).await.unwrap();

        // then (期待する結果):
        assert!(outcome.seeded);
        assert_eq!(outcome.members.len(), 2);
        let joined = ServerEvent::Joined {
            clients: vec![info("A", "alice"), info("B", "bob")],
            username: "bob".to_string(),
            socket_id: "B".to_string(),
        };
        assert_eq!(drain(&mut rx_a), vec![joined.clone()]);
        assert_eq!(
            drain(&mut rx_b),
            vec![
                joined,
                ServerEvent::SyncCode {
                    code: "print(1)".to_string(),
                    socket_id: "B".to_string(),
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_joiner_of_non_empty_room_is_seeded_even_with_empty_buffer() {
        // テスト項目: 既存メンバーがいれば空のバッファでも SYNC_CODE が 1 回届く
        // given (前提条件):
        let f = fixture();
        let (a, _rx_a) = connect(&f.pusher, "A").await;
        let (b, mut rx_b) = connect(&f.pusher, "B").await;
        f.usecase.execute(a, room_id(), name("alice")).await.unwrap();

        // when (操作):
        f.usecase.execute(b, room_id(), name("bob")).await.unwrap();

        // then (期待する結果):
        let syncs: Vec<ServerEvent> = drain(&mut rx_b)
            .into_iter()
            .filter(|e| matches!(e, ServerEvent::SyncCode { .. }))
            .collect();
        assert_eq!(
            syncs,
            vec![ServerEvent::SyncCode {
                code: String::new(),
                socket_id: "B".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_second_room_is_rejected() {
        // テスト項目: 同じ接続で 2 つ目のルームに参加しようとするとエラーになる
        // given (前提条件):
        let f = fixture();
        let (a, mut rx_a) = connect(&f.pusher, "A").await;
        f.usecase
            .execute(a.clone(), room_id(), name("alice"))
            .await
            .unwrap();
        drain(&mut rx_a);

        // when (操作):
        let result = f
            .usecase
            .execute(a, RoomId::new("r2".to_string()).unwrap(), name("alice"))
            .await;

        // then (期待する結果):
        assert_eq!(result, Err(JoinError::AlreadyInRoom("r1".to_string())));
        assert!(drain(&mut rx_a).is_empty());
        assert_eq!(f.repository.get_rooms().await.len(), 1);
    }

    #[tokio::test]
    async fn test_joined_is_broadcast_to_every_member() {
        // テスト項目: JOINED のブロードキャスト対象に参加者本人が含まれる
        // given (前提条件):
        let mut pusher = MockMessagePusher::new();
        pusher
            .expect_broadcast()
            .withf(|targets, event| {
                targets.len() == 1
                    && targets[0].as_str() == "A"
                    && matches!(event, RelayEvent::Joined { .. })
            })
            .times(1)
            .returning(|_, _| Ok(()));
        pusher.expect_push_to().never();
        let usecase = JoinRoomUseCase::new(
            Arc::new(InMemoryRoomRepository::new()),
            Arc::new(pusher),
            EventSequencer::new(),
            Arc::new(FixedClock::new(1000)),
        );

        // when (操作):
        let result = usecase
            .execute(
                ParticipantId::new("A".to_string()).unwrap(),
                room_id(),
                name("alice"),
            )
            .await;

        // then (期待する結果):
        assert!(result.is_ok());
    }
}
