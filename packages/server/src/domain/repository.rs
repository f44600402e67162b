//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{
    CodeSnapshot, Participant, ParticipantId, RepositoryError, Room, RoomId,
};

/// Room Repository trait
///
/// ルームの登録台帳（room id → メンバー集合 + スナップショット）へのインターフェース。
///
/// ## 不変条件
///
/// - 1 つの参加者は同時に 1 つのルームにしか所属しない
/// - ルームは最初の参加で暗黙に作成され、メンバーが 0 人になった時点で破棄される
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// 参加者をルームに追加（ルームが無ければ作成）し、追加後の Room を返す
    ///
    /// 参加者が既に別のルームに所属している場合は `AlreadyInRoom` を返す。
    async fn add_participant(
        &self,
        room_id: RoomId,
        participant: Participant,
    ) -> Result<Room, RepositoryError>;

    /// 参加者を所属ルームから削除し、削除後の Room と削除された参加者を返す
    ///
    /// 削除後の Room が空であれば台帳からも破棄される。
    async fn remove_participant(
        &self,
        participant_id: &ParticipantId,
    ) -> Result<(Room, Participant), RepositoryError>;

    /// 参加者が所属しているルームの ID
    async fn room_of(&self, participant_id: &ParticipantId) -> Option<RoomId>;

    /// Room エンティティを取得
    async fn get_room(&self, room_id: &RoomId) -> Result<Room, RepositoryError>;

    /// 全てのルームを取得
    async fn get_rooms(&self) -> Vec<Room>;

    /// ルームのスナップショットを置き換える
    async fn update_snapshot(
        &self,
        room_id: &RoomId,
        snapshot: CodeSnapshot,
    ) -> Result<(), RepositoryError>;
}
