//! ドメイン層のエラー型

use thiserror::Error;

/// 値オブジェクトの生成失敗
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValueObjectError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    #[error("{field} must be at most {max} {unit} (got {actual})")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
        unit: &'static str,
    },
}

/// Room エンティティの不変条件違反
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoomError {
    #[error("participant '{0}' is already a member of this room")]
    AlreadyMember(String),
}

/// Repository 操作のエラー
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("room '{0}' not found")]
    RoomNotFound(String),

    #[error("participant '{0}' not found")]
    ParticipantNotFound(String),

    #[error("participant '{participant}' already belongs to room '{room}'")]
    AlreadyInRoom { participant: String, room: String },
}

/// MessagePusher 操作のエラー
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MessagePushError {
    #[error("client '{0}' is not registered")]
    ClientNotFound(String),

    #[error("failed to push message: {0}")]
    PushFailed(String),

    #[error("failed to encode event: {0}")]
    EncodeFailed(String),
}
