//! UseCase 層のエラー型

use thiserror::Error;

use crate::domain::{RepositoryError, ValueObjectError};

/// 接続受付のエラー
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConnectError {
    #[error("failed to allocate participant id: {0}")]
    IdAllocation(#[from] ValueObjectError),

    #[error("failed to announce identity: {0}")]
    AnnounceFailed(String),
}

/// ルーム参加のエラー
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JoinError {
    #[error("already joined room '{0}'")]
    AlreadyInRoom(String),

    #[error("repository error: {0}")]
    Repository(RepositoryError),
}

/// コード同期（CODE_CHANGE / SYNC_CODE）のエラー
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CodeSyncError {
    #[error("not a member of room '{0}'")]
    NotInRoom(String),

    #[error("join a room before sending code")]
    NotJoined,

    #[error("participant '{0}' is not in your room")]
    TargetNotInRoom(String),

    #[error("failed to deliver code: {0}")]
    DeliveryFailed(String),

    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// 切断処理のエラー
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DisconnectError {
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// ルーム詳細取得のエラー
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GetRoomDetailError {
    #[error("room not found")]
    RoomNotFound,

    #[error("invalid room id: {0}")]
    InvalidRoomId(#[from] ValueObjectError),
}
