//! UseCase 層のエラー型
//!
//! 呼び出し元（UI 層）にはこの分類だけが見える。

use thiserror::Error;

use crate::domain::{RepositoryError, RoomStatusError, SessionError, ValueObjectError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// ルーム・チーム・参加者・接続が存在しない
    #[error("not found: {0}")]
    NotFound(String),

    /// チーム未所属、0 人のチーム、不正な入力など
    #[error("bad request: {0}")]
    BadRequest(String),

    /// 管理者専用の操作を管理者以外が行った
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// 同時更新の競合
    #[error("conflict: {0}")]
    Conflict(String),

    /// 永続化層のタイムアウト・競合リトライの使い切り
    #[error("unavailable: {0}")]
    Unavailable(String),
}

impl GameError {
    pub(crate) fn not_admin(room_id: impl std::fmt::Display) -> Self {
        Self::Forbidden(format!("only the admin of room '{}' may do this", room_id))
    }
}

impl From<RepositoryError> for GameError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::RoomNotFound(_)
            | RepositoryError::TeamNotFound(_)
            | RepositoryError::ParticipantNotFound(_) => Self::NotFound(e.to_string()),
            RepositoryError::AlreadyParticipating(_) | RepositoryError::Rejected(_) => {
                Self::BadRequest(e.to_string())
            }
            RepositoryError::Conflict(_) => Self::Conflict(e.to_string()),
            RepositoryError::Unavailable(_) => Self::Unavailable(e.to_string()),
        }
    }
}

impl From<ValueObjectError> for GameError {
    fn from(e: ValueObjectError) -> Self {
        Self::BadRequest(e.to_string())
    }
}

impl From<RoomStatusError> for GameError {
    fn from(e: RoomStatusError) -> Self {
        Self::BadRequest(e.to_string())
    }
}

impl From<SessionError> for GameError {
    fn from(e: SessionError) -> Self {
        match e {
            SessionError::NotFound(_) => Self::NotFound(e.to_string()),
            SessionError::NotConnected(_) => Self::BadRequest(e.to_string()),
        }
    }
}
