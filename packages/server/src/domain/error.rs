//! ドメイン層のエラー型

use thiserror::Error;

use super::entity::RoomStatus;

/// 値オブジェクト生成時のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("invalid id: '{0}'")]
    InvalidId(String),

    #[error("name must not be empty")]
    EmptyName,

    #[error("name must be at most {max} characters")]
    NameTooLong { max: usize },

    #[error("number of rounds must be between 1 and {max}, got {value}")]
    InvalidNumberOfRounds { value: u32, max: u32 },

    #[error("total points would overflow")]
    ScoreOverflow,
}

/// ルームのライフサイクル遷移エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("illegal room status transition: {from:?} -> {to:?}")]
pub struct RoomStatusError {
    pub from: RoomStatus,
    pub to: RoomStatus,
}

/// Repository 操作のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("room '{0}' not found")]
    RoomNotFound(String),

    #[error("team '{0}' not found")]
    TeamNotFound(String),

    #[error("participant '{0}' not found")]
    ParticipantNotFound(String),

    /// ユーザーは既にどこかのルームに参加している
    #[error("user '{0}' already participates in a room")]
    AlreadyParticipating(String),

    /// 更新内容がエンティティの制約に反する
    #[error("rejected update: {0}")]
    Rejected(String),

    /// 条件付き更新の前提（ラウンド値・ステータス）が一致しなかった
    #[error("conflicting update: {0}")]
    Conflict(String),

    /// 永続化層が一時的に利用できない
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

impl RepositoryError {
    /// リトライで回復しうるエラーか
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

/// MessagePusher のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("client '{0}' not found")]
    ClientNotFound(String),

    #[error("failed to push message: {0}")]
    PushFailed(String),
}

/// RoomSessionStore のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// セッションが存在しない、または管理者の接続が無い
    #[error("not found: {0}")]
    NotFound(String),

    /// 接続していないユーザーを attach しようとした
    #[error("user '{0}' has no registered connection")]
    NotConnected(String),
}
