//! RoomSessionStore trait
//!
//! アクティブなルームごとに、参加者の接続（チャンネル）の部分集合を保持するインメモリの索引。
//! メンバーシップの正は永続化された Participant であり、こちらは通知用のキャッシュにすぎない。

use async_trait::async_trait;

use super::{RoomId, SessionError, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomSessionStore: Send + Sync {
    /// 管理者の接続だけを持つセッションを作成（既存のセッションは置き換える）
    ///
    /// 管理者の接続が登録されていなければ `SessionError::NotFound`。
    async fn create_session(&self, room_id: RoomId, admin_id: UserId) -> Result<(), SessionError>;

    /// ユーザーの接続をセッションに追加
    async fn attach(&self, room_id: &RoomId, user_id: UserId) -> Result<(), SessionError>;

    /// ユーザーの接続をセッションから外す（メンバーでなければ何もしない）
    async fn detach(&self, room_id: &RoomId, user_id: &UserId) -> Result<(), SessionError>;

    /// 全セッションからユーザーを外す
    async fn detach_everywhere(&self, user_id: &UserId);

    /// セッションを破棄（存在しなくてもエラーにしない）
    async fn remove_session(&self, room_id: &RoomId);

    /// セッションに属するユーザー一覧
    async fn members(&self, room_id: &RoomId) -> Option<Vec<UserId>>;

    /// セッションの全接続へ送信し、送信できた数を返す
    async fn broadcast(&self, room_id: &RoomId, content: &str) -> usize;
}
