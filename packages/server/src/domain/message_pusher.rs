//! MessagePusher trait（接続レジストリ）
//!
//! ユーザー ID とアクティブな送信チャンネルの対応を管理し、特定ユーザーへの送信を行う。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{MessagePushError, UserId};

/// クライアントへの送信チャンネル
pub type PusherChannel = mpsc::UnboundedSender<String>;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// チャンネルを登録（既存の登録は置き換える）
    async fn register_client(&self, user_id: UserId, sender: PusherChannel);

    /// 登録を解除（未登録でもエラーにしない）
    async fn unregister_client(&self, user_id: &UserId);

    /// 登録されているチャンネルが `sender` と同一の場合のみ解除
    ///
    /// 再接続で置き換えられた新しいチャンネルを古い接続の切断で消さないために使う。
    async fn unregister_channel(&self, user_id: &UserId, sender: &PusherChannel) -> bool;

    /// 登録済みチャンネルを取得
    async fn lookup(&self, user_id: &UserId) -> Option<PusherChannel>;

    /// 特定ユーザーへ送信
    async fn push_to(&self, user_id: &UserId, content: &str) -> Result<(), MessagePushError>;

    /// 複数ユーザーへ送信（一部の失敗は許容する）
    async fn broadcast(&self, targets: Vec<UserId>, content: &str)
    -> Result<(), MessagePushError>;
}
