//! UseCase: 参加者切断処理

use std::sync::Arc;

use crate::domain::{MessagePusher, PusherChannel, RoomSessionStore, UserId};

/// 参加者切断のユースケース
pub struct DisconnectParticipantUseCase {
    message_pusher: Arc<dyn MessagePusher>,
    sessions: Arc<dyn RoomSessionStore>,
}

impl DisconnectParticipantUseCase {
    pub fn new(
        message_pusher: Arc<dyn MessagePusher>,
        sessions: Arc<dyn RoomSessionStore>,
    ) -> Self {
        Self {
            message_pusher,
            sessions,
        }
    }

    /// 参加者切断を実行
    ///
    /// 参加記録（Participant）は残り、接続とセッションからの登録だけが外れる。
    ///
    /// # Arguments
    ///
    /// * `user_id` - 切断したユーザー
    /// * `sender` - 切断した接続のチャンネル
    ///
    /// # Returns
    ///
    /// 登録を外した場合は `true`。同じユーザーの新しい接続に置き換わっていた場合は
    /// 何もせず `false`。
    pub async fn execute(&self, user_id: UserId, sender: &PusherChannel) -> bool {
        if !self
            .message_pusher
            .unregister_channel(&user_id, sender)
            .await
        {
            tracing::debug!("Connection of '{}' was already replaced", user_id);
            return false;
        }
        self.sessions.detach_everywhere(&user_id).await;
        tracing::info!("User '{}' disconnected", user_id);
        true
    }
}
