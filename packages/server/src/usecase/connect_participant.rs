//! UseCase: 参加者接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectParticipantUseCase::execute() メソッド
//! - 接続の登録と、参加中ルーム・管理ルームのセッションへの attach
//!
//! ### なぜこのテストが必要か
//! - 通知は接続レジストリとセッションを経由して届くため、接続時の登録漏れは通知漏れになる
//! - 参加後に接続したユーザー（セッションとのずれ）も通知を受けられることを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加中のユーザーが接続し、既存のセッションに attach される
//! - 正常系：管理者の接続で、管理ルームのセッションが作られる
//! - エッジケース：どのルームにも参加していないユーザーの接続

use std::sync::Arc;

use crate::domain::{
    MessagePusher, ParticipantRepository, PusherChannel, RoomId, RoomRepository,
    RoomSessionStore, SessionError, UserId,
};

use super::error::GameError;

/// 参加者接続のユースケース
pub struct ConnectParticipantUseCase {
    rooms: Arc<dyn RoomRepository>,
    participants: Arc<dyn ParticipantRepository>,
    /// 接続レジストリ
    message_pusher: Arc<dyn MessagePusher>,
    sessions: Arc<dyn RoomSessionStore>,
}

impl ConnectParticipantUseCase {
    pub fn new(
        rooms: Arc<dyn RoomRepository>,
        participants: Arc<dyn ParticipantRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        sessions: Arc<dyn RoomSessionStore>,
    ) -> Self {
        Self {
            rooms,
            participants,
            message_pusher,
            sessions,
        }
    }

    /// 参加者接続を実行
    ///
    /// # Arguments
    ///
    /// * `user_id` - 認証済みのユーザー
    /// * `sender` - クライアントへのメッセージ送信用チャンネル
    ///
    /// # Returns
    ///
    /// * `Ok(Some(RoomId))` - 参加中のルーム（そのセッションに attach 済み）
    /// * `Ok(None)` - どのルームにも参加していない
    /// * `Err(GameError)` - Repository の失敗
    pub async fn execute(
        &self,
        user_id: UserId,
        sender: PusherChannel,
    ) -> Result<Option<RoomId>, GameError> {
        // 同じユーザーの新しい接続は古い接続を置き換える
        self.message_pusher.register_client(user_id, sender).await;

        for room in self.rooms.list_rooms_by_admin(&user_id).await? {
            let result = match self.sessions.members(&room.id).await {
                None => self.sessions.create_session(room.id, user_id).await,
                Some(_) => self.sessions.attach(&room.id, user_id).await,
            };
            if let Err(e) = result {
                tracing::warn!("Session for room '{}' not ready: {}", room.id, e);
            }
        }

        let Some(participant) = self.participants.find_by_user(&user_id).await? else {
            return Ok(None);
        };
        let room_id = participant.room_id;

        let attached = match self.sessions.attach(&room_id, user_id).await {
            Err(SessionError::NotFound(_)) => {
                let room = self.rooms.get_room(&room_id).await?;
                match self.sessions.create_session(room_id, room.admin_id).await {
                    Ok(()) => self.sessions.attach(&room_id, user_id).await,
                    Err(e) => Err(e),
                }
            }
            other => other,
        };
        if let Err(e) = attached {
            tracing::debug!("User '{}' not attached to '{}': {}", user_id, room_id, e);
        }

        tracing::info!("User '{}' connected (room '{}')", user_id, room_id);
        Ok(Some(room_id))
    }
}
