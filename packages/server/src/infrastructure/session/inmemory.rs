//! インメモリのルームセッションストア
//!
//! ルームごとに、接続レジストリから取り出した送信チャンネルを保持します。
//! 永続化された Participant とずれていても構わない（未 attach のメンバーには届かないだけ）。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{MessagePusher, PusherChannel, RoomId, RoomSessionStore, SessionError, UserId};

type Session = HashMap<UserId, PusherChannel>;

pub struct InMemoryRoomSessionStore {
    sessions: Mutex<HashMap<RoomId, Session>>,
    /// 接続レジストリ（チャンネルの取得元）
    message_pusher: Arc<dyn MessagePusher>,
}

impl InMemoryRoomSessionStore {
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            message_pusher,
        }
    }
}

#[async_trait]
impl RoomSessionStore for InMemoryRoomSessionStore {
    async fn create_session(&self, room_id: RoomId, admin_id: UserId) -> Result<(), SessionError> {
        let channel = self.message_pusher.lookup(&admin_id).await.ok_or_else(|| {
            SessionError::NotFound(format!("admin '{}' has no registered connection", admin_id))
        })?;

        let mut sessions = self.sessions.lock().await;
        sessions.insert(room_id, HashMap::from([(admin_id, channel)]));
        tracing::debug!("Session for room '{}' created by '{}'", room_id, admin_id);
        Ok(())
    }

    async fn attach(&self, room_id: &RoomId, user_id: UserId) -> Result<(), SessionError> {
        let channel = self.message_pusher.lookup(&user_id).await;

        let mut sessions = self.sessions.lock().await;
        let session = sessions
            .get_mut(room_id)
            .ok_or_else(|| SessionError::NotFound(format!("session '{}'", room_id)))?;
        let channel = channel.ok_or_else(|| SessionError::NotConnected(user_id.to_string()))?;
        session.insert(user_id, channel);
        tracing::debug!("User '{}' attached to session '{}'", user_id, room_id);
        Ok(())
    }

    async fn detach(&self, room_id: &RoomId, user_id: &UserId) -> Result<(), SessionError> {
        let mut sessions = self.sessions.lock().await;
        let session = sessions
            .get_mut(room_id)
            .ok_or_else(|| SessionError::NotFound(format!("session '{}'", room_id)))?;
        if session.remove(user_id).is_some() {
            tracing::debug!("User '{}' detached from session '{}'", user_id, room_id);
        }
        Ok(())
    }

    async fn detach_everywhere(&self, user_id: &UserId) {
        let mut sessions = self.sessions.lock().await;
        for session in sessions.values_mut() {
            session.remove(user_id);
        }
    }

    async fn remove_session(&self, room_id: &RoomId) {
        let mut sessions = self.sessions.lock().await;
        if sessions.remove(room_id).is_some() {
            tracing::debug!("Session for room '{}' removed", room_id);
        }
    }

    async fn members(&self, room_id: &RoomId) -> Option<Vec<UserId>> {
        let sessions = self.sessions.lock().await;
        sessions.get(room_id).map(|s| s.keys().copied().collect())
    }

    async fn broadcast(&self, room_id: &RoomId, content: &str) -> usize {
        let sessions = self.sessions.lock().await;
        let Some(session) = sessions.get(room_id) else {
            return 0;
        };
        session
            .iter()
            .filter(|(user_id, sender)| match sender.send(content.to_string()) {
                Ok(()) => true,
                Err(e) => {
                    tracing::warn!("Failed to push message to '{}': {}", user_id, e);
                    false
                }
            })
            .count()
    }
}
