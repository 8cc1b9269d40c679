//! 接続レジストリ経由の通知配送
//!
//! `GameEvent` を JSON にシリアライズし、送信先ごとに `MessagePusher::push_to` を呼ぶ。
//! 接続の無い送信先への失敗はログに残して捨てる。

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    domain::{Dispatch, GameEvent, GameNotifier, MessagePusher, RoomId, RoomSessionStore, UserId},
    infrastructure::dto::websocket::GameMessage,
};

pub struct PushGameNotifier {
    message_pusher: Arc<dyn MessagePusher>,
    sessions: Arc<dyn RoomSessionStore>,
}

impl PushGameNotifier {
    pub fn new(message_pusher: Arc<dyn MessagePusher>, sessions: Arc<dyn RoomSessionStore>) -> Self {
        Self {
            message_pusher,
            sessions,
        }
    }

    fn serialize(event: &GameEvent) -> Option<String> {
        match serde_json::to_string(&GameMessage::from(event)) {
            Ok(json) => Some(json),
            Err(e) => {
                tracing::error!("Failed to serialize {:?}: {}", event, e);
                None
            }
        }
    }
}

#[async_trait]
impl GameNotifier for PushGameNotifier {
    async fn notify(&self, event: &GameEvent, recipients: &[UserId]) -> usize {
        let Some(json) = Self::serialize(event) else {
            return 0;
        };

        let mut delivered = 0;
        for user_id in recipients {
            match self.message_pusher.push_to(user_id, &json).await {
                Ok(()) => delivered += 1,
                Err(e) => tracing::debug!("Dropped notification for '{}': {}", user_id, e),
            }
        }
        delivered
    }

    async fn notify_batch(&self, batch: Vec<Dispatch>) -> usize {
        let mut delivered = 0;
        for (event, recipients) in &batch {
            delivered += self.notify(event, recipients).await;
        }
        delivered
    }

    async fn notify_session(&self, room_id: &RoomId, event: &GameEvent) -> usize {
        match Self::serialize(event) {
            Some(json) => self.sessions.broadcast(room_id, &json).await,
            None => 0,
        }
    }
}
