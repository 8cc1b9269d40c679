//! WebSocket を使った MessagePusher 実装（接続レジストリ）
//!
//! ## 責務
//!
//! - ユーザーごとの WebSocket 送信チャンネル（`UnboundedSender`）を管理
//! - 特定ユーザーへの送信（push_to）と複数ユーザーへの送信（broadcast）
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `UnboundedSender` を受け取り、メッセージ送信に使用します。
//! 送信はチャンネルへの enqueue までで、到達確認や再送はしません。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{MessagePushError, MessagePusher, PusherChannel, UserId};

/// WebSocket を使った MessagePusher 実装
///
/// 単一の Mutex で守られたマップなので、キーごとの操作は線形化される。
#[derive(Default)]
pub struct WebSocketMessagePusher {
    /// Key: user_id, Value: PusherChannel
    clients: Mutex<HashMap<UserId, PusherChannel>>,
}

impl WebSocketMessagePusher {
    pub fn new() -> Self {
        Self::default()
    }

    /// 登録中のクライアント数
    pub async fn count_clients(&self) -> usize {
        self.clients.lock().await.len()
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, user_id: UserId, sender: PusherChannel) {
        let mut clients = self.clients.lock().await;
        if clients.insert(user_id, sender).is_some() {
            tracing::debug!("Client '{}' re-registered, previous channel replaced", user_id);
        } else {
            tracing::debug!("Client '{}' registered to MessagePusher", user_id);
        }
    }

    async fn unregister_client(&self, user_id: &UserId) {
        let mut clients = self.clients.lock().await;
        if clients.remove(user_id).is_some() {
            tracing::debug!("Client '{}' unregistered from MessagePusher", user_id);
        }
    }

    async fn unregister_channel(&self, user_id: &UserId, sender: &PusherChannel) -> bool {
        let mut clients = self.clients.lock().await;
        match clients.get(user_id) {
            Some(current) if current.same_channel(sender) => {
                clients.remove(user_id);
                tracing::debug!("Client '{}' unregistered from MessagePusher", user_id);
                true
            }
            _ => false,
        }
    }

    async fn lookup(&self, user_id: &UserId) -> Option<PusherChannel> {
        let clients = self.clients.lock().await;
        clients.get(user_id).cloned()
    }

    async fn push_to(&self, user_id: &UserId, content: &str) -> Result<(), MessagePushError> {
        let clients = self.clients.lock().await;

        let sender = clients
            .get(user_id)
            .ok_or_else(|| MessagePushError::ClientNotFound(user_id.to_string()))?;
        sender
            .send(content.to_string())
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
        tracing::debug!("Pushed message to client '{}'", user_id);
        Ok(())
    }

    async fn broadcast(
        &self,
        targets: Vec<UserId>,
        content: &str,
    ) -> Result<(), MessagePushError> {
        let clients = self.clients.lock().await;

        for target in targets {
            match clients.get(&target) {
                // ブロードキャストでは一部の送信失敗を許容
                Some(sender) => {
                    if let Err(e) = sender.send(content.to_string()) {
                        tracing::warn!("Failed to push message to client '{}': {}", target, e);
                    }
                }
                None => {
                    tracing::debug!("Client '{}' not connected, skipping", target);
                }
            }
        }

        Ok(())
    }
}
