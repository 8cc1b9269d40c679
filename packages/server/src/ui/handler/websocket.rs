//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;

use crate::{
    domain::{PusherChannel, RoomId, UserId},
    infrastructure::dto::websocket::GameMessage,
    ui::state::AppState,
};

/// Query parameters for WebSocket connection
#[derive(Debug, Deserialize)]
pub struct ConnectQuery {
    pub token: String,
}

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConnectQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    let Some(user_id) = state.authenticator.authenticate(&query.token).await else {
        tracing::warn!("Rejected WebSocket connection with invalid token");
        return Err(StatusCode::UNAUTHORIZED);
    };

    // Create a channel for this client to receive messages
    let (tx, rx) = mpsc::unbounded_channel();

    // register_client is called inside the UseCase
    match state
        .connect_participant_usecase
        .execute(user_id, tx.clone())
        .await
    {
        Ok(room_id) => {
            tracing::info!("User '{}' connected and registered", user_id);
            Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, user_id, room_id, tx, rx)))
        }
        Err(e) => {
            tracing::warn!("Failed to connect user '{}': {}", user_id, e);
            state
                .disconnect_participant_usecase
                .execute(user_id, &tx)
                .await;
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}

/// Spawns a task that receives messages from the rx channel and pushes them to the WebSocket sender.
///
/// # Arguments
///
/// * `rx` - Channel receiver for notifications addressed to this user
/// * `sender` - WebSocket sink to send messages to this client
///
/// # Returns
///
/// A `JoinHandle` for the spawned task
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(
    socket: WebSocket,
    state: Arc<AppState>,
    user_id: UserId,
    room_id: Option<RoomId>,
    tx: PusherChannel,
    rx: mpsc::UnboundedReceiver<String>,
) {
    let (mut sender, mut receiver) = socket.split();

    // 通知の前に接続完了を伝える
    let connected = GameMessage::Connected {
        user_id: user_id.to_string(),
        room_id: room_id.map(|id| id.to_string()),
    };
    let sent = match serde_json::to_string(&connected) {
        Ok(json) => sender.send(Message::Text(json.into())).await.is_ok(),
        Err(e) => {
            tracing::error!("Failed to serialize connected message: {}", e);
            false
        }
    };

    if sent {
        // Game actions go through HTTP; inbound frames only keep the socket alive.
        let mut recv_task = tokio::spawn(async move {
            while let Some(msg) = receiver.next().await {
                match msg {
                    Ok(Message::Close(_)) => {
                        tracing::info!("User '{}' requested close", user_id);
                        break;
                    }
                    Ok(Message::Text(text)) => {
                        tracing::debug!("Ignoring inbound text from '{}': {}", user_id, text);
                    }
                    Ok(_) => {}
                    Err(e) => {
                        tracing::error!("WebSocket error: {}", e);
                        break;
                    }
                }
            }
        });

        let mut send_task = pusher_loop(rx, sender);

        // If any one of the tasks completes, abort the other
        tokio::select! {
            _ = &mut recv_task => send_task.abort(),
            _ = &mut send_task => recv_task.abort(),
        };
    }

    state
        .disconnect_participant_usecase
        .execute(user_id, &tx)
        .await;
}
