//! WebSocket message DTOs.

use serde::{Deserialize, Serialize};

/// Server → client message, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum GameMessage {
    /// Sent once right after the socket is accepted.
    Connected {
        user_id: String,
        room_id: Option<String>,
    },
    /// Candidate words for the active speaker, in order.
    TurnAssigned { words: Vec<String> },
    Wait,
    WaitForResults,
    Win { total_points: i64 },
    Lose { total_points: i64 },
    GameStart { number_of_rounds: u32 },
    GameReset,
    RoomClosed,
}
