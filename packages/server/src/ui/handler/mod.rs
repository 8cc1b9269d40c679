//! HTTP / WebSocket handlers.

mod game;
mod http;
mod room;
mod team;
mod websocket;

pub use game::{advance_round, reset_game, start_game};
pub use http::{get_words, health_check};
pub use room::{
    change_visibility, create_room, delete_room, get_room_detail, join_room, kick_participant,
    leave_room, list_my_rooms, list_rooms, pass_admin,
};
pub use team::{create_team, delete_team, join_team};
pub use websocket::websocket_handler;
