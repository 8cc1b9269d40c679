//! HTTP / WebSocket server implementation.

mod auth;
mod error;
mod handler;
mod server;
mod signal;
pub mod state;

pub use server::Server;
pub use state::AppState;
