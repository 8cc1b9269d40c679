//! Kotoba game server library.
//!
//! Orchestrates a team word game: players join rooms, form teams, and take
//! turns describing words while the server rotates speakers, keeps score and
//! pushes turn notifications over WebSocket.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod bootstrap;
pub mod config;
