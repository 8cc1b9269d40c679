//! Shared utilities for the Kotoba game server.

pub mod logger;
pub mod time;
