//! GameNotifier 実装

pub mod push;

pub use push::PushGameNotifier;
