//! Infrastructure 層
//!
//! ドメイン層が定義したインターフェースの具体的な実装と、外部とやり取りする DTO を提供します。

pub mod auth;
pub mod dto;
pub mod message_pusher;
pub mod notifier;
pub mod repository;
pub mod session;
pub mod word_provider;
