//! Authenticator 実装

pub mod bearer;

pub use bearer::BearerTokenAuthenticator;
