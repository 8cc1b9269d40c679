//! トークン = ユーザー ID とみなす認証
//!
//! 資格情報の発行は外部の認証基盤が行う前提で、ここではトークンが UUID 形式であることだけを検証する。

use async_trait::async_trait;

use crate::domain::{Authenticator, UserId};

#[derive(Debug, Default, Clone, Copy)]
pub struct BearerTokenAuthenticator;

impl BearerTokenAuthenticator {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Authenticator for BearerTokenAuthenticator {
    async fn authenticate(&self, credential: &str) -> Option<UserId> {
        let token = credential.strip_prefix("Bearer ").unwrap_or(credential);
        match UserId::try_from(token) {
            Ok(user_id) => Some(user_id),
            Err(e) => {
                tracing::debug!("Rejected credential: {}", e);
                None
            }
        }
    }
}
