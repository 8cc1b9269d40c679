//! 認証コラボレータ
//!
//! リクエストの不透明な資格情報を安定したユーザー ID に解決する。
//! 資格情報の発行はこのサーバーの責務ではない。

use async_trait::async_trait;

use super::UserId;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// 資格情報を検証し、ユーザー ID を返す
    async fn authenticate(&self, credential: &str) -> Option<UserId>;
}
