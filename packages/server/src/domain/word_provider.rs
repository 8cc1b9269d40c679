//! 単語リストのコラボレータ

use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WordProvider: Send + Sync {
    /// ランダムな単語を `count` 個返す（呼び出し間の順序保証はない）
    async fn random_words(&self, count: usize) -> Vec<String>;
}
