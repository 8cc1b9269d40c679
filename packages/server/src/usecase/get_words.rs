//! UseCase: 単語リストの取得

use std::sync::Arc;

use crate::domain::WordProvider;

use super::error::GameError;

/// 1 回で取得できる単語数の上限
pub const MAX_WORDS: usize = 100;

pub struct GetWordsUseCase {
    word_provider: Arc<dyn WordProvider>,
}

impl GetWordsUseCase {
    pub fn new(word_provider: Arc<dyn WordProvider>) -> Self {
        Self { word_provider }
    }

    pub async fn execute(&self, count: usize) -> Result<Vec<String>, GameError> {
        if count == 0 || count > MAX_WORDS {
            return Err(GameError::BadRequest(format!(
                "word count must be between 1 and {}, got {}",
                MAX_WORDS, count
            )));
        }
        Ok(self.word_provider.random_words(count).await)
    }
}
