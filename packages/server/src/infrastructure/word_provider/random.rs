//! 組み込みの単語リストからランダムに選ぶ WordProvider

use async_trait::async_trait;
use rand::seq::IndexedRandom;

use crate::domain::WordProvider;

const BUILTIN_WORDS: &[&str] = &[
    "apple", "anchor", "balloon", "bicycle", "blanket", "bridge", "butterfly", "camera", "candle",
    "castle", "cactus", "chimney", "cloud", "compass", "cookie", "crown", "desert", "diamond",
    "dinosaur", "dragon", "drum", "eagle", "elevator", "engine", "feather", "fireworks", "forest",
    "fountain", "garden", "ghost", "giraffe", "glacier", "guitar", "hammer", "harbor", "helmet",
    "honey", "island", "jacket", "jungle", "kangaroo", "kettle", "ladder", "lantern", "library",
    "lighthouse", "magnet", "map", "marathon", "mirror", "mountain", "museum", "needle", "ocean",
    "orchestra", "owl", "paintbrush", "parachute", "penguin", "piano", "pillow", "pirate",
    "planet", "pyramid", "rainbow", "robot", "rocket", "saddle", "sandwich", "satellite",
    "scissors", "shadow", "snowman", "spider", "stadium", "submarine", "suitcase", "telescope",
    "tent", "thunder", "tornado", "tractor", "treasure", "tunnel", "umbrella", "unicorn",
    "vacuum", "violin", "volcano", "waterfall", "whistle", "window", "wizard", "yacht", "zebra",
];

/// 単語リストから重複なしでランダムに選ぶ
pub struct RandomWordProvider {
    words: Vec<String>,
}

impl RandomWordProvider {
    pub fn new(words: Vec<String>) -> Self {
        Self { words }
    }

    /// 組み込みの単語リストを使う
    pub fn builtin() -> Self {
        Self::new(BUILTIN_WORDS.iter().map(|w| w.to_string()).collect())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for RandomWordProvider {
    fn default() -> Self {
        Self::builtin()
    }
}

#[async_trait]
impl WordProvider for RandomWordProvider {
    /// `count` が単語数を超える場合は全単語をシャッフルして返す
    async fn random_words(&self, count: usize) -> Vec<String> {
        self.words
            .choose_multiple(&mut rand::rng(), count)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[tokio::test]
    async fn test_random_words_are_distinct() {
        // テスト項目: 指定数の重複しない単語が返る
        // given (前提条件):
        let provider = RandomWordProvider::builtin();

        // when (操作):
        let words = provider.random_words(20).await;

        // then (期待する結果):
        assert_eq!(words.len(), 20);
        assert_eq!(words.iter().collect::<HashSet<_>>().len(), 20);
    }

    #[tokio::test]
    async fn test_random_words_capped_by_list_size() {
        // テスト項目: 単語数より多く要求しても単語数までしか返らない
        // given (前提条件):
        let provider = RandomWordProvider::new(vec!["a".to_string(), "b".to_string()]);

        // when (操作):
        let words = provider.random_words(5).await;

        // then (期待する結果):
        assert_eq!(words.len(), 2);
    }

    #[test]
    fn test_builtin_list_has_no_duplicates() {
        // テスト項目: 組み込みの単語リストに重複が無い
        // then (期待する結果):
        let unique: HashSet<_> = BUILTIN_WORDS.iter().collect();
        assert_eq!(unique.len(), BUILTIN_WORDS.len());
        assert_eq!(RandomWordProvider::builtin().len(), BUILTIN_WORDS.len());
    }
}
