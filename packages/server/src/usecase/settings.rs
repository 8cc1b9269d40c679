//! ゲーム進行の設定

use crate::domain::RotationPolicy;

/// 1 ターンで話者に配る単語数の既定値
pub const DEFAULT_WORDS_PER_TURN: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSettings {
    pub rotation_policy: RotationPolicy,
    pub words_per_turn: usize,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            rotation_policy: RotationPolicy::default(),
            words_per_turn: DEFAULT_WORDS_PER_TURN,
        }
    }
}
