//! Server configuration.

use std::time::Duration;

use crate::{
    domain::RotationPolicy,
    infrastructure::repository::resilient::DEFAULT_TIMEOUT,
    usecase::{GameSettings, settings::DEFAULT_WORDS_PER_TURN},
};

/// Runtime settings resolved from the command line and environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Default level for the tracing filter when `RUST_LOG` is unset.
    pub log_level: String,
    pub words_per_turn: usize,
    pub rotation_policy: RotationPolicy,
    /// Timeout for a single repository call before it is retried.
    pub persistence_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            log_level: "info".to_string(),
            words_per_turn: DEFAULT_WORDS_PER_TURN,
            rotation_policy: RotationPolicy::default(),
            persistence_timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ServerConfig {
    pub fn game_settings(&self) -> GameSettings {
        GameSettings {
            rotation_policy: self.rotation_policy,
            words_per_turn: self.words_per_turn,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_game_defaults() {
        // テスト項目: 既定の設定はゲーム設定の既定値と一致する
        // given (前提条件):
        let config = ServerConfig::default();

        // when (操作):
        let settings = config.game_settings();

        // then (期待する結果):
        assert_eq!(settings, GameSettings::default());
        assert_eq!(config.persistence_timeout, Duration::from_secs(2));
    }

    #[test]
    fn test_game_settings_follow_overrides() {
        // テスト項目: 設定値の上書きがゲーム設定に反映される
        // given (前提条件):
        let config = ServerConfig {
            words_per_turn: 5,
            rotation_policy: RotationPolicy::OwnTeam,
            ..ServerConfig::default()
        };

        // when (操作):
        let settings = config.game_settings();

        // then (期待する結果):
        assert_eq!(settings.words_per_turn, 5);
        assert_eq!(settings.rotation_policy, RotationPolicy::OwnTeam);
    }
}
