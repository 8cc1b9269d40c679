//! Logging setup for the Kotoba binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Crates whose logs are enabled by the default filter.
const LOG_TARGETS: [&str; 3] = ["kotoba_server", "kotoba_shared", "tower_http"];

/// Build the default filter directive, e.g. `kotoba_server=debug,kotoba_shared=debug,...`.
pub fn default_filter(binary_name: &str, default_log_level: &str) -> String {
    LOG_TARGETS
        .iter()
        .copied()
        .chain(std::iter::once(binary_name))
        .map(|target| format!("{}={}", target.replace('-', "_"), default_log_level))
        .collect::<Vec<_>>()
        .join(",")
}

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` wins over `default_log_level` when it is set.
///
/// # Examples
///
/// ```no_run
/// use kotoba_shared::logger::setup_logger;
///
/// setup_logger("kotoba-server", "info");
/// ```
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(binary_name, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_covers_all_targets() {
        // テスト項目: デフォルトのフィルタに全ターゲットとバイナリ名が含まれる
        // given (前提条件):
        let binary_name = "kotoba-server";

        // when (操作):
        let filter = default_filter(binary_name, "info");

        // then (期待する結果):
        assert_eq!(
            filter,
            "kotoba_server=info,kotoba_shared=info,tower_http=info,kotoba_server=info"
        );
    }
}
