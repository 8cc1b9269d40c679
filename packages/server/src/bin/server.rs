//! Kotoba game server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin kotoba-server
//! cargo run --bin kotoba-server -- --host 0.0.0.0 --port 3000 --rotation-policy own-team
//! ```

use std::time::Duration;

use clap::Parser;
use kotoba_server::{
    bootstrap::build_in_memory_state, config::ServerConfig, domain::RotationPolicy, ui::Server,
};
use kotoba_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "kotoba-server")]
#[command(about = "Team word game server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "KOTOBA_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "KOTOBA_PORT", default_value = "8080")]
    port: u16,

    /// Default log level (overridden by RUST_LOG)
    #[arg(long, env = "KOTOBA_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Number of candidate words dealt to each speaker
    #[arg(long, env = "KOTOBA_WORDS_PER_TURN", default_value = "20")]
    words_per_turn: usize,

    /// Rotation length: `largest-team` or `own-team`
    #[arg(long, env = "KOTOBA_ROTATION_POLICY", default_value = "largest-team")]
    rotation_policy: RotationPolicy,

    /// Timeout of a single repository call in milliseconds
    #[arg(long, env = "KOTOBA_PERSISTENCE_TIMEOUT_MS", default_value = "2000")]
    persistence_timeout_ms: u64,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            log_level: args.log_level,
            words_per_turn: args.words_per_turn,
            rotation_policy: args.rotation_policy,
            persistence_timeout: Duration::from_millis(args.persistence_timeout_ms),
        }
    }
}

#[tokio::main]
async fn main() {
    let config = ServerConfig::from(Args::parse());

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &config.log_level);
    tracing::info!(
        "Starting with rotation policy '{}' and {} words per turn",
        config.rotation_policy,
        config.words_per_turn
    );

    let server = Server::new(build_in_memory_state(&config));
    if let Err(e) = server.run(config.host, config.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
