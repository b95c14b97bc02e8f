//! Command-line arguments
//!
//! Every setting flag can also come from a `QUIZ_*` environment variable.
//! Unset flags defer to the TOML file, then to compiled defaults.

use clap::Parser;
use std::path::PathBuf;

use quiz_common::config::ConfigLayer;

#[derive(Debug, Parser)]
#[command(name = "quiz-api", version, about = "Web3 personality quiz and leaderboard service")]
pub struct Cli {
    /// TOML config file (default: platform config dir)
    #[arg(long, env = "QUIZ_CONFIG")]
    pub config: Option<PathBuf>,

    #[arg(long, env = "QUIZ_BIND_ADDRESS")]
    pub bind_address: Option<String>,

    #[arg(long, env = "QUIZ_PORT")]
    pub port: Option<u16>,

    #[arg(long, env = "QUIZ_REDIS_URL")]
    pub redis_url: Option<String>,

    /// Prefix for every store key
    #[arg(long, env = "QUIZ_KEY_NAMESPACE")]
    pub key_namespace: Option<String>,

    /// User id recorded for submissions without one
    #[arg(long, env = "QUIZ_DEFAULT_USER_ID")]
    pub default_user_id: Option<i64>,

    #[arg(long, env = "QUIZ_LEADERBOARD_LIMIT")]
    pub leaderboard_limit: Option<usize>,

    #[arg(long, env = "QUIZ_QUERY_WINDOW")]
    pub query_window: Option<usize>,

    #[arg(long, env = "QUIZ_STORE_TIMEOUT_MS")]
    pub store_timeout_ms: Option<u64>,

    /// Default log filter when RUST_LOG is unset
    #[arg(long, env = "QUIZ_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Keep results in process memory instead of Redis (lost on exit)
    #[arg(long, env = "QUIZ_MEMORY_STORE")]
    pub memory_store: bool,
}

impl Cli {
    /// Settings given on the command line or environment
    pub fn layer(&self) -> ConfigLayer {
        ConfigLayer {
            bind_address: self.bind_address.clone(),
            port: self.port,
            redis_url: self.redis_url.clone(),
            key_namespace: self.key_namespace.clone(),
            default_user_id: self.default_user_id,
            leaderboard_limit: self.leaderboard_limit,
            query_window: self.query_window,
            store_timeout_ms: self.store_timeout_ms,
            log_level: self.log_level.clone(),
        }
    }
}
