//! Service configuration
//!
//! Settings are resolved from layers, highest priority first:
//! 1. Command-line arguments (each also readable from a `QUIZ_*` environment variable)
//! 2. TOML config file
//! 3. Compiled defaults
//!
//! A missing TOML file is not an error; startup continues on defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::leaderboard::{DEFAULT_LIST_LIMIT, DEFAULT_QUERY_WINDOW};
use crate::result::DEFAULT_USER_ID;
use crate::{Error, Result};

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 5730;

/// Default Redis connection URL
pub const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379";

/// Default per-call store timeout
pub const DEFAULT_STORE_TIMEOUT_MS: u64 = 2000;

/// Fully resolved configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub bind_address: String,
    pub port: u16,
    pub redis_url: String,
    /// Optional prefix for every store key (empty = none)
    pub key_namespace: String,
    /// User id recorded for submissions without one
    pub default_user_id: i64,
    /// Rows returned by the leaderboard when no `limit` is given
    pub leaderboard_limit: usize,
    /// Index entries considered by filtered queries
    pub query_window: usize,
    pub store_timeout_ms: u64,
    pub log_level: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
            redis_url: DEFAULT_REDIS_URL.to_string(),
            key_namespace: String::new(),
            default_user_id: DEFAULT_USER_ID,
            leaderboard_limit: DEFAULT_LIST_LIMIT,
            query_window: DEFAULT_QUERY_WINDOW,
            store_timeout_ms: DEFAULT_STORE_TIMEOUT_MS,
            log_level: "info".to_string(),
        }
    }
}

/// One configuration source; unset fields defer to lower layers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigLayer {
    pub bind_address: Option<String>,
    pub port: Option<u16>,
    pub redis_url: Option<String>,
    pub key_namespace: Option<String>,
    pub default_user_id: Option<i64>,
    pub leaderboard_limit: Option<usize>,
    pub query_window: Option<usize>,
    pub store_timeout_ms: Option<u64>,
    pub log_level: Option<String>,
}

impl ServiceConfig {
    /// Merge layers (highest priority first) over the compiled defaults
    pub fn from_layers(layers: &[&ConfigLayer]) -> Self {
        let mut config = ServiceConfig::default();

        // Apply lowest priority first so higher layers overwrite
        for layer in layers.iter().rev() {
            if let Some(v) = &layer.bind_address {
                config.bind_address = v.clone();
            }
            if let Some(v) = layer.port {
                config.port = v;
            }
            if let Some(v) = &layer.redis_url {
                config.redis_url = v.clone();
            }
            if let Some(v) = &layer.key_namespace {
                config.key_namespace = v.clone();
            }
            if let Some(v) = layer.default_user_id {
                config.default_user_id = v;
            }
            if let Some(v) = layer.leaderboard_limit {
                config.leaderboard_limit = v;
            }
            if let Some(v) = layer.query_window {
                config.query_window = v;
            }
            if let Some(v) = layer.store_timeout_ms {
                config.store_timeout_ms = v;
            }
            if let Some(v) = &layer.log_level {
                config.log_level = v.clone();
            }
        }

        config
    }

    /// Reject values the service cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.bind_address.trim().is_empty() {
            return Err(Error::Config("bind_address must not be empty".into()));
        }
        if self.redis_url.trim().is_empty() {
            return Err(Error::Config("redis_url must not be empty".into()));
        }
        if self.default_user_id <= 0 {
            return Err(Error::Config(format!(
                "default_user_id must be positive, got {}",
                self.default_user_id
            )));
        }
        if self.leaderboard_limit == 0 {
            return Err(Error::Config("leaderboard_limit must be at least 1".into()));
        }
        if self.query_window == 0 {
            return Err(Error::Config("query_window must be at least 1".into()));
        }
        if self.store_timeout_ms == 0 {
            return Err(Error::Config("store_timeout_ms must be at least 1".into()));
        }
        Ok(())
    }

    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }

    /// `host:port` string for the listener
    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

/// Platform config file location (`~/.config/web3-quiz/config.toml` on Linux)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("web3-quiz").join("config.toml"))
}

/// Read a TOML config layer
///
/// Returns `Ok(None)` when the file does not exist. Callers log the outcome,
/// since this usually runs before the tracing subscriber is installed.
///
/// # Errors
/// `Config` if the file exists but cannot be read or parsed.
pub fn load_toml_config(path: &Path) -> Result<Option<ConfigLayer>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
    let layer: ConfigLayer = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))?;

    Ok(Some(layer))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::default();
        assert_eq!(config.port, 5730);
        assert_eq!(config.default_user_id, 203090);
        assert_eq!(config.leaderboard_limit, 50);
        assert_eq!(config.query_window, 100);
        assert_eq!(config.key_namespace, "");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_higher_layer_wins() {
        let cli = ConfigLayer {
            port: Some(9000),
            ..Default::default()
        };
        let file = ConfigLayer {
            port: Some(8000),
            redis_url: Some("redis://cache:6379".into()),
            ..Default::default()
        };

        let config = ServiceConfig::from_layers(&[&cli, &file]);
        assert_eq!(config.port, 9000);
        assert_eq!(config.redis_url, "redis://cache:6379");
        assert_eq!(config.leaderboard_limit, DEFAULT_LIST_LIMIT);
    }

    #[test]
    fn test_no_layers_is_default() {
        assert_eq!(ServiceConfig::from_layers(&[]), ServiceConfig::default());
    }

    #[test]
    fn test_validate_rejects_zero_limits() {
        let mut config = ServiceConfig::default();
        config.leaderboard_limit = 0;
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        let mut config = ServiceConfig::default();
        config.store_timeout_ms = 0;
        assert!(config.validate().is_err());

        let mut config = ServiceConfig::default();
        config.default_user_id = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_listen_address() {
        let config = ServiceConfig::default();
        assert_eq!(config.listen_address(), "127.0.0.1:5730");
        assert_eq!(config.store_timeout(), Duration::from_secs(2));
    }
}
