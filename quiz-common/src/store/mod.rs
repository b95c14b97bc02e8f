//! Key-value store adapter
//!
//! The repository and leaderboard only need a handful of primitives: hash
//! set/get, sorted-set add/range, and a key-pattern scan. `KeyValueStore`
//! captures exactly those so the Redis client can be swapped for the
//! in-memory store in tests.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::Result;

mod keys;
mod memory;
#[cfg(feature = "redis")]
mod redis_store;

pub use keys::KeySpace;
pub use memory::MemoryStore;
#[cfg(feature = "redis")]
pub use redis_store::RedisStore;

/// Store primitives used by the quiz service
///
/// Every call is attempted once. Implementations report connectivity
/// problems as `Error::StoreUnavailable`.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Set every `(field, value)` pair on the hash at `key`, creating it if needed
    async fn hset_multiple(&self, key: &str, fields: &[(&str, String)]) -> Result<()>;

    /// All fields of the hash at `key` (empty if the key does not exist)
    async fn hgetall(&self, key: &str) -> Result<HashMap<String, String>>;

    /// Add `member` to the sorted set at `key` with `score`
    ///
    /// Re-adding an existing member only updates its score.
    async fn zadd(&self, key: &str, member: &str, score: i64) -> Result<()>;

    /// Members ranked `start..=stop` by ascending score (Redis `ZRANGE` semantics)
    async fn zrange(&self, key: &str, start: isize, stop: isize) -> Result<Vec<String>>;

    /// All keys matching a glob `pattern` (only `*` wildcards are used)
    async fn scan_keys(&self, pattern: &str) -> Result<Vec<String>>;
}
