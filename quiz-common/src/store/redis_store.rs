//! Redis-backed store
//!
//! A single `ConnectionManager` multiplexes all requests over one connection
//! and reconnects on its own after failures. Each command runs once, bounded by
//! the configured timeout; nothing is retried here.

use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands, Client};
use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info};

use super::KeyValueStore;
use crate::{Error, Result};

/// Keys fetched per SCAN round trip
const SCAN_BATCH: usize = 100;

#[derive(Clone)]
pub struct RedisStore {
    connection: ConnectionManager,
    timeout: Duration,
}

impl RedisStore {
    /// Open a managed connection to `redis_url`
    ///
    /// # Errors
    /// `StoreUnavailable` if the URL is malformed or the server cannot be
    /// reached within `timeout`.
    pub async fn connect(redis_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::open(redis_url)?;
        let connection = tokio::time::timeout(timeout, client.get_connection_manager())
            .await
            .map_err(|_| {
                Error::StoreUnavailable(format!("Timed out connecting to {}", redis_url))
            })??;

        info!("Connected to Redis at {}", redis_url);
        Ok(Self {
            connection,
            timeout,
        })
    }

    async fn run<T, F>(&self, op: &str, fut: F) -> Result<T>
    where
        F: Future<Output = redis::RedisResult<T>>,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => result.map_err(Error::from),
            Err(_) => Err(Error::StoreUnavailable(format!(
                "{} timed out after {} ms",
                op,
                self.timeout.as_millis()
            ))),
        }
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn hset_multiple(&self, key: &str, fields: &[(&str, String)]) -> Result<()> {
        if fields.is_empty() {
            return Ok(());
        }
        let mut conn = self.connection.clone();
        self.run("HSET", async move { conn.hset_multiple(key, fields).await })
            .await
    }

    async fn hgetall(&self, key: &str) -> Result<HashMap<String, String>> {
        let mut conn = self.connection.clone();
        self.run("HGETALL", async move { conn.hgetall(key).await })
            .await
    }

    async fn zadd(&self, key: &str, member: &str, score: i64) -> Result<()> {
        let mut conn = self.connection.clone();
        self.run("ZADD", async move {
            let _added: i64 = conn.zadd(key, member, score).await?;
            Ok::<(), redis::RedisError>(())
        })
        .await
    }

    async fn zrange(&self, key: &str, start: isize, stop: isize) -> Result<Vec<String>> {
        let mut conn = self.connection.clone();
        self.run("ZRANGE", async move { conn.zrange(key, start, stop).await })
            .await
    }

    async fn scan_keys(&self, pattern: &str) -> Result<Vec<String>> {
        let mut conn = self.connection.clone();
        let keys = self
            .run("SCAN", async move {
                let mut keys = Vec::new();
                let mut cursor: u64 = 0;
                loop {
                    let (next, batch): (u64, Vec<String>) = redis::cmd("SCAN")
                        .arg(cursor)
                        .arg("MATCH")
                        .arg(pattern)
                        .arg("COUNT")
                        .arg(SCAN_BATCH)
                        .query_async(&mut conn)
                        .await?;
                    keys.extend(batch);
                    if next == 0 {
                        break;
                    }
                    cursor = next;
                }
                Ok::<_, redis::RedisError>(keys)
            })
            .await?;

        debug!("SCAN {} matched {} keys", pattern, keys.len());
        Ok(keys)
    }
}
