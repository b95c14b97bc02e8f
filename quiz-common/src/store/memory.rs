//! In-process store used for tests and `--memory-store` development runs

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use super::KeyValueStore;
use crate::{Error, Result};

#[derive(Default)]
struct Inner {
    hashes: HashMap<String, HashMap<String, String>>,
    sorted_sets: HashMap<String, HashMap<String, i64>>,
}

/// Volatile store with Redis-compatible ordering semantics
///
/// Cloning shares the underlying data.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
    unavailable: Arc<AtomicBool>,
    zadd_failing: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with `StoreUnavailable` (outage simulation)
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Make only `zadd` fail, leaving hash writes working
    pub fn set_zadd_failing(&self, failing: bool) {
        self.zadd_failing.store(failing, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(Error::StoreUnavailable("memory store marked unavailable".into()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn hset_multiple(&self, key: &str, fields: &[(&str, String)]) -> Result<()> {
        self.check_available()?;
        let mut inner = self.inner.write().await;
        let hash = inner.hashes.entry(key.to_string()).or_default();
        for (field, value) in fields {
            hash.insert((*field).to_string(), value.clone());
        }
        Ok(())
    }

    async fn hgetall(&self, key: &str) -> Result<HashMap<String, String>> {
        self.check_available()?;
        let inner = self.inner.read().await;
        Ok(inner.hashes.get(key).cloned().unwrap_or_default())
    }

    async fn zadd(&self, key: &str, member: &str, score: i64) -> Result<()> {
        self.check_available()?;
        if self.zadd_failing.load(Ordering::SeqCst) {
            return Err(Error::StoreUnavailable("zadd failed".into()));
        }
        let mut inner = self.inner.write().await;
        inner
            .sorted_sets
            .entry(key.to_string())
            .or_default()
            .insert(member.to_string(), score);
        Ok(())
    }

    async fn zrange(&self, key: &str, start: isize, stop: isize) -> Result<Vec<String>> {
        self.check_available()?;
        let inner = self.inner.read().await;
        let Some(set) = inner.sorted_sets.get(key) else {
            return Ok(Vec::new());
        };

        // Redis orders by score, then lexicographically by member
        let mut members: Vec<(&String, i64)> = set.iter().map(|(m, s)| (m, *s)).collect();
        members.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)));

        let Some((from, to)) = normalize_range(members.len(), start, stop) else {
            return Ok(Vec::new());
        };
        Ok(members[from..=to].iter().map(|(m, _)| (*m).clone()).collect())
    }

    async fn scan_keys(&self, pattern: &str) -> Result<Vec<String>> {
        self.check_available()?;
        let inner = self.inner.read().await;
        let mut keys: Vec<String> = inner
            .hashes
            .keys()
            .chain(inner.sorted_sets.keys())
            .filter(|k| glob_match(pattern, k))
            .cloned()
            .collect();
        keys.sort();
        Ok(keys)
    }
}

/// Resolve Redis-style inclusive, possibly negative, indices against `len`
fn normalize_range(len: usize, start: isize, stop: isize) -> Option<(usize, usize)> {
    let len = len as isize;
    let start = if start < 0 { (len + start).max(0) } else { start };
    let stop = if stop < 0 { len + stop } else { stop.min(len - 1) };
    if len == 0 || start > stop || start >= len {
        return None;
    }
    Some((start as usize, stop as usize))
}

/// Match `text` against a pattern whose only wildcard is `*`
fn glob_match(pattern: &str, text: &str) -> bool {
    let parts: Vec<&str> = pattern.split('*').collect();
    if parts.len() == 1 {
        return pattern == text;
    }

    let first = parts[0];
    let last = parts[parts.len() - 1];
    if !text.starts_with(first) || text.len() < first.len() + last.len() {
        return false;
    }

    let mut rest = &text[first.len()..text.len() - last.len()];
    for part in &parts[1..parts.len() - 1] {
        match rest.find(part) {
            Some(idx) => rest = &rest[idx + part.len()..],
            None => return false,
        }
    }
    text.ends_with(last)
}
