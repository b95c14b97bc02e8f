//! Leaderboard reads
//!
//! Listing reads the time-ordered index newest-first. Queries read a fixed
//! window of the index, apply one filter mode, then move the requesting user's
//! own entry to the front. The last step is separate from filtering: the
//! requester's entry is shown even when the filter itself drops it.

use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::personality::PersonalityType;
use crate::result::QuizResult;
use crate::store::{KeySpace, KeyValueStore};
use crate::Result;

/// Default number of entries returned by `list`
pub const DEFAULT_LIST_LIMIT: usize = 50;

/// Default number of index entries scanned by `query`
pub const DEFAULT_QUERY_WINDOW: usize = 100;

/// One row of leaderboard output
///
/// `Record` rows come from the index. `Raw` rows come from the per-user hash
/// fallback and carry the stored string fields as-is.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LeaderboardEntry {
    Record(QuizResult),
    Raw(BTreeMap<String, String>),
}

/// Query filter, resolved from request parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeaderboardFilter {
    /// Entries whose type is compatible with the given type
    Compatible(PersonalityType),
    /// Entries whose type string equals the given value exactly
    Type(String),
    /// No filtering
    All,
}

impl LeaderboardFilter {
    /// Resolve query parameters; `compatible` wins over `type`
    ///
    /// An unrecognized `compatible` value is ignored, letting `type` apply.
    pub fn from_params(type_param: Option<&str>, compatible: Option<&str>) -> Self {
        if let Some(tag) = compatible.and_then(|c| c.parse::<PersonalityType>().ok()) {
            return LeaderboardFilter::Compatible(tag);
        }
        match type_param {
            Some(t) if !t.is_empty() => LeaderboardFilter::Type(t.to_string()),
            _ => LeaderboardFilter::All,
        }
    }

    fn matches(&self, entry: &QuizResult) -> bool {
        match self {
            LeaderboardFilter::Compatible(tag) => tag.is_compatible_with(entry.personality_type),
            LeaderboardFilter::Type(t) => entry.personality_type.as_str() == t.as_str(),
            LeaderboardFilter::All => true,
        }
    }

    fn excludes_requester(&self) -> bool {
        !matches!(self, LeaderboardFilter::All)
    }
}

/// Whether `entry` belongs to the requesting user (compared as strings)
fn is_user(entry: &QuizResult, user: &str) -> bool {
    entry.user_id.to_string() == user
}

/// Apply a filter mode to the unfiltered entries
///
/// Under `Compatible` and `Type`, the requesting user's entries are dropped.
pub fn apply_filter(
    entries: &[QuizResult],
    filter: &LeaderboardFilter,
    requesting_user: Option<&str>,
) -> Vec<QuizResult> {
    entries
        .iter()
        .filter(|e| filter.matches(e))
        .filter(|e| match requesting_user {
            Some(user) if filter.excludes_requester() => !is_user(e, user),
            _ => true,
        })
        .cloned()
        .collect()
}

/// Put the requesting user's first unfiltered entry at index 0
///
/// All of the user's entries are first removed from `filtered`. If the user has
/// no entry in `all`, `filtered` is returned unchanged.
pub fn prioritize_user(
    mut filtered: Vec<QuizResult>,
    all: &[QuizResult],
    user: &str,
) -> Vec<QuizResult> {
    if let Some(own) = all.iter().find(|e| is_user(e, user)) {
        filtered.retain(|e| !is_user(e, user));
        filtered.insert(0, own.clone());
    }
    filtered
}

/// Reads and filters leaderboard data
#[derive(Clone)]
pub struct LeaderboardService {
    store: Arc<dyn KeyValueStore>,
    keys: KeySpace,
    query_window: usize,
}

impl LeaderboardService {
    pub fn new(store: Arc<dyn KeyValueStore>, keys: KeySpace) -> Self {
        Self {
            store,
            keys,
            query_window: DEFAULT_QUERY_WINDOW,
        }
    }

    /// Override how many index entries `query` considers
    pub fn with_query_window(mut self, query_window: usize) -> Self {
        self.query_window = query_window;
        self
    }

    /// Newest `limit` parsed index entries; unparseable members are dropped
    async fn read_index(&self, limit: usize) -> Result<Vec<QuizResult>> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let stop = isize::try_from(limit - 1).unwrap_or(isize::MAX);
        let members = self.store.zrange(&self.keys.leaderboard(), 0, stop).await?;

        let total = members.len();
        let entries: Vec<QuizResult> = members
            .iter()
            .filter_map(|m| match serde_json::from_str::<QuizResult>(m) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("Skipping malformed leaderboard entry ({}): {}", e, m);
                    None
                }
            })
            .collect();

        debug!("Read {} of {} leaderboard members", entries.len(), total);
        Ok(entries)
    }

    /// Newest-first leaderboard, at most `limit` rows
    ///
    /// When the index yields nothing, falls back to the per-user hash records
    /// so results survive a lost or never-written index.
    ///
    /// # Errors
    /// `StoreUnavailable` on store failure.
    pub async fn list(&self, limit: usize) -> Result<Vec<LeaderboardEntry>> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let entries = self.read_index(limit).await?;
        if !entries.is_empty() {
            return Ok(entries.into_iter().map(LeaderboardEntry::Record).collect());
        }

        let raw = self.read_records(limit).await?;
        if !raw.is_empty() {
            info!(
                "Leaderboard index empty; served {} rows from result records",
                raw.len()
            );
        }
        Ok(raw.into_iter().map(LeaderboardEntry::Raw).collect())
    }

    /// Raw field maps of every result hash, newest first
    async fn read_records(&self, limit: usize) -> Result<Vec<BTreeMap<String, String>>> {
        let keys = self.store.scan_keys(&self.keys.result_pattern()).await?;

        let mut records = Vec::with_capacity(keys.len());
        for key in keys {
            let fields = self.store.hgetall(&key).await?;
            if !fields.is_empty() {
                records.push(fields.into_iter().collect::<BTreeMap<_, _>>());
            }
        }

        let timestamp = |r: &BTreeMap<String, String>| {
            r.get("timestamp")
                .and_then(|t| t.parse::<i64>().ok())
                .unwrap_or(i64::MIN)
        };
        records.sort_by(|a, b| timestamp(b).cmp(&timestamp(a)));
        records.truncate(limit);
        Ok(records)
    }

    /// Filtered view of the newest entries, with the requester first
    ///
    /// `requesting_user` is compared against each entry's user id as a string;
    /// an empty value counts as absent.
    ///
    /// # Errors
    /// `StoreUnavailable` on store failure.
    pub async fn query(
        &self,
        filter: &LeaderboardFilter,
        requesting_user: Option<&str>,
    ) -> Result<Vec<QuizResult>> {
        let requesting_user = requesting_user.filter(|u| !u.is_empty());
        let all = self.read_index(self.query_window).await?;

        let filtered = apply_filter(&all, filter, requesting_user);
        Ok(match requesting_user {
            Some(user) => prioritize_user(filtered, &all, user),
            None => filtered,
        })
    }
}
