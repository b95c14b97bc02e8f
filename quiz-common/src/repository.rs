//! Result persistence
//!
//! A submission is written twice: a per-user hash record and a member of the
//! time-ordered leaderboard index. The two writes are independent. If the
//! second fails the first is not rolled back, so readers must tolerate the
//! record and the index disagreeing.

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::result::QuizResult;
use crate::store::{KeySpace, KeyValueStore};
use crate::{Error, Result};

#[derive(Clone)]
pub struct ResultRepository {
    store: Arc<dyn KeyValueStore>,
    keys: KeySpace,
}

impl ResultRepository {
    pub fn new(store: Arc<dyn KeyValueStore>, keys: KeySpace) -> Self {
        Self { store, keys }
    }

    /// Persist a completed quiz
    ///
    /// Repeat submissions from one user overwrite the hash fields but add a
    /// new index member each time (members differ by timestamp).
    ///
    /// # Errors
    /// `Validation` if the result cannot be indexed (nothing is written);
    /// `StoreUnavailable` if either write fails.
    pub async fn submit(&self, result: &QuizResult) -> Result<()> {
        let member = serde_json::to_string(result)
            .map_err(|e| Error::Validation(format!("Result not encodable: {}", e)))?;
        let index_score = result.index_score()?;

        let record_key = self.keys.result(result.user_id);
        self.store
            .hset_multiple(&record_key, &result.to_fields())
            .await?;
        debug!("Wrote result record {}", record_key);

        if let Err(e) = self
            .store
            .zadd(&self.keys.leaderboard(), &member, index_score)
            .await
        {
            warn!(
                "Result record {} written but leaderboard index update failed: {}",
                record_key, e
            );
            return Err(e);
        }

        info!(
            "Stored quiz result: user={} type={} score={}",
            result.user_id, result.personality_type, result.score
        );
        Ok(())
    }

    /// Latest hash record for a user, if one exists
    ///
    /// # Errors
    /// `StoreUnavailable` on store failure, `Deserialization` if the record is
    /// present but unreadable.
    pub async fn find_by_user(&self, user_id: i64) -> Result<Option<QuizResult>> {
        let fields = self.store.hgetall(&self.keys.result(user_id)).await?;
        if fields.is_empty() {
            return Ok(None);
        }
        QuizResult::from_fields(&fields).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leaderboard::{LeaderboardEntry, LeaderboardService};
    use crate::personality::PersonalityType;
    use crate::store::MemoryStore;

    fn result(user_id: i64, personality_type: PersonalityType, timestamp: i64) -> QuizResult {
        QuizResult {
            user_id,
            personality_type,
            score: 3,
            timestamp,
            display_name: None,
        }
    }

    #[tokio::test]
    async fn test_submit_writes_record_and_index() {
        let store = MemoryStore::new();
        let repo = ResultRepository::new(Arc::new(store.clone()), KeySpace::default());

        let r = result(42, PersonalityType::Visionary, 1_000);
        repo.submit(&r).await.unwrap();

        let fields = store.hgetall("results:42").await.unwrap();
        assert_eq!(fields["userId"], "42");
        assert_eq!(fields["personalityType"], "visionary");
        assert_eq!(fields["score"], "3");
        assert_eq!(fields["timestamp"], "1000");

        let members = store.zrange("leaderboard", 0, -1).await.unwrap();
        assert_eq!(members.len(), 1);
        let stored: QuizResult = serde_json::from_str(&members[0]).unwrap();
        assert_eq!(stored, r);
    }

    #[tokio::test]
    async fn test_repeat_submissions_add_index_members() {
        let store = MemoryStore::new();
        let repo = ResultRepository::new(Arc::new(store.clone()), KeySpace::default());

        repo.submit(&result(7, PersonalityType::Builder, 1_000)).await.unwrap();
        repo.submit(&result(7, PersonalityType::Analyst, 2_000)).await.unwrap();

        let members = store.zrange("leaderboard", 0, -1).await.unwrap();
        assert_eq!(members.len(), 2);
        // newest first because scores are negated timestamps
        assert!(members[0].contains("analyst"));

        let latest = repo.find_by_user(7).await.unwrap().unwrap();
        assert_eq!(latest.personality_type, PersonalityType::Analyst);
    }

    #[tokio::test]
    async fn test_identical_submission_collapses_in_index() {
        let store = MemoryStore::new();
        let repo = ResultRepository::new(Arc::new(store.clone()), KeySpace::default());

        let r = result(7, PersonalityType::Builder, 1_000);
        repo.submit(&r).await.unwrap();
        repo.submit(&r).await.unwrap();

        assert_eq!(store.zrange("leaderboard", 0, -1).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_namespace_applies_to_both_writes() {
        let store = MemoryStore::new();
        let repo = ResultRepository::new(Arc::new(store.clone()), KeySpace::new("quiz"));

        repo.submit(&result(1, PersonalityType::Connector, 5)).await.unwrap();

        assert!(!store.hgetall("quiz:results:1").await.unwrap().is_empty());
        assert_eq!(store.zrange("quiz:leaderboard", 0, -1).await.unwrap().len(), 1);
        assert!(store.zrange("leaderboard", 0, -1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_store_outage_fails_submit() {
        let store = MemoryStore::new();
        store.set_unavailable(true);
        let repo = ResultRepository::new(Arc::new(store), KeySpace::default());

        let err = repo
            .submit(&result(1, PersonalityType::Builder, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::StoreUnavailable(_)));
    }

    #[tokio::test]
    async fn test_failed_index_write_keeps_record() {
        let store = MemoryStore::new();
        store.set_zadd_failing(true);
        let shared: Arc<dyn KeyValueStore> = Arc::new(store.clone());
        let repo = ResultRepository::new(shared.clone(), KeySpace::default());

        let r = result(5, PersonalityType::Analyst, 4_000);
        let err = repo.submit(&r).await.unwrap_err();
        assert!(matches!(err, Error::StoreUnavailable(_)));

        // first write is not rolled back
        let fields = store.hgetall("results:5").await.unwrap();
        assert_eq!(fields["personalityType"], "analyst");
        assert!(store.zrange("leaderboard", 0, -1).await.unwrap().is_empty());
        assert_eq!(repo.find_by_user(5).await.unwrap(), Some(r));

        // the leaderboard still shows it through the record fallback
        let service = LeaderboardService::new(shared, KeySpace::default());
        let rows = service.list(10).await.unwrap();
        assert_eq!(rows.len(), 1);
        match &rows[0] {
            LeaderboardEntry::Raw(raw) => {
                assert_eq!(raw["userId"], "5");
                assert_eq!(raw["timestamp"], "4000");
            }
            other => panic!("expected raw record row, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unindexable_timestamp_writes_nothing() {
        let store = MemoryStore::new();
        let repo = ResultRepository::new(Arc::new(store.clone()), KeySpace::default());

        let err = repo
            .submit(&result(1, PersonalityType::Builder, i64::MIN))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(store.hgetall("results:1").await.unwrap().is_empty());
        assert!(store.zrange("leaderboard", 0, -1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_find_by_user_missing() {
        let repo = ResultRepository::new(Arc::new(MemoryStore::new()), KeySpace::default());
        assert!(repo.find_by_user(99).await.unwrap().is_none());
    }
}
