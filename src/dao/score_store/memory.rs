//! Process-local [`ScoreStore`] used by tests and embedders that do not need durability.

use std::sync::Arc;

use dashmap::{DashMap, mapref::entry::Entry};
use futures::future::BoxFuture;

use crate::dao::{
    models::{ScoreEntity, UpsertOutcome},
    score_store::ScoreStore,
    storage::StorageResult,
};

/// In-memory [`ScoreStore`] keyed by player identifier.
///
/// Each upsert holds the shard lock for its key while comparing and writing, so concurrent
/// submissions for one player keep the maximum.
#[derive(Clone, Default)]
pub struct MemoryScoreStore {
    scores: Arc<DashMap<String, f64>>,
}

impl MemoryScoreStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of players with a recorded score.
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Whether no score has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    fn upsert(&self, player: String, score: f64) -> UpsertOutcome {
        match self.scores.entry(player) {
            Entry::Occupied(mut entry) => {
                let previous = *entry.get();
                if score > previous {
                    entry.insert(score);
                }
                UpsertOutcome::resolve(Some(previous), score)
            }
            Entry::Vacant(entry) => {
                entry.insert(score);
                UpsertOutcome::resolve(None, score)
            }
        }
    }
}

impl ScoreStore for MemoryScoreStore {
    fn find_by_player(
        &self,
        player: String,
    ) -> BoxFuture<'static, StorageResult<Option<ScoreEntity>>> {
        let high_score = self.scores.get(&player).map(|entry| *entry.value());
        Box::pin(async move {
            Ok(high_score.map(|high_score| ScoreEntity { player, high_score }))
        })
    }

    fn upsert_high_score(
        &self,
        player: String,
        score: f64,
    ) -> BoxFuture<'static, StorageResult<UpsertOutcome>> {
        let outcome = self.upsert(player, score);
        Box::pin(async move { Ok(outcome) })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async { Ok(()) })
    }

    fn shutdown(&self) -> BoxFuture<'static, ()> {
        Box::pin(async {})
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_player_is_absent() {
        let store = MemoryScoreStore::new();
        let found = store.find_by_player("nobody".into()).await.unwrap();
        assert!(found.is_none());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn first_submission_creates_record() {
        let store = MemoryScoreStore::new();
        let outcome = store.upsert_high_score("alice".into(), 100.0).await.unwrap();
        assert_eq!(
            outcome,
            UpsertOutcome {
                existed: false,
                high_score: 100.0
            }
        );

        let found = store.find_by_player("alice".into()).await.unwrap();
        assert_eq!(
            found,
            Some(ScoreEntity {
                player: "alice".into(),
                high_score: 100.0
            })
        );
    }

    #[tokio::test]
    async fn high_score_never_decreases() {
        let store = MemoryScoreStore::new();
        store.upsert_high_score("alice".into(), 100.0).await.unwrap();

        let lower = store.upsert_high_score("alice".into(), 50.0).await.unwrap();
        assert!(lower.existed);
        assert_eq!(lower.high_score, 100.0);

        let higher = store.upsert_high_score("alice".into(), 120.0).await.unwrap();
        assert_eq!(higher.high_score, 120.0);

        let found = store.find_by_player("alice".into()).await.unwrap().unwrap();
        assert_eq!(found.high_score, 120.0);
    }

    #[tokio::test]
    async fn players_are_matched_exactly() {
        let store = MemoryScoreStore::new();
        store.upsert_high_score("Alice".into(), 10.0).await.unwrap();

        assert!(store.find_by_player("alice".into()).await.unwrap().is_none());
        assert!(store.find_by_player("Alic".into()).await.unwrap().is_none());
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn concurrent_submissions_keep_maximum() {
        let store = MemoryScoreStore::new();
        let handles = (0..64)
            .map(|score| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .upsert_high_score("racer".into(), f64::from(score))
                        .await
                        .unwrap()
                })
            })
            .collect::<Vec<_>>();

        for handle in handles {
            handle.await.unwrap();
        }

        let found = store.find_by_player("racer".into()).await.unwrap().unwrap();
        assert_eq!(found.high_score, 63.0);
    }
}
