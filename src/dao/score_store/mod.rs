//! Score persistence backends.

pub mod memory;
#[cfg(feature = "mongo-store")]
pub mod mongodb;

use crate::dao::models::{ScoreEntity, UpsertOutcome};
use crate::dao::storage::StorageResult;
use futures::future::BoxFuture;

/// Abstraction over the persistence layer for player high scores.
pub trait ScoreStore: Send + Sync {
    /// Point lookup by exact player identifier.
    fn find_by_player(&self, player: String)
    -> BoxFuture<'static, StorageResult<Option<ScoreEntity>>>;
    /// Create the record when absent, otherwise raise `high_score` only when `score` is greater.
    ///
    /// Implementations must perform the compare and the write as one atomic step.
    fn upsert_high_score(
        &self,
        player: String,
        score: f64,
    ) -> BoxFuture<'static, StorageResult<UpsertOutcome>>;
    /// Cheap round trip proving the backend still answers.
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
    /// Release backend resources. The store must not be used afterwards.
    fn shutdown(&self) -> BoxFuture<'static, ()>;
}
