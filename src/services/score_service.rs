//! High score lookups and conditional updates.

use tracing::{debug, info};

use crate::{
    dto::score::{GetScoreResponse, PostScoreResponse, ScoreSubmission},
    error::ServiceError,
    state::SharedState,
};

/// Return the best score of `player`, `0` when the player has no record yet.
pub async fn get_score(
    state: &SharedState,
    player: String,
) -> Result<GetScoreResponse, ServiceError> {
    let store = state.score_store().await?;
    let record = store.find_by_player(player.clone()).await?;

    let high_score = record.map_or(0.0, |record| record.high_score);
    debug!(%player, high_score, "score looked up");
    Ok(GetScoreResponse::new(player, high_score))
}

/// Record a submission, raising the stored high score only when the new score beats it.
pub async fn post_score(
    state: &SharedState,
    submission: ScoreSubmission,
) -> Result<PostScoreResponse, ServiceError> {
    let store = state.score_store().await?;
    let ScoreSubmission { player, score } = submission;
    let outcome = store.upsert_high_score(player.clone(), score).await?;

    info!(
        %player,
        submitted = score,
        high_score = outcome.high_score,
        existed = outcome.existed,
        "score submitted"
    );
    Ok(outcome.into())
}
