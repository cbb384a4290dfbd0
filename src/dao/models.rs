//! Score records shared between the stores and the services.

use serde::{Deserialize, Serialize};

/// Best score recorded for a single player.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoreEntity {
    /// Exact player identifier; unique across the store.
    pub player: String,
    /// Highest score ever accepted for the player.
    pub high_score: f64,
}

/// Result of a conditional high score write.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UpsertOutcome {
    /// Whether a record for the player existed before the write.
    pub existed: bool,
    /// Effective high score after the write, `max(submitted, previous or 0)`.
    pub high_score: f64,
}

impl UpsertOutcome {
    /// Derive the outcome from the value stored before the write.
    pub fn resolve(previous: Option<f64>, submitted: f64) -> Self {
        Self {
            existed: previous.is_some(),
            high_score: submitted.max(previous.unwrap_or(0.0)),
        }
    }
}
