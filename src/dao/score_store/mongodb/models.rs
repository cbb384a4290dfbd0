use mongodb::bson::{Document, doc};
use serde::{Deserialize, Serialize};

use crate::dao::models::ScoreEntity;

/// Stored shape of a score record; field names match the existing `scores` collection.
///
/// The generated `_id` is left to the server and ignored when reading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoScoreDocument {
    pub player: String,
    #[serde(rename = "highScore", default)]
    pub high_score: f64,
}

impl From<MongoScoreDocument> for ScoreEntity {
    fn from(value: MongoScoreDocument) -> Self {
        Self {
            player: value.player,
            high_score: value.high_score,
        }
    }
}

/// Filter matching the document of one player.
pub fn player_filter(player: &str) -> Document {
    doc! { "player": player }
}
