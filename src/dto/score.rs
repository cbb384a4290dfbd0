//! Request and response payloads of the score endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};
use validator::ValidationError;

use crate::{
    dao::models::UpsertOutcome,
    dto::{
        serialize_score,
        validation::{invalid_score, validate_content_type, validate_player, validate_score},
    },
};

/// Query parameters accepted by `GET /get-score`.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GetScoreQuery {
    /// Exact player identifier.
    pub player: Option<String>,
}

/// Validated body of `POST /post-score`.
#[derive(Debug, Clone, PartialEq, ToSchema)]
pub struct ScoreSubmission {
    /// Player identifier; any non-blank string.
    pub player: String,
    /// Submitted score; must be a non-negative number.
    pub score: f64,
}

impl ScoreSubmission {
    /// Validate a raw request, stopping at the first failure.
    ///
    /// Checks run in order: content type, JSON object body, `player`, `score`. A number too large
    /// for an `f64` is reported as an invalid score.
    pub fn parse(content_type: Option<&str>, body: &[u8]) -> Result<Self, ValidationError> {
        validate_content_type(content_type)?;

        let body = match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(fields)) => fields,
            Ok(_) => return Err(invalid_body("Request body must be a JSON object")),
            // serde_json refuses numbers beyond the f64 range.
            Err(err) if err.to_string().starts_with("number out of range") => {
                return Err(invalid_score());
            }
            Err(_) => return Err(invalid_body("Request body must be valid JSON")),
        };

        let player = validate_player(body.get("player"))?.to_owned();
        let score = validate_score(body.get("score"))?;

        Ok(Self { player, score })
    }
}

fn invalid_body(message: &'static str) -> ValidationError {
    let mut err = ValidationError::new("body");
    err.message = Some(message.into());
    err
}

/// Response of `GET /get-score`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetScoreResponse {
    /// Always `true`.
    pub success: bool,
    /// Player identifier as queried.
    pub player: String,
    /// Best score so far; `0` for players without a record.
    #[serde(serialize_with = "serialize_score")]
    pub high_score: f64,
}

impl GetScoreResponse {
    /// Successful lookup result.
    pub fn new(player: String, high_score: f64) -> Self {
        Self {
            success: true,
            player,
            high_score,
        }
    }
}

/// Response of `POST /post-score`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostScoreResponse {
    /// Always `true`.
    pub success: bool,
    /// True when the player already had a record, whether or not it was raised.
    pub updated: bool,
    /// Highest of the submitted and previously stored scores.
    #[serde(serialize_with = "serialize_score")]
    pub high_score: f64,
}

impl From<UpsertOutcome> for PostScoreResponse {
    fn from(outcome: UpsertOutcome) -> Self {
        Self {
            success: true,
            updated: outcome.existed,
            high_score: outcome.high_score,
        }
    }
}
