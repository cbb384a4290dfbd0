//! `/get-score` and `/post-score` handlers.

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Query, RawQuery, State, rejection::QueryRejection},
    http::{HeaderMap, Method, header::CONTENT_TYPE},
    middleware,
    routing::{get, post},
};

use crate::{
    dto::{
        score::{GetScoreQuery, GetScoreResponse, PostScoreResponse, ScoreSubmission},
        validation::{validate_query_encoding, validate_query_player},
    },
    error::AppError,
    routes::cors::{CorsPolicy, apply_cors},
    services::score_service,
    state::SharedState,
};

/// Score lookup and submission endpoints, each behind its own CORS policy.
pub fn router(state: &SharedState) -> Router<SharedState> {
    let origins = state.config().allowed_origins();

    let read = Router::new()
        .route("/get-score", get(get_score).fallback(only_get))
        .route_layer(middleware::from_fn_with_state(
            CorsPolicy::new(origins, Method::GET),
            apply_cors,
        ));

    let write = Router::new()
        .route("/post-score", post(post_score).fallback(only_post))
        .route_layer(middleware::from_fn_with_state(
            CorsPolicy::new(origins, Method::POST),
            apply_cors,
        ));

    read.merge(write)
}

#[utoipa::path(
    get,
    path = "/get-score",
    tag = "score",
    params(GetScoreQuery),
    responses(
        (status = 200, description = "Best score of the player, 0 when unknown", body = GetScoreResponse),
        (status = 400, description = "Missing player or query not valid UTF-8", body = crate::error::ErrorBody),
        (status = 405, description = "Method other than GET", body = crate::error::ErrorBody),
        (status = 500, description = "Store unreachable or failing; detail omitted in production, as for POST", body = crate::error::ErrorBody)
    )
)]
/// Return the current high score of a player.
///
/// Store failures are redacted in production exactly like `/post-score` failures.
pub async fn get_score(
    State(state): State<SharedState>,
    RawQuery(raw_query): RawQuery,
    query: Result<Query<GetScoreQuery>, QueryRejection>,
) -> Result<Json<GetScoreResponse>, AppError> {
    validate_query_encoding(raw_query.as_deref())?;
    let Query(query) = query.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let player = validate_query_player(query.player.as_deref())?.to_owned();

    let payload = score_service::get_score(&state, player)
        .await
        .map_err(|err| AppError::from_service(err, state.config().is_production()))?;
    Ok(Json(payload))
}

#[utoipa::path(
    post,
    path = "/post-score",
    tag = "score",
    request_body(content = ScoreSubmission, content_type = "application/json"),
    responses(
        (status = 200, description = "Submission recorded", body = PostScoreResponse),
        (status = 400, description = "Invalid content type, player or score", body = crate::error::ErrorBody),
        (status = 405, description = "Method other than POST", body = crate::error::ErrorBody),
        (status = 409, description = "Concurrent creation of the same player", body = crate::error::ErrorBody),
        (status = 500, description = "Store unreachable or failing", body = crate::error::ErrorBody)
    )
)]
/// Submit a score, raising the player's high score when it is beaten.
pub async fn post_score(
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<PostScoreResponse>, AppError> {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok());
    let submission = ScoreSubmission::parse(content_type, &body)?;

    let payload = score_service::post_score(&state, submission)
        .await
        .map_err(|err| AppError::from_service(err, state.config().is_production()))?;
    Ok(Json(payload))
}

async fn only_get() -> AppError {
    AppError::MethodNotAllowed("GET")
}

async fn only_post() -> AppError {
    AppError::MethodNotAllowed("POST")
}
