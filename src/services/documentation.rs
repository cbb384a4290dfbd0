//! OpenAPI document assembly.

use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for High Score Back.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::score::get_score,
        crate::routes::score::post_score,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::score::ScoreSubmission,
            crate::dto::score::GetScoreResponse,
            crate::dto::score::PostScoreResponse,
            crate::error::ErrorBody,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "score", description = "Player high score lookups and submissions"),
    )
)]
/// OpenAPI document of the service.
pub struct ApiDoc;
