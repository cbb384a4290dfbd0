//! Health check payload.

use serde::Serialize;
use utoipa::ToSchema;

/// Simple health response returned by the `/healthcheck` route.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Health status ("ok", "degraded" or "disconnected").
    pub status: String,
}

impl HealthResponse {
    /// Store connected and answering pings.
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }

    /// Store connected but the last ping failed.
    pub fn degraded() -> Self {
        Self {
            status: "degraded".to_string(),
        }
    }

    /// No request has needed the store yet, or every attempt so far failed.
    pub fn disconnected() -> Self {
        Self {
            status: "disconnected".to_string(),
        }
    }
}
