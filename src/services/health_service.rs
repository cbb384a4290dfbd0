//! Store health reporting.

use tracing::warn;

use crate::{dto::health::HealthResponse, state::SharedState};

/// Report store health without forcing a connection.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    let Some(store) = state.connection().current() else {
        return HealthResponse::disconnected();
    };

    match store.health_check().await {
        Ok(()) => HealthResponse::ok(),
        Err(err) => {
            warn!(error = %err, "storage health check failed");
            HealthResponse::degraded()
        }
    }
}
