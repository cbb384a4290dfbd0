//! HTTP routing.

use axum::Router;

use crate::state::SharedState;

pub mod cors;
pub mod docs;
pub mod health;
pub mod score;

/// Compose all route trees, wiring in shared state and documentation routes.
pub fn router(state: SharedState) -> Router<()> {
    health::router()
        .merge(score::router(&state))
        .merge(docs::router())
        .with_state(state)
}
