//! Shared application state.

pub mod connection;

use std::sync::Arc;

use crate::{
    config::AppConfig,
    dao::{score_store::ScoreStore, storage::StorageError},
    error::ServiceError,
};

pub use self::connection::{ConnectionManager, Connector, connector};

/// Handle to the application state shared by every handler.
pub type SharedState = Arc<AppState>;

/// Explicit application context handed to every handler.
///
/// Owns the configuration and the lazily established store connection, so tests can build an
/// isolated instance and the binary can shut it down cleanly.
pub struct AppState {
    config: AppConfig,
    connection: ConnectionManager,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    ///
    /// No connection is attempted until the first request needs the store.
    pub fn new(config: AppConfig, connector: Connector) -> SharedState {
        Arc::new(Self {
            config,
            connection: ConnectionManager::new(connector),
        })
    }

    /// Build a state whose connector always hands out `store`.
    pub fn with_store(config: AppConfig, store: Arc<dyn ScoreStore>) -> SharedState {
        Self::new(
            config,
            connector(move || {
                let store = store.clone();
                async move { Ok::<_, StorageError>(store) }
            }),
        )
    }

    /// Runtime configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Store connection, connected or not.
    pub fn connection(&self) -> &ConnectionManager {
        &self.connection
    }

    /// Ensure the store is connected and return a handle to it.
    pub async fn score_store(&self) -> Result<Arc<dyn ScoreStore>, ServiceError> {
        self.connection
            .ensure_connected()
            .await
            .map_err(ServiceError::Connection)
    }

    /// Release the store connection, if one was ever established.
    pub async fn shutdown(&self) {
        self.connection.shutdown().await;
    }
}
