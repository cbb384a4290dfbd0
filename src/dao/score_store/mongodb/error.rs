use mongodb::error::Error as MongoError;
use thiserror::Error;

/// Result alias for MongoDB store operations.
pub type MongoResult<T> = std::result::Result<T, MongoDaoError>;

/// Failures raised by the MongoDB store, tagged with the operation that failed.
#[derive(Debug, Error)]
pub enum MongoDaoError {
    /// No connection string was provided.
    #[error("MongoDB connection string is not configured (set `{var}`)")]
    MissingUri {
        /// Environment variable to set.
        var: &'static str,
    },
    #[error("failed to parse MongoDB connection URI")]
    InvalidUri {
        #[source]
        source: MongoError,
    },
    #[error("failed to build MongoDB client from options")]
    ClientConstruction {
        #[source]
        source: MongoError,
    },
    #[error("MongoDB ping failed during initial connection")]
    InitialPing {
        #[source]
        source: MongoError,
    },
    #[error("MongoDB ping health check failed")]
    HealthPing {
        #[source]
        source: MongoError,
    },
    #[error("failed to ensure index `{index}` on collection `{collection}`")]
    EnsureIndex {
        collection: &'static str,
        index: &'static str,
        #[source]
        source: MongoError,
    },
    /// Lookup of one player's record failed.
    #[error("failed to load score for player `{player}`")]
    FindScore {
        player: String,
        #[source]
        source: MongoError,
    },
    /// The conditional upsert failed; the server code decides how it is reported.
    #[error("failed to save score for player `{player}`")]
    UpsertScore {
        player: String,
        #[source]
        source: MongoError,
    },
}
