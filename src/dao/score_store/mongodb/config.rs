use mongodb::options::ClientOptions;

use super::error::{MongoDaoError, MongoResult};

/// Environment variable holding the connection string, reported when it is missing.
pub const MONGO_URI_ENV: &str = "MONGODB_URI";

/// Parsed client options and target database.
#[derive(Clone)]
pub struct MongoConfig {
    /// Driver options parsed from the connection string.
    pub options: ClientOptions,
    /// Database holding the `scores` collection.
    pub database_name: String,
}

impl MongoConfig {
    /// Parse the connection string. A missing string is reported as a connection failure.
    pub async fn from_uri(uri: Option<&str>, db_name: &str) -> MongoResult<Self> {
        let uri = uri
            .filter(|uri| !uri.trim().is_empty())
            .ok_or(MongoDaoError::MissingUri { var: MONGO_URI_ENV })?;
        let options = ClientOptions::parse(uri)
            .await
            .map_err(|source| MongoDaoError::InvalidUri { source })?;

        Ok(Self {
            options,
            database_name: db_name.to_owned(),
        })
    }
}
