use mongodb::{Client, Database, bson::doc, options::ClientOptions};
use tracing::debug;

use super::error::{MongoDaoError, MongoResult};

/// Build a client and confirm the server answers a single `ping`.
///
/// Failures are returned to the caller as-is; the next request will try again.
pub async fn establish_connection(
    options: &ClientOptions,
    database_name: &str,
) -> MongoResult<(Client, Database)> {
    let client = Client::with_options(options.clone())
        .map_err(|source| MongoDaoError::ClientConstruction { source })?;
    let database = client.database(database_name);

    database
        .run_command(doc! { "ping": 1 })
        .await
        .map_err(|source| MongoDaoError::InitialPing { source })?;
    debug!(database = database_name, "MongoDB answered initial ping");

    Ok((client, database))
}
