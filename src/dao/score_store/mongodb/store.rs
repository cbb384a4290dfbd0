use std::sync::Arc;

use futures::future::BoxFuture;
use mongodb::{
    Client, Collection, Database,
    bson::doc,
    options::{IndexOptions, ReturnDocument},
};
use tracing::info;

use super::{
    config::MongoConfig,
    connection::establish_connection,
    error::{MongoDaoError, MongoResult},
    models::{MongoScoreDocument, player_filter},
};
use crate::dao::{
    models::{ScoreEntity, UpsertOutcome},
    score_store::ScoreStore,
    storage::StorageResult,
};

const SCORE_COLLECTION_NAME: &str = "scores";
const PLAYER_INDEX_NAME: &str = "player_unique_idx";

/// MongoDB-backed [`ScoreStore`] implementation.
#[derive(Clone)]
pub struct MongoScoreStore {
    inner: Arc<MongoInner>,
}

struct MongoInner {
    client: Client,
    database: Database,
}

impl MongoInner {
    async fn ping(&self) -> MongoResult<()> {
        self.database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|source| MongoDaoError::HealthPing { source })?;
        Ok(())
    }
}

impl MongoScoreStore {
    /// Establish a connection to MongoDB and ensure indexes are present.
    pub async fn connect(config: MongoConfig) -> MongoResult<Self> {
        let (client, database) =
            establish_connection(&config.options, &config.database_name).await?;

        let store = Self {
            inner: Arc::new(MongoInner { client, database }),
        };
        store.ensure_indexes().await?;
        info!(
            database = %config.database_name,
            collection = SCORE_COLLECTION_NAME,
            "MongoDB score store ready"
        );
        Ok(store)
    }

    async fn ensure_indexes(&self) -> MongoResult<()> {
        let index = mongodb::IndexModel::builder()
            .keys(doc! {"player": 1})
            .options(
                IndexOptions::builder()
                    .name(Some(PLAYER_INDEX_NAME.to_owned()))
                    .unique(Some(true))
                    .build(),
            )
            .build();

        self.collection()
            .create_index(index)
            .await
            .map_err(|source| MongoDaoError::EnsureIndex {
                collection: SCORE_COLLECTION_NAME,
                index: "player",
                source,
            })?;

        Ok(())
    }

    fn collection(&self) -> Collection<MongoScoreDocument> {
        self.inner
            .database
            .collection::<MongoScoreDocument>(SCORE_COLLECTION_NAME)
    }

    async fn find_by_player(&self, player: String) -> MongoResult<Option<ScoreEntity>> {
        let document = self
            .collection()
            .find_one(player_filter(&player))
            .await
            .map_err(|source| MongoDaoError::FindScore {
                player: player.clone(),
                source,
            })?;

        Ok(document.map(Into::into))
    }

    /// Raise the stored score with a single `$max` upsert, reading back the pre-image.
    async fn upsert_high_score(&self, player: String, score: f64) -> MongoResult<UpsertOutcome> {
        let previous = self
            .collection()
            .find_one_and_update(
                player_filter(&player),
                doc! { "$max": { "highScore": score } },
            )
            .upsert(true)
            .return_document(ReturnDocument::Before)
            .await
            .map_err(|source| MongoDaoError::UpsertScore {
                player: player.clone(),
                source,
            })?;

        Ok(UpsertOutcome::resolve(
            previous.map(|document| document.high_score),
            score,
        ))
    }
}

impl ScoreStore for MongoScoreStore {
    fn find_by_player(
        &self,
        player: String,
    ) -> BoxFuture<'static, StorageResult<Option<ScoreEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.find_by_player(player).await.map_err(Into::into) })
    }

    fn upsert_high_score(
        &self,
        player: String,
        score: f64,
    ) -> BoxFuture<'static, StorageResult<UpsertOutcome>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .upsert_high_score(player, score)
                .await
                .map_err(Into::into)
        })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.inner.ping().await.map_err(Into::into) })
    }

    fn shutdown(&self) -> BoxFuture<'static, ()> {
        let client = self.inner.client.clone();
        Box::pin(async move {
            client.shutdown().await;
            info!("MongoDB client shut down");
        })
    }
}
