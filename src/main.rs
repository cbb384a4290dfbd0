//! High Score Back binary entrypoint wiring the REST routes to the lazily connected score store.

use std::net::SocketAddr;

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use high_score_back::{
    config::AppConfig,
    routes,
    state::{AppState, Connector, SharedState},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AppConfig::load();
    let port = config.port();
    let connector = store_connector(&config);

    // The store is connected by the first request that needs it.
    let app_state = AppState::new(config, connector);
    let app = build_router(app_state.clone());

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(%addr, "starting server");

    let listener = TcpListener::bind(addr).await.context("binding server")?;
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving axum")?;

    app_state.shutdown().await;
    info!("server stopped");
    Ok(())
}

#[cfg(feature = "mongo-store")]
/// Connect to MongoDB using the configured connection string.
fn store_connector(config: &AppConfig) -> Connector {
    use std::sync::Arc;

    use high_score_back::{
        dao::{
            score_store::{
                ScoreStore,
                mongodb::{MongoConfig, MongoScoreStore},
            },
            storage::StorageError,
        },
        state::connector,
    };

    let uri = config.mongo_uri().map(str::to_owned);
    let db_name = config.mongo_db().to_owned();

    connector(move || {
        let uri = uri.clone();
        let db_name = db_name.clone();
        async move {
            let mongo_config = MongoConfig::from_uri(uri.as_deref(), &db_name).await?;
            let store = MongoScoreStore::connect(mongo_config).await?;
            Ok::<Arc<dyn ScoreStore>, StorageError>(Arc::new(store))
        }
    })
}

#[cfg(not(feature = "mongo-store"))]
/// Without a compiled-in backend every request fails with a connection error.
fn store_connector(_config: &AppConfig) -> Connector {
    use std::sync::Arc;

    use high_score_back::{
        dao::{score_store::ScoreStore, storage::StorageError},
        state::connector,
    };

    connector(|| async {
        Err::<Arc<dyn ScoreStore>, _>(StorageError::Unconfigured(
            "built without the `mongo-store` feature".into(),
        ))
    })
}

/// Build the top-level router and attach cross-cutting middleware layers.
fn build_router(state: SharedState) -> Router<()> {
    routes::router(state).layer(TraceLayer::new_for_http())
}

/// Configure tracing subscribers so logs include spans by default.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=debug".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Wait for Ctrl+C or SIGTERM and shut the server down gracefully.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut term = signal(SignalKind::terminate()).expect("install SIGTERM handler");
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = term.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
