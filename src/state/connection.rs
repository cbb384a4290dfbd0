//! Lazily established, process-wide store connection.

use std::{future::Future, sync::Arc};

use futures::future::BoxFuture;
use tokio::sync::OnceCell;
use tracing::{info, warn};

use crate::dao::{score_store::ScoreStore, storage::StorageResult};

/// Factory invoked to open the store connection.
pub type Connector =
    Box<dyn Fn() -> BoxFuture<'static, StorageResult<Arc<dyn ScoreStore>>> + Send + Sync>;

/// Wrap an async closure into a [`Connector`].
pub fn connector<F, Fut>(connect: F) -> Connector
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = StorageResult<Arc<dyn ScoreStore>>> + Send + 'static,
{
    Box::new(move || Box::pin(connect()))
}

/// Owns the single store handle shared by every request.
pub struct ConnectionManager {
    store: OnceCell<Arc<dyn ScoreStore>>,
    connector: Connector,
}

impl ConnectionManager {
    /// Manager that has not connected yet.
    pub fn new(connector: Connector) -> Self {
        Self {
            store: OnceCell::new(),
            connector,
        }
    }

    /// Return the connected store, connecting first if needed.
    ///
    /// Concurrent callers share one in-flight attempt. A failed attempt is returned as-is and
    /// leaves the manager unconnected, so the next call tries again.
    pub async fn ensure_connected(&self) -> StorageResult<Arc<dyn ScoreStore>> {
        if let Some(store) = self.store.get() {
            return Ok(store.clone());
        }

        let store = self
            .store
            .get_or_try_init(|| async {
                info!("connecting to score store");
                match (self.connector)().await {
                    Ok(store) => {
                        info!("score store connected");
                        Ok(store)
                    }
                    Err(err) => {
                        warn!(error = %err, "score store connection attempt failed");
                        Err(err)
                    }
                }
            })
            .await?;

        Ok(store.clone())
    }

    /// Connected store, without attempting a connection.
    pub fn current(&self) -> Option<Arc<dyn ScoreStore>> {
        self.store.get().cloned()
    }

    /// Whether a connection has been established.
    pub fn is_connected(&self) -> bool {
        self.store.initialized()
    }

    /// Shut the store down if it was ever connected.
    pub async fn shutdown(&self) {
        if let Some(store) = self.store.get() {
            store.shutdown().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::atomic::{AtomicUsize, Ordering},
        time::Duration,
    };

    use super::*;
    use crate::dao::{score_store::memory::MemoryScoreStore, storage::StorageError};

    fn counting_connector(attempts: Arc<AtomicUsize>, failures: usize) -> Connector {
        connector(move || {
            let attempts = attempts.clone();
            async move {
                let attempt = attempts.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(20)).await;
                if attempt < failures {
                    return Err(StorageError::Unconfigured("not yet".into()));
                }
                Ok(Arc::new(MemoryScoreStore::new()) as Arc<dyn ScoreStore>)
            }
        })
    }

    #[tokio::test]
    async fn connects_lazily() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let manager = ConnectionManager::new(counting_connector(attempts.clone(), 0));

        assert!(!manager.is_connected());
        assert!(manager.current().is_none());
        assert_eq!(attempts.load(Ordering::SeqCst), 0);

        manager.ensure_connected().await.unwrap();
        assert!(manager.is_connected());
        assert!(manager.current().is_some());
    }

    #[tokio::test]
    async fn reuses_existing_connection() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let manager = ConnectionManager::new(counting_connector(attempts.clone(), 0));

        let first = manager.ensure_connected().await.unwrap();
        let second = manager.ensure_connected().await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn concurrent_first_callers_share_one_attempt() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let manager = Arc::new(ConnectionManager::new(counting_connector(
            attempts.clone(),
            0,
        )));

        let handles = (0..16)
            .map(|_| {
                let manager = manager.clone();
                tokio::spawn(async move { manager.ensure_connected().await.is_ok() })
            })
            .collect::<Vec<_>>();

        for handle in handles {
            assert!(handle.await.unwrap());
        }
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_attempt_is_reported_and_retried_next_call() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let manager = ConnectionManager::new(counting_connector(attempts.clone(), 1));

        let err = manager.ensure_connected().await.err().unwrap();
        assert!(matches!(err, StorageError::Unconfigured(_)));
        assert!(!manager.is_connected());
        assert_eq!(attempts.load(Ordering::SeqCst), 1);

        manager.ensure_connected().await.unwrap();
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }
}
