use chronos_core::store::Store;
use chronos_core::types::Moment;
use std::path::PathBuf;
use tokio::sync::broadcast;

use crate::error::AppError;

/// Events fanned out to `/api/events` subscribers.
#[derive(Debug, Clone, PartialEq)]
pub enum ServerEvent {
    /// Periodic clock reading; statuses should be recomputed against it.
    Tick(Moment),
    /// Stored data changed.
    Update,
    /// The server is going down; open streams end.
    Shutdown,
}

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub root: PathBuf,
    pub event_tx: broadcast::Sender<ServerEvent>,
}

impl AppState {
    pub fn new(root: PathBuf) -> Self {
        let (tx, _) = broadcast::channel(64);
        Self { root, event_tx: tx }
    }

    /// Broadcast that stored data changed. No subscribers is fine.
    pub fn notify_update(&self) {
        let _ = self.event_tx.send(ServerEvent::Update);
    }

    /// Run `f` against the project store on the blocking pool.
    pub async fn with_store<T, F>(&self, f: F) -> Result<T, AppError>
    where
        T: Send + 'static,
        F: FnOnce(&Store) -> chronos_core::Result<T> + Send + 'static,
    {
        let root = self.root.clone();
        let result = tokio::task::spawn_blocking(move || {
            let store = Store::open_project(&root)?;
            f(&store)
        })
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;
        Ok(result)
    }
}
