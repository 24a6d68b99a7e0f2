// Persistence gateway
// Decision: One cached StorageBackend per process, held in axum state rather than a global
// Decision: Concurrent callers join the single in-flight attempt (futures::future::Shared)
// Decision: A failed attempt resets the slot so the next call retries; no timeout here
// Decision: An attempt that finishes after a disconnect closes its own backend
//
// Slot transitions happen under a parking_lot::Mutex that is never held across
// an await point.

use devevents_core::{Result, StoreError};
use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use std::future::Future;
use std::sync::Arc;

use super::backend::StorageBackend;
use super::memory::InMemoryDatabase;
use super::repositories::{Database, PoolSettings};

/// Environment variable holding the PostgreSQL connection string
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";

type ConnectFuture = BoxFuture<'static, Result<StorageBackend>>;
type Connector = Arc<dyn Fn() -> ConnectFuture + Send + Sync>;

enum Slot {
    Idle,
    Connecting(Shared<ConnectFuture>),
    Connected(StorageBackend),
}

struct SlotState {
    slot: Slot,
    /// Bumped by every disconnect; attempts started under an older epoch are stale
    epoch: u64,
}

/// Lazily opened, cached handle to the store
pub struct PersistenceGateway {
    source: &'static str,
    connector: Connector,
    state: Mutex<SlotState>,
}

impl PersistenceGateway {
    /// Gateway over an arbitrary connector. `source` names it in logs.
    pub fn new<F, Fut>(source: &'static str, connector: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<StorageBackend>> + Send + 'static,
    {
        Self {
            source,
            connector: Arc::new(move || connector().boxed()),
            state: Mutex::new(SlotState {
                slot: Slot::Idle,
                epoch: 0,
            }),
        }
    }

    /// PostgreSQL gateway reading `DATABASE_URL` at connection time
    pub fn postgres_from_env(settings: PoolSettings) -> Self {
        Self::postgres_from_env_var(DATABASE_URL_VAR, settings)
    }

    /// PostgreSQL gateway reading the connection string from `var` at
    /// connection time. An unset or empty variable fails that attempt with a
    /// configuration error.
    pub fn postgres_from_env_var(var: &'static str, settings: PoolSettings) -> Self {
        Self::new("postgres", move || {
            let settings = settings.clone();
            async move {
                let url = std::env::var(var)
                    .ok()
                    .filter(|url| !url.trim().is_empty())
                    .ok_or_else(|| {
                        StoreError::config(format!(
                            "Please define the {} environment variable",
                            var
                        ))
                    })?;
                let db = Database::connect(&url, &settings).await?;
                Ok(StorageBackend::Postgres(db))
            }
        })
    }

    /// In-memory gateway. Data survives disconnect/connect cycles for the life
    /// of the gateway.
    pub fn in_memory() -> Self {
        let db = Arc::new(InMemoryDatabase::new());
        Self::new("memory", move || {
            let db = db.clone();
            async move { Ok(StorageBackend::InMemory(db)) }
        })
    }

    /// Return the cached backend, joining or starting a connection attempt
    /// if there is none yet.
    pub async fn connect(&self) -> Result<StorageBackend> {
        let (attempt, epoch) = {
            let mut state = self.state.lock();
            let pending = match &state.slot {
                Slot::Connected(backend) => return Ok(backend.clone()),
                Slot::Connecting(pending) => pending.clone(),
                Slot::Idle => {
                    tracing::debug!(source = self.source, "Opening store connection");
                    let pending = (self.connector)().shared();
                    state.slot = Slot::Connecting(pending.clone());
                    pending
                }
            };
            (pending, state.epoch)
        };

        let result = attempt.clone().await;

        let stale = {
            let mut state = self.state.lock();
            if state.epoch != epoch {
                true
            } else {
                // Only the attempt still recorded in the slot may settle it
                let current =
                    matches!(&state.slot, Slot::Connecting(pending) if pending.ptr_eq(&attempt));
                if current {
                    state.slot = self.settle(&result);
                }
                false
            }
        };

        if stale {
            if let Ok(backend) = &result {
                backend.close().await;
            }
            tracing::warn!(source = self.source, "Store disconnected during connection attempt");
            return Err(StoreError::connection(
                "store was disconnected before the connection attempt finished",
            ));
        }

        result
    }

    fn settle(&self, result: &Result<StorageBackend>) -> Slot {
        match result {
            Ok(backend) => {
                tracing::info!(
                    source = self.source,
                    backend = backend.kind(),
                    "Store connected"
                );
                Slot::Connected(backend.clone())
            }
            Err(e) => {
                tracing::error!(
                    source = self.source,
                    error = %e,
                    "Store connection failed"
                );
                Slot::Idle
            }
        }
    }

    /// Close the cached backend, if any, and reset to idle. An attempt still in
    /// flight is abandoned; it closes whatever it opens.
    pub async fn disconnect(&self) {
        let previous = {
            let mut state = self.state.lock();
            state.epoch += 1;
            std::mem::replace(&mut state.slot, Slot::Idle)
        };
        if let Slot::Connected(backend) = previous {
            backend.close().await;
            tracing::info!(source = self.source, "Store connection closed");
        }
    }

    pub fn is_connected(&self) -> bool {
        matches!(self.state.lock().slot, Slot::Connected(_))
    }

    /// Slot state for the health probe
    pub fn status(&self) -> &'static str {
        match self.state.lock().slot {
            Slot::Idle => "disconnected",
            Slot::Connecting(_) => "connecting",
            Slot::Connected(_) => "connected",
        }
    }
}
