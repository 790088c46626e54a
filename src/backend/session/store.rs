/**
 * Session Store Backend
 *
 * [`SessionBackend`] picks the store at startup: PostgreSQL when a database
 * is configured, otherwise process memory. Both provide per-key atomicity
 * only; two requests saving the same session race and the last write wins.
 */

use async_trait::async_trait;
use thiserror::Error;
use tower_sessions::session::{Id, Record};
use tower_sessions::session_store::{self, ExpiredDeletion};
use tower_sessions::{MemoryStore, SessionStore};
use tower_sessions_sqlx_store::PostgresStore;

/// Session errors
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    #[error("session store error: {0}")]
    Store(#[from] session_store::Error),
}

/// Durable backing store for sessions
#[derive(Debug, Clone)]
pub enum SessionBackend {
    Memory(MemoryStore),
    Postgres(PostgresStore),
}

impl SessionBackend {
    pub fn memory() -> Self {
        Self::Memory(MemoryStore::default())
    }

    /// Remove every expired record.
    ///
    /// The memory store already ignores expired records on load, so only
    /// PostgreSQL needs purging.
    pub async fn delete_expired(&self) -> Result<(), SessionError> {
        match self {
            Self::Memory(_) => Ok(()),
            Self::Postgres(store) => Ok(store.delete_expired().await?),
        }
    }
}

#[async_trait]
impl SessionStore for SessionBackend {
    async fn create(&self, record: &mut Record) -> session_store::Result<()> {
        match self {
            Self::Memory(store) => store.create(record).await,
            Self::Postgres(store) => store.create(record).await,
        }
    }

    async fn save(&self, record: &Record) -> session_store::Result<()> {
        match self {
            Self::Memory(store) => store.save(record).await,
            Self::Postgres(store) => store.save(record).await,
        }
    }

    async fn load(&self, id: &Id) -> session_store::Result<Option<Record>> {
        match self {
            Self::Memory(store) => store.load(id).await,
            Self::Postgres(store) => store.load(id).await,
        }
    }

    async fn delete(&self, id: &Id) -> session_store::Result<()> {
        match self {
            Self::Memory(store) => store.delete(id).await,
            Self::Postgres(store) => store.delete(id).await,
        }
    }
}
