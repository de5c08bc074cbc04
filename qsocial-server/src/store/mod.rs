//! Message storage
//!
//! The store is append-only: insert and full scan, nothing else.
//!
//! # Implementations
//!
//! - [`SqliteStore`]: local process, single file
//! - [`PgStore`]: hosted deployment, managed Postgres
//! - [`MemoryStore`]: tests and throwaway demos
//!
//! All of them return `list_all` newest first. Rows sharing a `created_at`
//! come back in whatever order the backend produces.

pub mod memory;
pub mod postgres;
pub mod sqlite;

use std::sync::Arc;

use async_trait::async_trait;
use qsocial_core::Message;

pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use sqlite::SqliteStore;

/// Storage error type
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("corrupt record '{id}': {reason}")]
    Corrupt { id: String, reason: String },

    #[error("unsupported store url '{0}' (expected sqlite:, postgres: or memory:)")]
    UnsupportedUrl(String),
}

/// Durable, append-only message collection
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Short backend name for logs
    fn kind(&self) -> &'static str;

    /// Persist one message. Either the whole record is written or an error is returned.
    async fn insert(&self, message: &Message) -> Result<(), StoreError>;

    /// Every message, `created_at` descending.
    async fn list_all(&self) -> Result<Vec<Message>, StoreError>;
}

/// Open the store named by `url`.
///
/// - `sqlite://path/to/file.db` (or `sqlite::memory:`)
/// - `postgres://...` / `postgresql://...`
/// - `memory:`
pub async fn open_store(url: &str) -> Result<Arc<dyn MessageStore>, StoreError> {
    let store: Arc<dyn MessageStore> = if url.starts_with("memory:") {
        Arc::new(MemoryStore::new())
    } else if url.starts_with("sqlite:") {
        Arc::new(SqliteStore::open(url).await?)
    } else if url.starts_with("postgres://") || url.starts_with("postgresql://") {
        Arc::new(PgStore::connect(url).await?)
    } else {
        return Err(StoreError::UnsupportedUrl(url.to_string()));
    };

    tracing::info!(kind = store.kind(), "message store ready");
    Ok(store)
}

/// Sort newest first. `sort_by` is stable, so ties keep insertion order within one call.
pub(crate) fn sort_newest_first(messages: &mut [Message]) {
    messages.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn open_memory_store() {
        let store = open_store("memory:").await.unwrap();
        assert_eq!(store.kind(), "memory");
    }

    #[tokio::test]
    async fn open_rejects_unknown_scheme() {
        let err = open_store("redis://localhost").await.err().unwrap();
        assert!(matches!(err, StoreError::UnsupportedUrl(_)));
    }

    #[tokio::test]
    async fn open_sqlite_in_tempdir() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}", dir.path().join("nested/messages.db").display());
        let store = open_store(&url).await.unwrap();
        assert_eq!(store.kind(), "sqlite");
        assert!(dir.path().join("nested/messages.db").exists());
    }
}
