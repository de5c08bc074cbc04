//! SQLite-backed store for the local deployment

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use qsocial_core::Message;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use sqlx::FromRow;
use uuid::Uuid;

use super::{MessageStore, StoreError};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS messages (
    id TEXT PRIMARY KEY,
    content TEXT NOT NULL,
    created_at INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_messages_created_at
    ON messages(created_at DESC);
"#;

#[derive(Debug, FromRow)]
struct MessageRow {
    id: String,
    content: String,
    created_at: i64,
}

impl TryFrom<MessageRow> for Message {
    type Error = StoreError;

    fn try_from(row: MessageRow) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&row.id).map_err(|e| StoreError::Corrupt {
            id: row.id.clone(),
            reason: e.to_string(),
        })?;

        Ok(Message {
            id,
            content: row.content,
            created_at: row.created_at,
        })
    }
}

/// SQLite message store
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (creating if missing) the database at `url`, e.g. `sqlite://data/messages.db`.
    pub async fn open(url: &str) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5));

        let filename = options.get_filename();
        if filename != std::path::Path::new(":memory:") {
            if let Some(parent) = filename.parent().filter(|p| !p.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        Self::with_pool(pool).await
    }

    /// Throwaway in-memory database on a single connection, for tests.
    pub async fn in_memory() -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        Self::with_pool(pool).await
    }

    async fn with_pool(pool: SqlitePool) -> Result<Self, StoreError> {
        sqlx::raw_sql(SCHEMA).execute(&pool).await?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl MessageStore for SqliteStore {
    fn kind(&self) -> &'static str {
        "sqlite"
    }

    async fn insert(&self, message: &Message) -> Result<(), StoreError> {
        sqlx::query("INSERT INTO messages (id, content, created_at) VALUES (?, ?, ?)")
            .bind(message.id.to_string())
            .bind(&message.content)
            .bind(message.created_at)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Message>, StoreError> {
        let rows: Vec<MessageRow> = sqlx::query_as(
            "SELECT id, content, created_at FROM messages ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Message::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qsocial_core::MessageContent;

    fn msg(text: &str, at: i64) -> Message {
        Message::new(MessageContent::new(text).unwrap(), at)
    }

    #[tokio::test]
    async fn round_trips_messages() {
        let store = SqliteStore::in_memory().await.unwrap();
        let original = msg("hello", 1_700_000_000_000);
        store.insert(&original).await.unwrap();

        let listed = store.list_all().await.unwrap();
        assert_eq!(listed, vec![original]);
    }

    #[tokio::test]
    async fn orders_by_created_at_desc() {
        let store = SqliteStore::in_memory().await.unwrap();
        for (text, at) in [("t1", 1), ("t3", 3), ("t2", 2)] {
            store.insert(&msg(text, at)).await.unwrap();
        }

        let contents: Vec<_> = store
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.content)
            .collect();
        assert_eq!(contents, vec!["t3", "t2", "t1"]);
    }

    #[tokio::test]
    async fn duplicate_id_is_a_store_error() {
        let store = SqliteStore::in_memory().await.unwrap();
        let message = msg("once", 1);
        store.insert(&message).await.unwrap();

        let err = store.insert(&message).await.unwrap_err();
        assert!(matches!(err, StoreError::Sqlx(_)));
        assert_eq!(store.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}", dir.path().join("messages.db").display());

        let message = msg("persisted", 42);
        {
            let store = SqliteStore::open(&url).await.unwrap();
            store.insert(&message).await.unwrap();
        }

        let reopened = SqliteStore::open(&url).await.unwrap();
        assert_eq!(reopened.list_all().await.unwrap(), vec![message]);
    }
}
