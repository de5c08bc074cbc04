//! Postgres-backed store for the hosted deployment
//!
//! Uses a sqlx PgPool with explicit connection limits. The pool is the only
//! shared handle; concurrent inserts rely on Postgres' own transaction guarantees.

use async_trait::async_trait;
use qsocial_core::Message;
use sqlx::postgres::PgPoolOptions;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::{MessageStore, StoreError};

/// Default maximum connections for the pool.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, FromRow)]
struct MessageRow {
    id: Uuid,
    content: String,
    created_at: i64,
}

impl From<MessageRow> for Message {
    fn from(row: MessageRow) -> Self {
        Message {
            id: row.id,
            content: row.content,
            created_at: row.created_at,
        }
    }
}

/// Create a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    create_pool_with_options(database_url, DEFAULT_MAX_CONNECTIONS).await
}

/// Create a PostgreSQL connection pool with custom options.
pub async fn create_pool_with_options(
    database_url: &str,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Postgres message store
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Connect and make sure the table exists.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = create_pool(database_url).await?;
        Self::from_pool(pool).await
    }

    /// Wrap an existing pool.
    pub async fn from_pool(pool: PgPool) -> Result<Self, StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS messages (
                id UUID PRIMARY KEY,
                content TEXT NOT NULL,
                created_at BIGINT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_messages_created_at ON messages (created_at DESC)",
        )
        .execute(&pool)
        .await?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl MessageStore for PgStore {
    fn kind(&self) -> &'static str {
        "postgres"
    }

    async fn insert(&self, message: &Message) -> Result<(), StoreError> {
        sqlx::query("INSERT INTO messages (id, content, created_at) VALUES ($1, $2, $3)")
            .bind(message.id)
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

        Ok(rows.into_iter().map(Message::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qsocial_core::MessageContent;

    // Integration tests require a real database
    // Run with: DATABASE_URL=postgres://... cargo test -p qsocial-server -- --ignored

    #[tokio::test]
    #[ignore = "requires database"]
    async fn insert_then_list() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let store = PgStore::connect(&url).await.expect("connect failed");

        let message = Message::new(MessageContent::new("from postgres").unwrap(), i64::MAX - 1);
        store.insert(&message).await.expect("insert failed");

        let listed = store.list_all().await.expect("list failed");
        assert_eq!(listed.first(), Some(&message));
    }
}
