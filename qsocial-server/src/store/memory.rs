//! In-process store

use async_trait::async_trait;
use qsocial_core::Message;
use tokio::sync::RwLock;

use super::{sort_newest_first, MessageStore, StoreError};

/// Vec behind a lock. Lost on exit.
#[derive(Default)]
pub struct MemoryStore {
    messages: RwLock<Vec<Message>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessageStore for MemoryStore {
    fn kind(&self) -> &'static str {
        "memory"
    }

    async fn insert(&self, message: &Message) -> Result<(), StoreError> {
        self.messages.write().await.push(message.clone());
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Message>, StoreError> {
        let mut snapshot = self.messages.read().await.clone();
        sort_newest_first(&mut snapshot);
        Ok(snapshot)
    }
}
