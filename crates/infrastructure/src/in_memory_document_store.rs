use async_trait::async_trait;
use rolecast_application::DocumentStore;
use rolecast_core::AppResult;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::document_path::{read_at, remove_at, segments, write_at};

/// In-memory document store for tests and ephemeral profiles.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    document: RwLock<Option<Value>>,
}

impl InMemoryDocumentStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn get_data(&self, path: &str) -> AppResult<Option<Value>> {
        Ok(self
            .document
            .read()
            .await
            .as_ref()
            .and_then(|document| read_at(document, segments(path).as_slice())))
    }

    async fn push(&self, path: &str, value: Value) -> AppResult<()> {
        write_at(
            &mut *self.document.write().await,
            segments(path).as_slice(),
            value,
        );
        Ok(())
    }

    async fn delete(&self, path: &str) -> AppResult<()> {
        remove_at(&mut *self.document.write().await, segments(path).as_slice());
        Ok(())
    }
}
