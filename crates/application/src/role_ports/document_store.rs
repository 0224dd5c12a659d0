use async_trait::async_trait;
use serde_json::Value;

use rolecast_core::AppResult;

/// Port for a path-addressed JSON document.
///
/// Paths are `/`-separated and `/` addresses the document root. Deleting the
/// root removes the whole document, after which reading the root yields
/// `None`.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Reads the value at `path`, or `None` when nothing is stored there.
    async fn get_data(&self, path: &str) -> AppResult<Option<Value>>;

    /// Writes `value` at `path`, replacing any existing value.
    async fn push(&self, path: &str, value: Value) -> AppResult<()>;

    /// Removes the value at `path`. Removing a missing path succeeds.
    async fn delete(&self, path: &str) -> AppResult<()>;
}
