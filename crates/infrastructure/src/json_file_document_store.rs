use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use rolecast_application::DocumentStore;
use rolecast_core::{AppError, AppResult};
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::debug;

use crate::document_path::{read_at, remove_at, segments, write_at};

/// Document store backed by one JSON file.
///
/// Every write rewrites the whole file through a sibling temp file and a
/// rename. A missing file reads as an absent document, and deleting the root
/// path removes the file.
#[derive(Debug)]
pub struct JsonFileDocumentStore {
    file_path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileDocumentStore {
    /// Creates a store for the given file. The file is created on first write.
    #[must_use]
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn file_path(&self) -> &Path {
        self.file_path.as_path()
    }

    async fn read_document(&self) -> AppResult<Option<Value>> {
        let bytes = match tokio::fs::read(&self.file_path).await {
            Ok(bytes) => bytes,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
            Err(error) => {
                return Err(AppError::Internal(format!(
                    "failed to read document '{}': {error}",
                    self.file_path.display()
                )));
            }
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Some(Value::Object(serde_json::Map::new())));
        }

        serde_json::from_slice(&bytes).map(Some).map_err(|error| {
            AppError::Internal(format!(
                "failed to parse document '{}': {error}",
                self.file_path.display()
            ))
        })
    }

    async fn write_document(&self, document: &Value) -> AppResult<()> {
        if let Some(parent) = self.file_path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|error| {
                AppError::Internal(format!(
                    "failed to create directory '{}': {error}",
                    parent.display()
                ))
            })?;
        }

        let bytes = serde_json::to_vec_pretty(document).map_err(|error| {
            AppError::Internal(format!("failed to encode document: {error}"))
        })?;

        let temp_path = self.file_path.with_extension("json.tmp");
        tokio::fs::write(&temp_path, bytes).await.map_err(|error| {
            AppError::Internal(format!(
                "failed to write document '{}': {error}",
                temp_path.display()
            ))
        })?;
        tokio::fs::rename(&temp_path, &self.file_path)
            .await
            .map_err(|error| {
                AppError::Internal(format!(
                    "failed to replace document '{}': {error}",
                    self.file_path.display()
                ))
            })
    }

    async fn remove_file(&self) -> AppResult<()> {
        match tokio::fs::remove_file(&self.file_path).await {
            Ok(()) => {
                debug!(path = %self.file_path.display(), "removed document file");
                Ok(())
            }
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(error) => Err(AppError::Internal(format!(
                "failed to remove document '{}': {error}",
                self.file_path.display()
            ))),
        }
    }
}

#[async_trait]
impl DocumentStore for JsonFileDocumentStore {
    async fn get_data(&self, path: &str) -> AppResult<Option<Value>> {
        let Some(document) = self.read_document().await? else {
            return Ok(None);
        };

        Ok(read_at(&document, segments(path).as_slice()))
    }

    async fn push(&self, path: &str, value: Value) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;

        let mut document = self.read_document().await?;
        write_at(&mut document, segments(path).as_slice(), value);

        match document {
            Some(document) => self.write_document(&document).await,
            None => Ok(()),
        }
    }

    async fn delete(&self, path: &str) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;

        let segments = segments(path);
        if segments.is_empty() {
            return self.remove_file().await;
        }

        let mut document = self.read_document().await?;
        if !remove_at(&mut document, segments.as_slice()) {
            return Ok(());
        }

        match document {
            Some(document) => self.write_document(&document).await,
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use rolecast_application::DocumentStore;
    use serde_json::json;

    use super::JsonFileDocumentStore;

    fn store_in(dir: &tempfile::TempDir) -> JsonFileDocumentStore {
        JsonFileDocumentStore::new(dir.path().join("roles").join("custom-roles.json"))
    }

    #[tokio::test]
    async fn missing_file_reads_as_absent_document() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("temp dir must be creatable");
        };
        let store = store_in(&dir);

        let root = store.get_data("/").await;
        assert!(matches!(root, Ok(None)));
    }

    #[tokio::test]
    async fn push_persists_across_store_instances() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("temp dir must be creatable");
        };
        let store = store_in(&dir);

        let pushed = store
            .push("/r1", json!({"id": "r1", "name": "Regulars", "viewers": []}))
            .await;
        assert!(pushed.is_ok());

        let reopened = store_in(&dir);
        let role = reopened.get_data("/r1").await.ok().flatten();
        assert_eq!(role.map(|role| role["name"].clone()), Some(json!("Regulars")));
    }

    #[tokio::test]
    async fn root_listing_preserves_insertion_order() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("temp dir must be creatable");
        };
        let store = store_in(&dir);
        for id in ["zeta", "alpha", "mid"] {
            let pushed = store.push(format!("/{id}").as_str(), json!({"id": id})).await;
            assert!(pushed.is_ok());
        }

        let root = store.get_data("/").await.ok().flatten().unwrap_or_default();
        let keys: Vec<String> = root
            .as_object()
            .map(|object| object.keys().cloned().collect())
            .unwrap_or_default();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[tokio::test]
    async fn delete_entry_and_root() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("temp dir must be creatable");
        };
        let store = store_in(&dir);
        assert!(store.push("/r1", json!({"id": "r1"})).await.is_ok());
        assert!(store.push("/r2", json!({"id": "r2"})).await.is_ok());

        assert!(store.delete("/r1").await.is_ok());
        assert!(matches!(store.get_data("/r1").await, Ok(None)));
        assert!(matches!(store.get_data("/r2").await, Ok(Some(_))));

        assert!(store.delete("/").await.is_ok());
        assert!(!store.file_path().exists());
        assert!(matches!(store.get_data("/").await, Ok(None)));
        assert!(store.delete("/").await.is_ok());
    }

    #[tokio::test]
    async fn corrupt_file_is_reported_as_error() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("temp dir must be creatable");
        };
        let store = store_in(&dir);
        assert!(store.push("/r1", json!({"id": "r1"})).await.is_ok());
        assert!(tokio::fs::write(store.file_path(), b"{not json").await.is_ok());

        assert!(store.get_data("/").await.is_err());
        assert!(store.push("/r2", json!({})).await.is_err());
    }
}
