use crate::store::atomic_writer::AtomicWriter;
use crate::traits::{PersistenceMetadata, PersistenceStore, StoreSnapshot};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use trello_core::{TrelloError, TrelloResult};
use uuid::Uuid;

pub const FORMAT_VERSION: u32 = 1;

/// JSON file-based persistence store
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    instance_id: Uuid,
}

/// On-disk layout: `{version, metadata, data}`
#[derive(Debug, Serialize, Deserialize)]
struct JsonEnvelope {
    version: u32,
    metadata: PersistenceMetadata,
    data: serde_json::Value,
}

impl JsonFileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            instance_id: Uuid::new_v4(),
        }
    }

    pub fn instance_id(&self) -> Uuid {
        self.instance_id
    }
}

#[async_trait::async_trait]
impl PersistenceStore for JsonFileStore {
    async fn save(&self, data: serde_json::Value) -> TrelloResult<PersistenceMetadata> {
        let envelope = JsonEnvelope {
            version: FORMAT_VERSION,
            metadata: PersistenceMetadata::new(FORMAT_VERSION, self.instance_id),
            data,
        };

        let json_bytes = serde_json::to_vec_pretty(&envelope)
            .map_err(|e| TrelloError::Serialization(e.to_string()))?;

        AtomicWriter::write_atomic(&self.path, &json_bytes).await?;

        tracing::info!(
            "Saved {} bytes to {}",
            json_bytes.len(),
            self.path.display()
        );

        Ok(envelope.metadata)
    }

    async fn load(&self) -> TrelloResult<Option<StoreSnapshot>> {
        let Some(file_bytes) = AtomicWriter::read_optional(&self.path).await? else {
            return Ok(None);
        };
        if file_bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        let envelope: JsonEnvelope = serde_json::from_slice(&file_bytes)
            .map_err(|e| TrelloError::Serialization(e.to_string()))?;

        if envelope.version != FORMAT_VERSION {
            return Err(TrelloError::Serialization(format!(
                "Unsupported format version: {}",
                envelope.version
            )));
        }

        tracing::info!(
            "Loaded {} bytes from {}",
            file_bytes.len(),
            self.path.display()
        );

        Ok(Some(StoreSnapshot {
            data: envelope.data,
            metadata: envelope.metadata,
        }))
    }

    async fn exists(&self) -> bool {
        tokio::fs::try_exists(&self.path).await.unwrap_or(false)
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("store.json"));

        let metadata = store.save(json!({"k": "v"})).await.unwrap();
        assert_eq!(metadata.format_version, FORMAT_VERSION);
        assert_eq!(metadata.instance_id, store.instance_id());
        assert!(store.exists().await);

        let snapshot = store.load().await.unwrap().unwrap();
        assert_eq!(snapshot.data, json!({"k": "v"}));
        assert_eq!(snapshot.metadata.instance_id, store.instance_id());
    }

    #[tokio::test]
    async fn test_envelope_layout() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");
        JsonFileStore::new(&path).save(json!({})).await.unwrap();

        let raw: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(raw["version"], 1);
        assert!(raw["metadata"]["saved_at"].is_string());
        assert!(raw["data"].is_object());
    }

    #[tokio::test]
    async fn test_load_missing_and_empty() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("missing.json"));
        assert!(store.load().await.unwrap().is_none());
        assert!(!store.exists().await);

        let empty = dir.path().join("empty.json");
        std::fs::write(&empty, "  \n").unwrap();
        assert!(JsonFileStore::new(&empty).load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_load_rejects_unknown_version() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(
            &path,
            r#"{"version": 9, "metadata": {"format_version": 9, "instance_id": "00000000-0000-0000-0000-000000000000", "saved_at": "2024-01-01T00:00:00Z"}, "data": {}}"#,
        )
        .unwrap();

        let err = JsonFileStore::new(&path).load().await.unwrap_err();
        assert!(err.to_string().contains("Unsupported format version: 9"));
    }
}
