use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use trello_core::TrelloResult;
use uuid::Uuid;

/// Metadata for persistence operations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistenceMetadata {
    /// Version of the persistence format
    pub format_version: u32,
    /// ID of the instance that performed the save
    pub instance_id: Uuid,
    /// When this data was saved
    pub saved_at: DateTime<Utc>,
}

impl PersistenceMetadata {
    pub fn new(format_version: u32, instance_id: Uuid) -> Self {
        Self {
            format_version,
            instance_id,
            saved_at: Utc::now(),
        }
    }
}

/// Point-in-time snapshot of the data held by a store
#[derive(Debug, Clone)]
pub struct StoreSnapshot {
    pub data: serde_json::Value,
    pub metadata: PersistenceMetadata,
}

/// Whole-document storage: every save replaces the previous content.
#[async_trait]
pub trait PersistenceStore: Send + Sync {
    async fn save(&self, data: serde_json::Value) -> TrelloResult<PersistenceMetadata>;

    /// `Ok(None)` when nothing has been saved yet.
    async fn load(&self) -> TrelloResult<Option<StoreSnapshot>>;

    async fn exists(&self) -> bool;

    fn path(&self) -> &Path;
}
