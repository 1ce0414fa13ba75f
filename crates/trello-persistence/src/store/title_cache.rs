//! Webpage title cache.
//!
//! Maps a url to the title of the page it points at. The whole mapping is
//! loaded at startup and written back in one piece. There is no eviction.

use std::collections::BTreeMap;
use std::path::Path;
use trello_core::{TrelloError, TrelloResult};

use crate::store::json_file_store::JsonFileStore;
use crate::traits::PersistenceStore;

#[derive(Debug, Clone)]
pub struct TitleCache {
    store: JsonFileStore,
    titles: BTreeMap<String, String>,
}

impl TitleCache {
    /// Empty cache backed by `path`. Nothing is read.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            store: JsonFileStore::new(path),
            titles: BTreeMap::new(),
        }
    }

    /// Reads the cache at `path`.
    ///
    /// Never fails: a missing, empty or unreadable file gives an empty cache.
    pub async fn load(path: impl AsRef<Path>) -> Self {
        let mut cache = Self::new(path);
        match cache.read().await {
            Ok(titles) => {
                tracing::debug!(
                    "Loaded {} cached titles from {}",
                    titles.len(),
                    cache.path().display()
                );
                cache.titles = titles;
            }
            Err(e) => {
                tracing::warn!(
                    "Ignoring unreadable title cache at {}: {}",
                    cache.path().display(),
                    e
                );
            }
        }
        cache
    }

    async fn read(&self) -> TrelloResult<BTreeMap<String, String>> {
        match self.store.load().await? {
            Some(snapshot) => serde_json::from_value(snapshot.data)
                .map_err(|e| TrelloError::Serialization(e.to_string())),
            None => Ok(BTreeMap::new()),
        }
    }

    /// Writes the whole mapping, creating the parent directory.
    pub async fn save(&self) -> TrelloResult<()> {
        let data = serde_json::to_value(&self.titles)
            .map_err(|e| TrelloError::Serialization(e.to_string()))?;
        self.store.save(data).await?;
        Ok(())
    }

    pub fn get(&self, url: &str) -> Option<&str> {
        self.titles.get(url).map(String::as_str)
    }

    /// Last write wins.
    pub fn put(&mut self, url: impl Into<String>, title: impl Into<String>) {
        let url = url.into();
        let title = title.into();
        if let Some(previous) = self.titles.get(&url) {
            if *previous != title {
                tracing::debug!(
                    url = %url,
                    old = %previous,
                    new = %title,
                    "overwriting cached title"
                );
            }
        }
        self.titles.insert(url, title);
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    pub fn path(&self) -> &Path {
        self.store.path()
    }
}
