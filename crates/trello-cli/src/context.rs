use std::path::{Path, PathBuf};
use std::sync::Arc;
use trello_api::{HtmlTitleFetcher, HttpTrelloApi};
use trello_core::{AppConfig, TrelloResult};
use trello_persistence::TitleCache;
use trello_service::{ExportSession, TitleEnrichmentService};

pub struct CliContext {
    pub config: AppConfig,
}

impl CliContext {
    /// Reads `path` when given, otherwise the per-user config file.
    pub fn load(path: Option<&Path>) -> TrelloResult<Self> {
        let config = match path {
            Some(path) => AppConfig::load_from(path)?,
            None => AppConfig::load(),
        };
        Ok(Self { config })
    }

    pub fn with_output_dir(mut self, dir: Option<PathBuf>) -> Self {
        if dir.is_some() {
            self.config.output_dir = dir;
        }
        self
    }

    pub fn output_dir(&self) -> PathBuf {
        self.config.effective_output_dir()
    }

    /// Connects to Trello and loads the title cache of the output directory.
    pub async fn session(&self) -> TrelloResult<ExportSession> {
        let api = HttpTrelloApi::new(&self.config)?;
        let fetcher = HtmlTitleFetcher::new()?;
        let cache = TitleCache::load(self.config.title_cache_path()).await;
        tracing::debug!(
            "Loaded {} cached titles from {}",
            cache.len(),
            cache.path().display()
        );
        let titles = TitleEnrichmentService::new(cache, Arc::new(fetcher));
        Ok(ExportSession::new(Arc::new(api), titles))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "output_dir = \"/srv/backups\"\n").unwrap();

        let ctx = CliContext::load(Some(&path)).unwrap();
        assert_eq!(ctx.output_dir(), PathBuf::from("/srv/backups"));

        let ctx = ctx.with_output_dir(Some(dir.path().to_path_buf()));
        assert_eq!(ctx.output_dir(), dir.path());
        assert_eq!(ctx.config.attachments_dir(), dir.path().join("attachments"));

        let ctx = ctx.with_output_dir(None);
        assert_eq!(ctx.output_dir(), dir.path());
    }
}
