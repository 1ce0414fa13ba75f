//! Checklist item title enrichment.
//!
//! Items whose text contains a url get the url and the title of the page it
//! points at. Titles come from the title cache when possible and are fetched
//! otherwise.

use regex::Regex;
use serde::Serialize;
use std::sync::{Arc, LazyLock};
use trello_core::TrelloResult;
use trello_domain::{TitleFetcher, TrelloBoard, TrelloChecklistItem};
use trello_persistence::TitleCache;

static URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://\S+").expect("valid url regex"));
static CONTROL_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\n\t\r]+").expect("valid whitespace regex"));
static REPEATED_SPACES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" {2,}").expect("valid space regex"));

const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?'];

/// Counters of one enrichment walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EnrichmentStats {
    pub items_with_url: usize,
    pub cache_hits: usize,
    pub fetched: usize,
    /// Items that ended up with the url as their title.
    pub fallbacks: usize,
    /// Cached titles rewritten in normalized form.
    pub healed: usize,
}

pub struct TitleEnrichmentService {
    cache: TitleCache,
    fetcher: Arc<dyn TitleFetcher>,
}

impl TitleEnrichmentService {
    pub fn new(cache: TitleCache, fetcher: Arc<dyn TitleFetcher>) -> Self {
        Self { cache, fetcher }
    }

    pub fn cache(&self) -> &TitleCache {
        &self.cache
    }

    /// Sets `url` and `url_title` on every checklist item of the board that
    /// contains a url, then saves the cache once.
    ///
    /// A failed cache save is logged and does not fail the walk.
    pub async fn enrich(&mut self, board: &mut TrelloBoard) -> EnrichmentStats {
        let mut stats = EnrichmentStats::default();
        for list in &mut board.lists {
            for card in &mut list.cards {
                for checklist in &mut card.checklists {
                    for item in &mut checklist.items {
                        self.enrich_item(item, &mut stats).await;
                    }
                }
            }
        }

        if let Err(e) = self.cache.save().await {
            tracing::warn!(
                "Failed to save title cache to {}: {}",
                self.cache.path().display(),
                e
            );
        }

        tracing::info!(
            board = %board.name,
            items = stats.items_with_url,
            cache_hits = stats.cache_hits,
            fetched = stats.fetched,
            fallbacks = stats.fallbacks,
            "enriched checklist item titles"
        );
        stats
    }

    async fn enrich_item(&mut self, item: &mut TrelloChecklistItem, stats: &mut EnrichmentStats) {
        let Some(url) = extract_url(&item.value) else {
            return;
        };
        stats.items_with_url += 1;

        let cached = self
            .cache
            .get(&url)
            .map(|raw| (normalize_title(raw), raw.to_string()))
            .filter(|(normalized, _)| !normalized.is_empty());

        let title = match cached {
            Some((normalized, raw)) => {
                stats.cache_hits += 1;
                if normalized != raw {
                    stats.healed += 1;
                    self.cache.put(url.clone(), normalized.clone());
                }
                Some(normalized)
            }
            None => match self.fetch(&url).await.map(|t| normalize_title(&t)) {
                Some(title) if !title.is_empty() => {
                    stats.fetched += 1;
                    self.cache.put(url.clone(), title.clone());
                    Some(title)
                }
                _ => None,
            },
        };

        let title = match title {
            Some(title) => title,
            None => {
                stats.fallbacks += 1;
                url.clone()
            }
        };
        item.set_url_title(url, title);
    }

    async fn fetch(&self, url: &str) -> Option<String> {
        tracing::debug!("Getting webpage title for URL: {}", url);
        let result: TrelloResult<Option<String>> = self.fetcher.fetch_title(url).await;
        match result {
            Ok(title) => title,
            Err(e) => {
                tracing::warn!("Failed to get page title from URL {}: {}", url, e);
                None
            }
        }
    }
}

/// First http(s) url in `text`: the whitespace-delimited run starting at the
/// scheme, without trailing sentence punctuation or an unbalanced `)`.
pub fn extract_url(text: &str) -> Option<String> {
    URL_PATTERN
        .find(text)
        .map(|m| trim_url_tail(m.as_str()))
        .filter(|url| !url.is_empty())
        .map(str::to_string)
}

fn trim_url_tail(mut url: &str) -> &str {
    loop {
        let mut trimmed = url.trim_end_matches(TRAILING_PUNCTUATION);
        if trimmed.ends_with(')') && trimmed.matches(')').count() > trimmed.matches('(').count() {
            trimmed = &trimmed[..trimmed.len() - 1];
        }
        if trimmed.len() == url.len() {
            return url;
        }
        url = trimmed;
    }
}

/// Collapses line breaks, tabs and space runs into single spaces and trims.
pub fn normalize_title(title: &str) -> String {
    let title = CONTROL_WHITESPACE.replace_all(title, " ");
    let title = REPEATED_SPACES.replace_all(&title, " ");
    title.trim().to_string()
}
