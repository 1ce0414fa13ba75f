//! Webpage title lookup.

use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use std::time::Duration;
use trello_core::{TrelloError, TrelloResult};
use trello_domain::TitleFetcher;

const FETCH_TIMEOUT: Duration = Duration::from_secs(20);
const USER_AGENT: &str = concat!("trello-backup/", env!("CARGO_PKG_VERSION"));

pub struct HtmlTitleFetcher {
    client: Client,
}

impl HtmlTitleFetcher {
    pub fn new() -> TrelloResult<Self> {
        let client = Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| TrelloError::Http(e.to_string()))?;
        Ok(Self { client })
    }

    /// Title of the page, or the url itself when it has none or cannot be fetched.
    pub async fn get_title_from_url(&self, url: &str) -> String {
        match self.fetch_title(url).await {
            Ok(Some(title)) => title,
            Ok(None) => url.to_string(),
            Err(e) => {
                tracing::warn!("Failed to get page title from URL {}: {}", url, e);
                url.to_string()
            }
        }
    }
}

#[async_trait]
impl TitleFetcher for HtmlTitleFetcher {
    async fn fetch_title(&self, url: &str) -> TrelloResult<Option<String>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| TrelloError::Http(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            tracing::debug!("{} returned {}, parsing body anyway", url, status);
        }
        let body = response
            .text()
            .await
            .map_err(|e| TrelloError::Http(e.to_string()))?;

        let title = extract_title(&body);
        match &title {
            Some(title) => tracing::debug!("Found webpage title: {}", title),
            None => tracing::debug!("No title in page at {}", url),
        }
        Ok(title)
    }
}

/// Text of the first `<title>` element, if it has any non-blank text.
pub fn extract_title(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("title").ok()?;
    let title: String = document.select(&selector).next()?.text().collect();
    let title = title.trim();
    (!title.is_empty()).then(|| title.to_string())
}
