//! Trello REST client.

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use trello_core::{AppConfig, TrelloError, TrelloResult};
use trello_domain::{TrelloApi, TrelloBoard};

pub const DEFAULT_BASE_URL: &str = "https://api.trello.com";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

const BOARD_DETAIL_PARAMS: &[(&str, &str)] = &[
    ("fields", "all"),
    ("actions", "all"),
    ("action_fields", "all"),
    ("actions_limit", "1000"),
    ("cards", "all"),
    ("card_fields", "all"),
    ("card_attachments", "true"),
    ("labels", "all"),
    ("lists", "all"),
    ("list_fields", "all"),
    ("members", "all"),
    ("member_fields", "all"),
    ("checklists", "all"),
    ("checklist_fields", "all"),
    ("organization", "false"),
];

#[derive(Debug, Deserialize)]
struct BoardRef {
    id: String,
    name: String,
}

/// Position of an attachment inside the board plus where it goes.
struct DownloadJob {
    list: usize,
    card: usize,
    attachment: usize,
    url: String,
    dest: PathBuf,
}

pub struct HttpTrelloApi {
    client: Client,
    base_url: String,
    api_key: String,
    token: String,
    organization_id: Option<String>,
    attachments_dir: PathBuf,
    download_concurrency: usize,
}

impl HttpTrelloApi {
    pub fn new(config: &AppConfig) -> TrelloResult<Self> {
        let (api_key, token) = config.credentials()?;
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(http_error)?;
        Ok(Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.to_string(),
            token: token.to_string(),
            organization_id: config.organization_id.clone().filter(|id| !id.is_empty()),
            attachments_dir: config.attachments_dir(),
            download_concurrency: config.effective_download_concurrency(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}/1/{}", self.base_url, path)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("Accept", "application/json")
            .query(&[("key", self.api_key.as_str()), ("token", self.token.as_str())])
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> TrelloResult<T> {
        let url = self.url(path);
        tracing::debug!(url = %url, "GET");
        let response = self
            .authorized(self.client.get(&url))
            .query(params)
            .send()
            .await
            .map_err(http_error)?;
        let response = check_status(response, &url)?;
        response.json::<T>().await.map_err(|e| {
            TrelloError::Parse(format!("invalid JSON from {}: {}", redact(&url), e))
        })
    }

    /// Download urls point at the public api host; keep them on ours.
    fn rebase(&self, api_url: &str) -> String {
        match api_url.strip_prefix(DEFAULT_BASE_URL) {
            Some(rest) => format!("{}{}", self.base_url, rest),
            None => api_url.to_string(),
        }
    }

    fn oauth_header(&self) -> String {
        format!(
            "OAuth oauth_consumer_key=\"{}\", oauth_token=\"{}\"",
            self.api_key, self.token
        )
    }

    fn download_jobs(&self, board: &TrelloBoard) -> Vec<DownloadJob> {
        let mut jobs = Vec::new();
        for (l, list) in board.lists.iter().enumerate() {
            for (c, card) in list.cards.iter().enumerate() {
                for (a, attachment) in card.attachments.iter().enumerate() {
                    let Some(api_url) = &attachment.api_url else {
                        continue;
                    };
                    jobs.push(DownloadJob {
                        list: l,
                        card: c,
                        attachment: a,
                        url: self.rebase(api_url),
                        dest: self
                            .attachments_dir
                            .join(sanitize_file_name(&attachment.local_file_name())),
                    });
                }
            }
        }
        jobs
    }

    async fn download_one(&self, url: &str, dest: &Path) -> TrelloResult<()> {
        tracing::debug!(url = %url, dest = %dest.display(), "downloading attachment");
        let response = self
            .client
            .get(url)
            .header("Authorization", self.oauth_header())
            .send()
            .await
            .map_err(http_error)?;
        let response = check_status(response, url)?;
        let bytes = response.bytes().await.map_err(http_error)?;
        tokio::fs::write(dest, &bytes).await?;
        Ok(())
    }
}

#[async_trait]
impl TrelloApi for HttpTrelloApi {
    async fn list_boards(&self) -> TrelloResult<BTreeMap<String, String>> {
        let path = match &self.organization_id {
            Some(org) => format!("organizations/{}/boards", org),
            None => "members/me/boards".to_string(),
        };
        let boards: Vec<BoardRef> = self.get_json(&path, &[("fields", "id,name")]).await?;
        Ok(boards.into_iter().map(|b| (b.name, b.id)).collect())
    }

    async fn get_board_id(&self, board_name: &str) -> TrelloResult<String> {
        let boards = self.list_boards().await?;
        tracing::debug!("Available boards: {:?}", boards.keys().collect::<Vec<_>>());
        boards
            .get(board_name)
            .cloned()
            .ok_or_else(|| TrelloError::BoardNotFound {
                name: board_name.to_string(),
                known: boards.keys().cloned().collect(),
            })
    }

    async fn get_board_details(&self, board_id: &str) -> TrelloResult<Value> {
        self.get_json(&format!("boards/{}", board_id), BOARD_DETAIL_PARAMS)
            .await
    }

    async fn get_actions_for_card(&self, card_id: &str) -> TrelloResult<Vec<Value>> {
        self.get_json(&format!("cards/{}/actions", card_id), &[])
            .await
    }

    async fn delete_card(&self, card_id: &str) -> TrelloResult<()> {
        let url = self.url(&format!("cards/{}", card_id));
        let response = self
            .authorized(self.client.delete(&url))
            .send()
            .await
            .map_err(http_error)?;
        check_status(response, &url)?;
        tracing::info!("Deleted card {}", card_id);
        Ok(())
    }

    async fn download_attachments(&self, board: &mut TrelloBoard) -> TrelloResult<()> {
        let jobs = self.download_jobs(board);
        if jobs.is_empty() {
            return Ok(());
        }
        tokio::fs::create_dir_all(&self.attachments_dir).await?;
        tracing::info!(
            "Downloading {} attachments to {}",
            jobs.len(),
            self.attachments_dir.display()
        );

        let results: Vec<(DownloadJob, TrelloResult<()>)> = stream::iter(jobs)
            .map(|job| async move {
                let result = self.download_one(&job.url, &job.dest).await;
                (job, result)
            })
            .buffer_unordered(self.download_concurrency)
            .collect()
            .await;

        let mut first_error = None;
        for (job, result) in results {
            match result {
                Ok(()) => {
                    let attachment =
                        &mut board.lists[job.list].cards[job.card].attachments[job.attachment];
                    attachment.downloaded_file_path = Some(job.dest);
                }
                Err(e) => {
                    tracing::error!(url = %redact(&job.url), "attachment download failed: {}", e);
                    first_error.get_or_insert(e);
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

fn http_error(e: reqwest::Error) -> TrelloError {
    TrelloError::Http(e.without_url().to_string())
}

fn check_status(response: reqwest::Response, url: &str) -> TrelloResult<reqwest::Response> {
    match response.status() {
        status if status.is_success() => Ok(response),
        StatusCode::NOT_FOUND => Err(TrelloError::NotFound(redact(url))),
        status => Err(TrelloError::Http(format!("{} returned {}", redact(url), status))),
    }
}

/// Drops the query string, which carries the credentials.
fn redact(url: &str) -> String {
    url.split('?').next().unwrap_or(url).to_string()
}

/// Keeps a file name inside the attachments directory.
fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "attachment".to_string()
    } else {
        cleaned.to_string()
    }
}
