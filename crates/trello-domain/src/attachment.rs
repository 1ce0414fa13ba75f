use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

pub type AttachmentId = String;

const API_DOWNLOAD_BASE: &str = "https://api.trello.com/1/cards";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrelloAttachment {
    pub id: AttachmentId,
    pub date: Option<DateTime<Utc>>,
    pub name: String,
    pub url: String,
    /// Authenticated download endpoint. Only uploaded files have one.
    pub api_url: Option<String>,
    pub is_upload: bool,
    pub file_name: Option<String>,
    pub downloaded_file_path: Option<PathBuf>,
}

impl TrelloAttachment {
    /// Trello no longer serves uploads from the trello.com url, so downloads
    /// go through the api host instead.
    pub fn download_url(card_id: &str, attachment_id: &str, file_name: &str) -> String {
        format!(
            "{}/{}/attachments/{}/download/{}",
            API_DOWNLOAD_BASE, card_id, attachment_id, file_name
        )
    }

    pub fn is_downloaded(&self) -> bool {
        self.downloaded_file_path.is_some()
    }

    /// Name of the file on disk: `{id}-{file_name}`.
    pub fn local_file_name(&self) -> String {
        let file_name = self.file_name.as_deref().unwrap_or(&self.name);
        format!("{}-{}", self.id, file_name)
    }
}
