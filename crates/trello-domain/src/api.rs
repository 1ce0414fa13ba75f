//! Collaborator boundaries of the export pipeline.
//!
//! The pipeline talks to Trello and to the web only through these traits, so
//! the HTTP implementations can be swapped for mocks in tests.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use trello_core::TrelloResult;

use crate::board::TrelloBoard;

#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait TrelloApi: Send + Sync {
    /// Board name to board id for every board visible to the account.
    async fn list_boards(&self) -> TrelloResult<BTreeMap<String, String>>;

    /// Fails with `BoardNotFound` naming the known boards.
    async fn get_board_id(&self, board_name: &str) -> TrelloResult<String>;

    async fn get_board_details(&self, board_id: &str) -> TrelloResult<Value>;

    /// All actions recorded for a card, in API order.
    async fn get_actions_for_card(&self, card_id: &str) -> TrelloResult<Vec<Value>>;

    async fn delete_card(&self, card_id: &str) -> TrelloResult<()>;

    /// Downloads every uploaded attachment of the board and records where each
    /// file was written.
    async fn download_attachments(&self, board: &mut TrelloBoard) -> TrelloResult<()>;
}

#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait TitleFetcher: Send + Sync {
    /// Title of the page at `url`. `Ok(None)` when the page has no usable title.
    async fn fetch_title(&self, url: &str) -> TrelloResult<Option<String>>;
}
