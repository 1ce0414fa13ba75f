//! Export data models.

use serde::Serialize;

use crate::TrelloBoard;

/// One row of the flattened card table.
///
/// A card yields a row per attachment and a row per checklist item, or a
/// single description row. Columns that do not apply to a row stay empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CardRow {
    pub list_name: String,
    pub card_name: String,
    pub description: String,
    pub attachment_name: String,
    pub attachment_url: String,
    pub attachment_file_path: String,
    pub local_server_path: String,
    pub checklist_item_name: String,
    pub checklist_item_url_title: String,
    pub checklist_item_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardSummary {
    pub id: String,
    pub name: String,
    pub share_url: String,
    pub labels: String,
    pub closed: bool,
    pub checklist_items: usize,
    pub attachments: usize,
    pub comments: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListSummary {
    pub id: String,
    pub name: String,
    pub closed: bool,
    pub cards: Vec<CardSummary>,
}

/// Export format for a single board.
#[derive(Debug, Clone, Serialize)]
pub struct BoardExport {
    pub board: TrelloBoard,
    pub simple_name: String,
    pub lists: Vec<ListSummary>,
}
