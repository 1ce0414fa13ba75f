use serde::Serialize;

use crate::card::TrelloCard;

pub type ListId = String;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrelloList {
    pub id: ListId,
    pub name: String,
    pub closed: bool,
    pub position: Option<f64>,
    pub board_id: String,
    pub cards: Vec<TrelloCard>,
}

impl TrelloList {
    pub fn new(id: ListId, name: String, closed: bool, board_id: String) -> Self {
        Self {
            id,
            name,
            closed,
            position: None,
            board_id,
            cards: Vec::new(),
        }
    }

    pub fn is_open(&self) -> bool {
        !self.closed
    }
}
