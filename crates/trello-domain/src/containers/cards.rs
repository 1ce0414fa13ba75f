use serde_json::Value;
use trello_core::TrelloResult;

use super::{TrelloChecklists, TrelloLists};
use crate::card::TrelloCard;
use crate::parser::TrelloObjectParser;

/// Every card of a board, parsed against a list container.
///
/// Building it also appends each card to its list in `lists`.
#[derive(Debug, Clone, Default)]
pub struct TrelloCards {
    all: Vec<TrelloCard>,
}

impl TrelloCards {
    pub fn new(
        board_json: &Value,
        lists: &mut TrelloLists,
        checklists: &TrelloChecklists,
    ) -> TrelloResult<Self> {
        let all = TrelloObjectParser::parse_cards(board_json, lists, checklists)?;
        Ok(Self { all })
    }

    pub fn from_cards(all: Vec<TrelloCard>) -> Self {
        Self { all }
    }

    pub fn all(&self) -> &[TrelloCard] {
        &self.all
    }

    pub fn open(&self) -> Vec<&TrelloCard> {
        self.all.iter().filter(|c| c.is_open()).collect()
    }

    pub fn by_share_url(&self, url: &str) -> Option<&TrelloCard> {
        self.all.iter().find(|c| c.share_url == url)
    }

    pub fn len(&self) -> usize {
        self.all.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }
}
