use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

use crate::list::TrelloList;

pub type BoardId = String;

/// Root aggregate of one export run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrelloBoard {
    pub id: BoardId,
    pub name: String,
    #[serde(skip)]
    pub raw_json: Arc<Value>,
    pub lists: Vec<TrelloList>,
}

impl TrelloBoard {
    pub fn new(id: BoardId, name: String, raw_json: Arc<Value>, lists: Vec<TrelloList>) -> Self {
        Self {
            id,
            name,
            raw_json,
            lists,
        }
    }

    /// Name safe for file names: runs of spaces and slashes become `-`.
    pub fn simple_name(&self) -> String {
        let mut out = String::with_capacity(self.name.len());
        let mut in_run = false;
        for ch in self.name.chars() {
            if matches!(ch, ' ' | '/' | '\\') {
                if !in_run {
                    out.push('-');
                }
                in_run = true;
            } else {
                out.extend(ch.to_lowercase());
                in_run = false;
            }
        }
        out
    }

    pub fn card_count(&self) -> usize {
        self.lists.iter().map(|l| l.cards.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(name: &str) -> TrelloBoard {
        TrelloBoard::new("b1".into(), name.into(), Arc::new(Value::Null), Vec::new())
    }

    #[test]
    fn test_simple_name() {
        assert_eq!(board("My Board").simple_name(), "my-board");
        assert_eq!(board("Work / Home \\ Misc").simple_name(), "work-home-misc");
        assert_eq!(board("plain").simple_name(), "plain");
    }

    #[test]
    fn test_card_count_on_empty_board() {
        assert_eq!(board("x").card_count(), 0);
    }
}
