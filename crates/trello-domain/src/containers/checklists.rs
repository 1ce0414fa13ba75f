use serde_json::Value;
use std::collections::{HashMap, HashSet};
use trello_core::TrelloResult;

use crate::checklist::TrelloChecklist;
use crate::parser::TrelloObjectParser;

#[derive(Debug, Clone, Default)]
pub struct TrelloChecklists {
    all: Vec<TrelloChecklist>,
    by_id: HashMap<String, usize>,
}

impl TrelloChecklists {
    pub fn new(board_json: &Value) -> TrelloResult<Self> {
        Ok(Self::from_checklists(TrelloObjectParser::parse_checklists(
            board_json,
        )?))
    }

    pub fn from_checklists(all: Vec<TrelloChecklist>) -> Self {
        let by_id = all
            .iter()
            .enumerate()
            .map(|(idx, cl)| (cl.id.clone(), idx))
            .collect();
        Self { all, by_id }
    }

    pub fn all(&self) -> &[TrelloChecklist] {
        &self.all
    }

    pub fn get_by_id(&self, id: &str) -> Option<&TrelloChecklist> {
        self.by_id.get(id).map(|&idx| &self.all[idx])
    }

    /// Checklists whose id is in `ids`, in container order. Unknown ids are ignored.
    pub fn get_by_ids(&self, ids: &[String]) -> Vec<TrelloChecklist> {
        let wanted: HashSet<&str> = ids.iter().map(String::as_str).collect();
        self.all
            .iter()
            .filter(|cl| wanted.contains(cl.id.as_str()))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.all.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }
}
