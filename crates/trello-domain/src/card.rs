use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::attachment::TrelloAttachment;
use crate::checklist::TrelloChecklist;
use crate::comment::TrelloComment;
use crate::list::ListId;

pub type CardId = String;

/// Card history entry. Activities are not fetched yet, so this is always empty
/// after parsing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrelloActivity {
    pub id: String,
    pub author: String,
    pub date: DateTime<Utc>,
    pub contents: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrelloCard {
    pub id: CardId,
    pub name: String,
    pub share_url: String,
    /// Resolved through the list container the card was parsed against.
    pub list_id: ListId,
    pub description: String,
    pub labels: Vec<String>,
    pub closed: bool,
    pub due_date: Option<DateTime<Utc>>,
    pub checklists: Vec<TrelloChecklist>,
    pub attachments: Vec<TrelloAttachment>,
    pub comments: Vec<TrelloComment>,
    pub activities: Vec<TrelloActivity>,
}

impl TrelloCard {
    pub fn is_open(&self) -> bool {
        !self.closed
    }

    pub fn has_description(&self) -> bool {
        !self.description.is_empty()
    }

    pub fn has_checklist(&self) -> bool {
        !self.checklists.is_empty()
    }

    pub fn has_attachments(&self) -> bool {
        !self.attachments.is_empty()
    }

    pub fn labels_as_str(&self) -> String {
        self.labels.join(", ")
    }

    pub fn checklist_item_count(&self) -> usize {
        self.checklists.iter().map(|cl| cl.items.len()).sum()
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::card;

    #[test]
    fn test_predicates_on_empty_card() {
        let card = card("c1", "l1");
        assert!(card.is_open());
        assert!(!card.has_description());
        assert!(!card.has_checklist());
        assert!(!card.has_attachments());
        assert_eq!(card.checklist_item_count(), 0);
    }

    #[test]
    fn test_labels_as_str() {
        let mut card = card("c1", "l1");
        card.labels = vec!["urgent".to_string(), "backend".to_string()];
        assert_eq!(card.labels_as_str(), "urgent, backend");
    }
}
