//! Board export functionality.
//!
//! Converts the fetched board into row and summary form for renderers.

use super::models::{BoardExport, CardRow, CardSummary, ListSummary};
use crate::filter::CardPropertyFilter;
use crate::{TrelloBoard, TrelloCard, TrelloList};
use std::io;
use std::path::Path;

/// Exports boards to portable formats.
pub struct BoardExporter;

impl BoardExporter {
    /// Flattened rows of one card.
    ///
    /// With only `WITH_DESCRIPTION` set the card is a single description row.
    /// Otherwise attachments come first, then checklist items, and a card
    /// that produced no rows still gets a description row when descriptions
    /// were asked for.
    pub fn card_rows(
        list_name: &str,
        card: &TrelloCard,
        flags: CardPropertyFilter,
        http_server_port: u16,
    ) -> Vec<CardRow> {
        let base = CardRow {
            list_name: list_name.to_string(),
            card_name: card.name.clone(),
            description: card.description.clone(),
            ..Default::default()
        };

        if flags.is_only(CardPropertyFilter::WITH_DESCRIPTION) {
            return vec![base];
        }

        let mut rows = Vec::new();
        if flags.contains(CardPropertyFilter::WITH_ATTACHMENT) {
            for attachment in &card.attachments {
                let (file_path, local_server_path) = match &attachment.downloaded_file_path {
                    Some(path) => {
                        let file_name = path
                            .file_name()
                            .map(|n| n.to_string_lossy().into_owned())
                            .unwrap_or_default();
                        (
                            path.display().to_string(),
                            format!("http://localhost:{}/{}", http_server_port, file_name),
                        )
                    }
                    None => (String::new(), String::new()),
                };
                rows.push(CardRow {
                    attachment_name: attachment.name.clone(),
                    attachment_url: attachment.url.clone(),
                    attachment_file_path: file_path,
                    local_server_path,
                    ..base.clone()
                });
            }
        }

        if flags.contains(CardPropertyFilter::WITH_CHECKLIST) {
            for item in card.checklists.iter().flat_map(|cl| cl.items.iter()) {
                let row = match (item.url(), item.url_title()) {
                    (Some(url), Some(title)) => CardRow {
                        checklist_item_url_title: title.to_string(),
                        checklist_item_url: url.to_string(),
                        ..base.clone()
                    },
                    _ => CardRow {
                        checklist_item_name: item.value.clone(),
                        ..base.clone()
                    },
                };
                rows.push(row);
            }
        }

        if rows.is_empty() && flags.contains(CardPropertyFilter::WITH_DESCRIPTION) {
            rows.push(base);
        }
        rows
    }

    /// Rows of every card of every list, in board order.
    pub fn board_rows(
        board: &TrelloBoard,
        flags: CardPropertyFilter,
        http_server_port: u16,
    ) -> Vec<CardRow> {
        board
            .lists
            .iter()
            .flat_map(|list| {
                list.cards
                    .iter()
                    .flat_map(move |card| Self::card_rows(&list.name, card, flags, http_server_port))
            })
            .collect()
    }

    pub fn list_summary(list: &TrelloList) -> ListSummary {
        ListSummary {
            id: list.id.clone(),
            name: list.name.clone(),
            closed: list.closed,
            cards: list
                .cards
                .iter()
                .map(|card| CardSummary {
                    id: card.id.clone(),
                    name: card.name.clone(),
                    share_url: card.share_url.clone(),
                    labels: card.labels_as_str(),
                    closed: card.closed,
                    checklist_items: card.checklist_item_count(),
                    attachments: card.attachments.len(),
                    comments: card.comments.len(),
                })
                .collect(),
        }
    }

    pub fn list_summaries<'a>(lists: impl IntoIterator<Item = &'a TrelloList>) -> Vec<ListSummary> {
        lists.into_iter().map(Self::list_summary).collect()
    }

    pub fn export_board(board: &TrelloBoard) -> BoardExport {
        BoardExport {
            board: board.clone(),
            simple_name: board.simple_name(),
            lists: Self::list_summaries(&board.lists),
        }
    }

    /// Serialize export to JSON string.
    pub fn export_to_json(export: &BoardExport) -> Result<String, io::Error> {
        serde_json::to_string_pretty(export).map_err(io::Error::other)
    }

    /// Export directly to a file, creating its directory.
    pub fn export_to_file(export: &BoardExport, path: &Path) -> io::Result<()> {
        let json = Self::export_to_json(export)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::fixtures::card;
    use crate::{TrelloAttachment, TrelloChecklist, TrelloChecklistItem};
    use serde_json::Value;
    use std::path::PathBuf;
    use std::sync::Arc;

    fn rich_card() -> TrelloCard {
        let mut c = card("c1", "l1");
        c.description = "desc".into();
        let mut linked = TrelloChecklistItem::new("i2".into(), "see http://a.com".into(), false, None);
        linked.set_url_title("http://a.com".into(), "A site".into());
        c.checklists.push(TrelloChecklist {
            id: "cl1".into(),
            name: "Todo".into(),
            board_id: "b1".into(),
            card_id: "c1".into(),
            position: None,
            items: vec![
                TrelloChecklistItem::new("i1".into(), "Step 1".into(), true, None),
                linked,
            ],
        });
        c.attachments.push(TrelloAttachment {
            id: "a1".into(),
            date: None,
            name: "image.png".into(),
            url: "https://trello.com/image.png".into(),
            api_url: None,
            is_upload: true,
            file_name: Some("image.png".into()),
            downloaded_file_path: Some(PathBuf::from("/out/attachments/a1-image.png")),
        });
        c
    }

    #[test]
    fn test_only_description_is_one_row() {
        let rows = BoardExporter::card_rows(
            "List",
            &rich_card(),
            CardPropertyFilter::WITH_DESCRIPTION,
            8000,
        );
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].description, "desc");
        assert!(rows[0].checklist_item_name.is_empty());
    }

    #[test]
    fn test_attachment_then_checklist_rows() {
        let rows = BoardExporter::card_rows("List", &rich_card(), CardPropertyFilter::ALL, 8123);
        assert_eq!(rows.len(), 3);

        assert_eq!(rows[0].attachment_name, "image.png");
        assert_eq!(rows[0].attachment_file_path, "/out/attachments/a1-image.png");
        assert_eq!(rows[0].local_server_path, "http://localhost:8123/a1-image.png");

        assert_eq!(rows[1].checklist_item_name, "Step 1");
        assert!(rows[1].checklist_item_url.is_empty());

        assert!(rows[2].checklist_item_name.is_empty());
        assert_eq!(rows[2].checklist_item_url, "http://a.com");
        assert_eq!(rows[2].checklist_item_url_title, "A site");
        assert!(rows.iter().all(|r| r.description == "desc"));
    }

    #[test]
    fn test_card_without_rows_falls_back_to_description() {
        let mut plain = card("c2", "l1");
        plain.description = "only text".into();
        let flags = CardPropertyFilter::WITH_DESCRIPTION | CardPropertyFilter::WITH_CHECKLIST;

        let rows = BoardExporter::card_rows("List", &plain, flags, 8000);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].description, "only text");

        let rows = BoardExporter::card_rows("List", &plain, CardPropertyFilter::WITH_CHECKLIST, 8000);
        assert!(rows.is_empty());
    }

    #[test]
    fn test_export_to_json() {
        let mut list = TrelloList::new("l1".into(), "Doing".into(), false, "b1".into());
        list.cards.push(rich_card());
        let board = TrelloBoard::new(
            "b1".into(),
            "My Board".into(),
            Arc::new(Value::Null),
            vec![list],
        );

        let export = BoardExporter::export_board(&board);
        assert_eq!(export.simple_name, "my-board");
        assert_eq!(export.lists[0].cards[0].checklist_items, 2);

        let json = BoardExporter::export_to_json(&export).unwrap();
        assert!(json.contains("\"name\": \"My Board\""));
        assert!(!json.contains("raw_json"));
    }

    #[test]
    fn test_export_to_file_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let board = TrelloBoard::new("b1".into(), "B".into(), Arc::new(Value::Null), Vec::new());
        let path = dir.path().join("nested").join("b.json");

        BoardExporter::export_to_file(&BoardExporter::export_board(&board), &path).unwrap();
        assert!(path.exists());
    }
}
