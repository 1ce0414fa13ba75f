//! Board details JSON into the typed model.

use chrono::{DateTime, Utc};
use serde_json::Value;
use trello_core::{TrelloError, TrelloResult};

use crate::attachment::TrelloAttachment;
use crate::card::TrelloCard;
use crate::checklist::{TrelloChecklist, TrelloChecklistItem};
use crate::comment::TrelloComment;
use crate::containers::{ListScope, TrelloChecklists, TrelloLists};
use crate::list::TrelloList;
use crate::raw::{self, RawAttachment, RawCard, RawChecklist, RawList};

const COMMENT_ACTION: &str = "commentCard";
const COMPLETE_STATE: &str = "complete";
const UNKNOWN_AUTHOR: &str = "unknown";

pub struct TrelloObjectParser;

impl TrelloObjectParser {
    pub fn board_name(board_json: &Value) -> String {
        board_json
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    }

    pub fn parse_lists(board_json: &Value) -> TrelloResult<Vec<TrelloList>> {
        let raw: Vec<RawList> = raw::array_field(board_json, "lists").map_err(TrelloError::Parse)?;
        let mut lists: Vec<TrelloList> = raw
            .into_iter()
            .map(|l| TrelloList {
                id: l.id,
                name: l.name,
                closed: l.closed,
                position: l.pos,
                board_id: l.id_board,
                cards: Vec::new(),
            })
            .collect();
        sort_by_position(&mut lists, |l| l.position);
        Ok(lists)
    }

    pub fn parse_checklists(board_json: &Value) -> TrelloResult<Vec<TrelloChecklist>> {
        let raw: Vec<RawChecklist> =
            raw::array_field(board_json, "checklists").map_err(TrelloError::Parse)?;
        let mut checklists: Vec<TrelloChecklist> = raw
            .into_iter()
            .map(|cl| TrelloChecklist {
                id: cl.id,
                name: cl.name,
                board_id: cl.id_board,
                card_id: cl.id_card,
                position: cl.pos,
                items: cl
                    .check_items
                    .into_iter()
                    .map(|item| {
                        TrelloChecklistItem::new(
                            item.id,
                            item.name,
                            item.state == COMPLETE_STATE,
                            item.pos,
                        )
                    })
                    .collect(),
            })
            .collect();
        sort_by_position(&mut checklists, |cl| cl.position);
        Ok(checklists)
    }

    /// Parses every card and appends it to its list in `lists`.
    pub fn parse_cards(
        board_json: &Value,
        lists: &mut TrelloLists,
        checklists: &TrelloChecklists,
    ) -> TrelloResult<Vec<TrelloCard>> {
        let cards = Self::build_cards(board_json, lists, checklists)?;
        Self::attach_to_lists(&cards, lists);
        Ok(cards)
    }

    /// Comments among a card's actions, in API order.
    ///
    /// Comment actions without text are skipped with a warning. A missing
    /// author, id or date does not drop the comment.
    pub fn parse_comments_for_card(card_id: &str, actions: &[Value]) -> Vec<TrelloComment> {
        actions
            .iter()
            .filter(|a| a.get("type").and_then(Value::as_str) == Some(COMMENT_ACTION))
            .filter_map(|action| match Self::parse_comment(action) {
                Ok(comment) => Some(comment),
                Err(reason) => {
                    tracing::warn!(card_id, reason, "skipping malformed comment action");
                    None
                }
            })
            .collect()
    }

    fn parse_comment(action: &Value) -> Result<TrelloComment, &'static str> {
        let text = action
            .get("data")
            .ok_or("missing data")?
            .get("text")
            .and_then(Value::as_str)
            .ok_or("missing data.text")?;
        let author = action
            .get("memberCreator")
            .and_then(|m| m.get("username"))
            .and_then(Value::as_str)
            .unwrap_or(UNKNOWN_AUTHOR);
        let id = action.get("id").and_then(Value::as_str).unwrap_or_default();
        let date = action
            .get("date")
            .and_then(Value::as_str)
            .and_then(|d| optional_timestamp(d, "comment date"));

        Ok(TrelloComment {
            id: id.to_string(),
            author: author.to_string(),
            date,
            contents: text.to_string(),
        })
    }

    fn build_cards(
        board_json: &Value,
        lists: &TrelloLists,
        checklists: &TrelloChecklists,
    ) -> TrelloResult<Vec<TrelloCard>> {
        let raw: Vec<RawCard> = raw::array_field(board_json, "cards").map_err(TrelloError::Parse)?;
        let total = raw.len();
        let mut cards = Vec::with_capacity(total);

        for (idx, card) in raw.into_iter().enumerate() {
            tracing::trace!("Processing card: {} / {}", idx + 1, total);
            if !lists.contains_id(&card.id_list) {
                match lists.scope() {
                    ListScope::FilteredSubset => {
                        tracing::debug!(
                            card = %card.name,
                            list_id = %card.id_list,
                            "skipping card of a filtered out list"
                        );
                        continue;
                    }
                    ListScope::Full => {
                        return Err(TrelloError::Parse(format!(
                            "card '{}' ({}) references unknown list {}",
                            card.name, card.id, card.id_list
                        )));
                    }
                }
            }

            let attachments = card
                .attachments
                .into_iter()
                .map(|a| Self::parse_attachment(&card.id, a))
                .collect();

            cards.push(TrelloCard {
                share_url: card.short_url.or(card.url).unwrap_or_default(),
                labels: card.labels.into_iter().map(|l| l.name).collect(),
                checklists: checklists.get_by_ids(&card.id_checklists),
                due_date: card.due.as_deref().and_then(|d| optional_timestamp(d, "due")),
                attachments,
                id: card.id,
                name: card.name,
                list_id: card.id_list,
                description: card.desc,
                closed: card.closed,
                comments: Vec::new(),
                activities: Vec::new(),
            });
        }
        Ok(cards)
    }

    fn parse_attachment(card_id: &str, raw: RawAttachment) -> TrelloAttachment {
        let api_url = if raw.is_upload {
            let file_name = raw.file_name.as_deref().unwrap_or(&raw.name);
            Some(TrelloAttachment::download_url(card_id, &raw.id, file_name))
        } else {
            None
        };
        TrelloAttachment {
            date: raw
                .date
                .as_deref()
                .and_then(|d| optional_timestamp(d, "attachment date")),
            id: raw.id,
            name: raw.name,
            url: raw.url,
            api_url,
            is_upload: raw.is_upload,
            file_name: raw.file_name,
            downloaded_file_path: None,
        }
    }

    fn attach_to_lists(cards: &[TrelloCard], lists: &mut TrelloLists) {
        for card in cards {
            if let Some(list) = lists.get_by_id_mut(&card.list_id) {
                list.cards.push(card.clone());
            }
        }
    }
}

/// Stable sort by position, only when every entry has one.
fn sort_by_position<T>(items: &mut [T], position: impl Fn(&T) -> Option<f64>) {
    if items.iter().all(|item| position(item).is_some()) {
        items.sort_by(|a, b| {
            let (a, b) = (position(a).unwrap_or_default(), position(b).unwrap_or_default());
            a.total_cmp(&b)
        });
    }
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(value).map(|d| d.with_timezone(&Utc))
}

fn optional_timestamp(value: &str, field: &str) -> Option<DateTime<Utc>> {
    match parse_timestamp(value) {
        Ok(date) => Some(date),
        Err(e) => {
            tracing::warn!(field, value, "ignoring unparseable timestamp: {}", e);
            None
        }
    }
}
