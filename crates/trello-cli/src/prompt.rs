//! Terminal answers for the cleanup walk.

use dialoguer::{Confirm, Select};
use trello_core::{TrelloError, TrelloResult};
use trello_domain::export::{CardSummary, ListSummary};
use trello_service::{CardDecision, CleanupPrompt};

const CARD_CHOICES: [&str; 3] = ["Yes", "No", "Abort"];

pub struct DialoguerPrompt;

impl CleanupPrompt for DialoguerPrompt {
    fn confirm_list(
        &mut self,
        list: &ListSummary,
        position: usize,
        total: usize,
    ) -> TrelloResult<bool> {
        eprintln!(
            "List {} / {}: '{}' ({} cards)",
            position,
            total,
            list.name,
            list.cards.len()
        );
        Confirm::new()
            .with_prompt(format!("Proceed cleanup with list '{}'?", list.name))
            .default(true)
            .interact()
            .map_err(|e| TrelloError::Internal(e.to_string()))
    }

    fn decide_card(
        &mut self,
        list: &ListSummary,
        card: &CardSummary,
        position: usize,
        total: usize,
    ) -> TrelloResult<CardDecision> {
        eprintln!();
        eprintln!("[{}] card {} / {}", list.name, position, total);
        eprintln!("  name:        {}", card.name);
        eprintln!("  url:         {}", card.share_url);
        if !card.labels.is_empty() {
            eprintln!("  labels:      {}", card.labels);
        }
        eprintln!("  checklist:   {} items", card.checklist_items);
        eprintln!("  attachments: {}", card.attachments);

        let choice = Select::new()
            .with_prompt("OK to remove card?")
            .items(&CARD_CHOICES)
            .default(0)
            .interact()
            .map_err(|e| TrelloError::Internal(e.to_string()))?;
        Ok(decision_for(choice))
    }
}

fn decision_for(choice: usize) -> CardDecision {
    match choice {
        0 => CardDecision::Delete,
        1 => CardDecision::Skip,
        _ => CardDecision::Abort,
    }
}
