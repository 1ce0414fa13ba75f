//! Interactive card deletion.
//!
//! The walk asks once per list whether to proceed, then once per card whether
//! to delete it. Declining a list or aborting at a card ends the whole walk.

use serde::Serialize;
use trello_core::TrelloResult;
use trello_domain::export::{BoardExporter, CardSummary, ListSummary};
use trello_domain::{TrelloApi, TrelloBoard};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardDecision {
    Delete,
    Skip,
    Abort,
}

/// Answers the questions of a cleanup walk.
#[cfg_attr(test, mockall::automock)]
pub trait CleanupPrompt {
    /// `position` is 1-based.
    fn confirm_list(&mut self, list: &ListSummary, position: usize, total: usize)
        -> TrelloResult<bool>;

    fn decide_card(
        &mut self,
        list: &ListSummary,
        card: &CardSummary,
        position: usize,
        total: usize,
    ) -> TrelloResult<CardDecision>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanupState {
    AwaitingListConfirm { list: usize },
    AwaitingCardConfirm { list: usize, card: usize },
    Done,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CleanupFailure {
    pub card_id: String,
    pub card_name: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CleanupReport {
    pub board: String,
    pub deleted: Vec<String>,
    pub skipped: Vec<String>,
    pub failed: Vec<CleanupFailure>,
    /// The user stopped the walk before every list was visited.
    pub aborted: bool,
}

pub(crate) struct CleanupRun {
    board_name: String,
    lists: Vec<ListSummary>,
}

impl CleanupRun {
    pub(crate) fn new(board: &TrelloBoard) -> Self {
        Self {
            board_name: board.name.clone(),
            lists: BoardExporter::list_summaries(&board.lists),
        }
    }

    pub(crate) async fn execute(
        self,
        api: &dyn TrelloApi,
        prompt: &mut dyn CleanupPrompt,
    ) -> TrelloResult<CleanupReport> {
        let mut report = CleanupReport {
            board: self.board_name.clone(),
            ..Default::default()
        };
        let mut state = if self.lists.is_empty() {
            CleanupState::Done
        } else {
            CleanupState::AwaitingListConfirm { list: 0 }
        };

        loop {
            state = match state {
                CleanupState::Done => break,
                CleanupState::AwaitingListConfirm { list } => {
                    let summary = &self.lists[list];
                    if prompt.confirm_list(summary, list + 1, self.lists.len())? {
                        tracing::info!("Starting cleanup for list: {}", summary.name);
                        self.first_card_of(list)
                    } else {
                        tracing::info!("Cleanup aborted by user");
                        report.aborted = true;
                        CleanupState::Done
                    }
                }
                CleanupState::AwaitingCardConfirm { list, card } => {
                    let summary = &self.lists[list];
                    let target = &summary.cards[card];
                    let decision =
                        prompt.decide_card(summary, target, card + 1, summary.cards.len())?;
                    match decision {
                        CardDecision::Delete => {
                            tracing::info!(
                                "Deleting card: {} (Board: {}, List: {})",
                                target.name,
                                self.board_name,
                                summary.name
                            );
                            match api.delete_card(&target.id).await {
                                Ok(()) => report.deleted.push(target.id.clone()),
                                Err(e) => {
                                    tracing::warn!("Failed to delete card {}: {}", target.id, e);
                                    report.failed.push(CleanupFailure {
                                        card_id: target.id.clone(),
                                        card_name: target.name.clone(),
                                        error: e.to_string(),
                                    });
                                }
                            }
                            self.next_card(list, card)
                        }
                        CardDecision::Skip => {
                            report.skipped.push(target.id.clone());
                            self.next_card(list, card)
                        }
                        CardDecision::Abort => {
                            tracing::info!("Cleanup aborted by user");
                            report.aborted = true;
                            CleanupState::Done
                        }
                    }
                }
            };
        }
        Ok(report)
    }

    fn first_card_of(&self, list: usize) -> CleanupState {
        if self.lists[list].cards.is_empty() {
            self.next_list(list)
        } else {
            CleanupState::AwaitingCardConfirm { list, card: 0 }
        }
    }

    fn next_card(&self, list: usize, card: usize) -> CleanupState {
        if card + 1 < self.lists[list].cards.len() {
            CleanupState::AwaitingCardConfirm {
                list,
                card: card + 1,
            }
        } else {
            self.next_list(list)
        }
    }

    fn next_list(&self, list: usize) -> CleanupState {
        if list + 1 < self.lists.len() {
            CleanupState::AwaitingListConfirm { list: list + 1 }
        } else {
            CleanupState::Done
        }
    }
}
