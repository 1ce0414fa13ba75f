//! Indexed views over the parsed board.

mod cards;
mod checklists;
mod lists;

pub use cards::TrelloCards;
pub use checklists::TrelloChecklists;
pub use lists::{ListScope, TrelloLists};
