pub mod api;
pub mod attachment;
pub mod board;
pub mod card;
pub mod checklist;
pub mod comment;
pub mod containers;
pub mod export;
pub mod filter;
pub mod list;
pub mod parser;
mod raw;

pub use api::{TitleFetcher, TrelloApi};
pub use attachment::TrelloAttachment;
pub use board::TrelloBoard;
pub use card::{TrelloActivity, TrelloCard};
pub use checklist::{TrelloChecklist, TrelloChecklistItem};
pub use comment::TrelloComment;
pub use containers::{ListScope, TrelloCards, TrelloChecklists, TrelloLists};
pub use filter::{CardFilterer, CardFilters, CardPropertyFilter, ListFilter, TrelloFilters};
pub use list::TrelloList;
pub use parser::TrelloObjectParser;

#[cfg(any(test, feature = "mocks"))]
pub use api::{MockTitleFetcher, MockTrelloApi};
