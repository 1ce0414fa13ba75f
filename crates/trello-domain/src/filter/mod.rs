//! Card and list filtering.
//!
//! `CardPropertyFilter` is the flag set a run is configured with, the
//! `CardFilter` implementations are the predicates those flags switch on.

pub mod card_filter;
pub mod card_filters;
pub mod property;

pub use card_filter::{
    AnyOfFilter, AttachmentFilter, CardFilter, CardFilterer, ChecklistFilter, DescriptionFilter,
    OpenFilter,
};
pub use card_filters::{CardFilters, ListFilter, TrelloFilters};
pub use property::CardPropertyFilter;
