//! Card predicates and the filterer that applies a flag set to a list.

use super::property::CardPropertyFilter;
use crate::{TrelloCard, TrelloList};

/// Trait for filtering cards by a single property.
pub trait CardFilter {
    /// Returns true if the card matches the filter criteria.
    fn matches(&self, card: &TrelloCard) -> bool;
}

/// Cards that are not archived.
pub struct OpenFilter;

impl CardFilter for OpenFilter {
    fn matches(&self, card: &TrelloCard) -> bool {
        card.is_open()
    }
}

pub struct ChecklistFilter;

impl CardFilter for ChecklistFilter {
    fn matches(&self, card: &TrelloCard) -> bool {
        card.has_checklist()
    }
}

pub struct DescriptionFilter;

impl CardFilter for DescriptionFilter {
    fn matches(&self, card: &TrelloCard) -> bool {
        card.has_description()
    }
}

pub struct AttachmentFilter;

impl CardFilter for AttachmentFilter {
    fn matches(&self, card: &TrelloCard) -> bool {
        card.has_attachments()
    }
}

/// Combine multiple filters with OR logic.
///
/// A card matches if it passes any filter. An empty composite matches nothing.
#[derive(Default)]
pub struct AnyOfFilter {
    filters: Vec<Box<dyn CardFilter>>,
}

impl AnyOfFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a filter to the composite (builder pattern).
    pub fn with_filter(mut self, filter: Box<dyn CardFilter>) -> Self {
        self.filters.push(filter);
        self
    }

    /// One predicate per flag set in `flags`.
    pub fn from_flags(flags: CardPropertyFilter) -> Self {
        flags.iter().fold(Self::new(), |composite, flag| {
            let filter: Box<dyn CardFilter> = match flag {
                CardPropertyFilter::OPEN => Box::new(OpenFilter),
                CardPropertyFilter::WITH_CHECKLIST => Box::new(ChecklistFilter),
                CardPropertyFilter::WITH_DESCRIPTION => Box::new(DescriptionFilter),
                _ => Box::new(AttachmentFilter),
            };
            composite.with_filter(filter)
        })
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }
}

impl CardFilter for AnyOfFilter {
    fn matches(&self, card: &TrelloCard) -> bool {
        self.filters.iter().any(|f| f.matches(card))
    }
}

pub struct CardFilterer;

impl CardFilterer {
    /// Cards of `list` that have at least one of the properties in `flags`.
    /// `ALL` keeps the list's cards unchanged.
    pub fn filter(list: &TrelloList, flags: CardPropertyFilter) -> Vec<TrelloCard> {
        if flags == CardPropertyFilter::ALL {
            return list.cards.clone();
        }

        let predicate = AnyOfFilter::from_flags(flags);
        list.cards
            .iter()
            .filter(|card| {
                let keep = predicate.matches(card);
                if !keep {
                    tracing::debug!(
                        card = %card.name,
                        list = %list.name,
                        filter = %flags,
                        "dropping card that matches no active filter"
                    );
                }
                keep
            })
            .cloned()
            .collect()
    }
}
