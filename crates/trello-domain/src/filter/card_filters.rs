//! Filter presets selectable from the command line.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use trello_core::TrelloError;

use super::property::CardPropertyFilter;

/// Named combinations of card property flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CardFilters {
    #[default]
    All,
    Open,
    DescAndChecklist,
    DescAndAttachment,
    ChecklistAndAttachment,
    OnlyDescription,
}

impl CardFilters {
    pub const VARIANTS: [CardFilters; 6] = [
        CardFilters::All,
        CardFilters::Open,
        CardFilters::DescAndChecklist,
        CardFilters::DescAndAttachment,
        CardFilters::ChecklistAndAttachment,
        CardFilters::OnlyDescription,
    ];

    pub fn flags(self) -> CardPropertyFilter {
        match self {
            CardFilters::All => CardPropertyFilter::ALL,
            CardFilters::Open => CardPropertyFilter::OPEN,
            CardFilters::DescAndChecklist => {
                CardPropertyFilter::WITH_DESCRIPTION | CardPropertyFilter::WITH_CHECKLIST
            }
            CardFilters::DescAndAttachment => {
                CardPropertyFilter::WITH_DESCRIPTION | CardPropertyFilter::WITH_ATTACHMENT
            }
            CardFilters::ChecklistAndAttachment => {
                CardPropertyFilter::WITH_CHECKLIST | CardPropertyFilter::WITH_ATTACHMENT
            }
            CardFilters::OnlyDescription => CardPropertyFilter::WITH_DESCRIPTION,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CardFilters::All => "all",
            CardFilters::Open => "open",
            CardFilters::DescAndChecklist => "desc-and-checklist",
            CardFilters::DescAndAttachment => "desc-and-attachment",
            CardFilters::ChecklistAndAttachment => "checklist-and-attachment",
            CardFilters::OnlyDescription => "only-description",
        }
    }
}

impl fmt::Display for CardFilters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CardFilters {
    type Err = TrelloError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('_', "-");
        Self::VARIANTS
            .into_iter()
            .find(|variant| variant.as_str() == wanted)
            .ok_or_else(|| {
                TrelloError::Validation(format!(
                    "unknown card filter '{}', expected one of: {}",
                    s,
                    Self::VARIANTS.map(|v| v.as_str()).join(", ")
                ))
            })
    }
}

/// Which lists of a board take part in a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ListFilter {
    #[default]
    All,
    Open,
}

impl fmt::Display for ListFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListFilter::All => f.write_str("all"),
            ListFilter::Open => f.write_str("open"),
        }
    }
}

impl FromStr for ListFilter {
    type Err = TrelloError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(ListFilter::All),
            "open" => Ok(ListFilter::Open),
            _ => Err(TrelloError::Validation(format!(
                "unknown list filter '{}', expected one of: all, open",
                s
            ))),
        }
    }
}

/// Filter settings of a single export run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrelloFilters {
    /// Only these lists, by name. Every name must exist on the board.
    pub list_names: Option<Vec<String>>,
    pub list_filter: Option<ListFilter>,
    pub card_filters: CardFilters,
}

impl TrelloFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_list_names(mut self, names: Vec<String>) -> Self {
        self.list_names = Some(names);
        self
    }

    pub fn with_list_filter(mut self, filter: ListFilter) -> Self {
        self.list_filter = Some(filter);
        self
    }

    pub fn with_card_filters(mut self, filters: CardFilters) -> Self {
        self.card_filters = filters;
        self
    }

    /// Check if any filters are active.
    pub fn has_active_filters(&self) -> bool {
        self.list_names.is_some()
            || self.list_filter == Some(ListFilter::Open)
            || self.card_filters != CardFilters::All
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_flags() {
        assert_eq!(CardFilters::All.flags(), CardPropertyFilter::ALL);
        assert_eq!(
            CardFilters::OnlyDescription.flags(),
            CardPropertyFilter::WITH_DESCRIPTION
        );
        let flags = CardFilters::ChecklistAndAttachment.flags();
        assert!(flags.contains(CardPropertyFilter::WITH_CHECKLIST));
        assert!(flags.contains(CardPropertyFilter::WITH_ATTACHMENT));
        assert!(!flags.contains(CardPropertyFilter::WITH_DESCRIPTION));
    }

    #[test]
    fn test_parse_card_filters() {
        assert_eq!(
            "desc-and-checklist".parse::<CardFilters>().unwrap(),
            CardFilters::DescAndChecklist
        );
        assert_eq!(
            "ONLY_DESCRIPTION".parse::<CardFilters>().unwrap(),
            CardFilters::OnlyDescription
        );
        let err = "sideways".parse::<CardFilters>().unwrap_err().to_string();
        assert!(err.contains("sideways"));
        assert!(err.contains("checklist-and-attachment"));
    }

    #[test]
    fn test_parse_list_filter() {
        assert_eq!("open".parse::<ListFilter>().unwrap(), ListFilter::Open);
        assert_eq!(" All ".parse::<ListFilter>().unwrap(), ListFilter::All);
        assert!("closed".parse::<ListFilter>().is_err());
    }

    #[test]
    fn test_default_has_no_active_filters() {
        let filters = TrelloFilters::default();
        assert!(!filters.has_active_filters());
        assert!(!filters
            .clone()
            .with_list_filter(ListFilter::All)
            .has_active_filters());
        assert!(filters.with_list_filter(ListFilter::Open).has_active_filters());
    }
}
