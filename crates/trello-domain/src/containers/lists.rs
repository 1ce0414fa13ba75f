use serde_json::Value;
use std::collections::{HashMap, HashSet};
use trello_core::{TrelloError, TrelloResult};

use crate::filter::ListFilter;
use crate::list::TrelloList;
use crate::parser::TrelloObjectParser;

/// Whether a list container holds every list of the board or only a subset.
///
/// Cards whose list is missing from a `FilteredSubset` are skipped while
/// parsing; in a `Full` container a missing list is a parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListScope {
    #[default]
    Full,
    FilteredSubset,
}

#[derive(Debug, Clone, Default)]
pub struct TrelloLists {
    lists: Vec<TrelloList>,
    by_id: HashMap<String, usize>,
    by_name: HashMap<String, usize>,
    scope: ListScope,
}

impl TrelloLists {
    pub fn new(board_json: &Value) -> TrelloResult<Self> {
        let lists = TrelloObjectParser::parse_lists(board_json)?;
        Ok(Self::from_lists(lists, ListScope::Full))
    }

    /// Uses `subset` instead of the board's lists.
    pub fn with_subset(subset: Vec<TrelloList>) -> Self {
        Self::from_lists(subset, ListScope::FilteredSubset)
    }

    pub fn from_lists(lists: Vec<TrelloList>, scope: ListScope) -> Self {
        let by_id = lists
            .iter()
            .enumerate()
            .map(|(idx, l)| (l.id.clone(), idx))
            .collect();
        // duplicate names: the later list wins
        let by_name = lists
            .iter()
            .enumerate()
            .map(|(idx, l)| (l.name.clone(), idx))
            .collect();
        Self {
            lists,
            by_id,
            by_name,
            scope,
        }
    }

    pub fn all(&self) -> &[TrelloList] {
        &self.lists
    }

    pub fn open(&self) -> Vec<&TrelloList> {
        self.lists.iter().filter(|l| l.is_open()).collect()
    }

    pub fn get_by_id(&self, id: &str) -> Option<&TrelloList> {
        self.by_id.get(id).map(|&idx| &self.lists[idx])
    }

    pub fn get_by_id_mut(&mut self, id: &str) -> Option<&mut TrelloList> {
        match self.by_id.get(id) {
            Some(&idx) => self.lists.get_mut(idx),
            None => None,
        }
    }

    pub fn get_by_name(&self, name: &str) -> Option<&TrelloList> {
        self.by_name.get(name).map(|&idx| &self.lists[idx])
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn scope(&self) -> ListScope {
        self.scope
    }

    pub fn is_filtered(&self) -> bool {
        self.scope == ListScope::FilteredSubset
    }

    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    pub fn into_lists(self) -> Vec<TrelloList> {
        self.lists
    }

    /// Narrows the container to the named lists, keeping container order.
    ///
    /// All names are checked before anything is returned, so one error
    /// reports every unknown name in the order they were requested.
    pub fn filter_by_list_names(&self, names: &[String]) -> TrelloResult<TrelloLists> {
        let mut missing: Vec<String> = Vec::new();
        let mut wanted: HashSet<usize> = HashSet::new();
        for name in names {
            match self.by_name.get(name) {
                Some(&idx) => {
                    wanted.insert(idx);
                }
                None if !missing.contains(name) => missing.push(name.clone()),
                None => {}
            }
        }

        if !missing.is_empty() {
            return Err(TrelloError::ListsNotFound { names: missing });
        }

        let subset = self
            .lists
            .iter()
            .enumerate()
            .filter(|(idx, _)| wanted.contains(idx))
            .map(|(_, l)| l.clone())
            .collect();
        Ok(Self::with_subset(subset))
    }

    pub fn filter_by_list_filter(&self, filter: ListFilter) -> TrelloLists {
        match filter {
            ListFilter::All => self.clone(),
            ListFilter::Open => {
                Self::with_subset(self.open().into_iter().cloned().collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn board_json() -> Value {
        json!({
            "lists": [
                {"id": "l1", "name": "Backlog", "closed": false, "pos": 1, "idBoard": "b1"},
                {"id": "l2", "name": "Archive", "closed": true, "pos": 2, "idBoard": "b1"},
                {"id": "l3", "name": "Doing", "closed": false, "pos": 3, "idBoard": "b1"}
            ]
        })
    }

    fn names(lists: &TrelloLists) -> Vec<&str> {
        lists.all().iter().map(|l| l.name.as_str()).collect()
    }

    #[test]
    fn test_indexes() {
        let lists = TrelloLists::new(&board_json()).unwrap();
        assert_eq!(lists.len(), 3);
        assert_eq!(lists.scope(), ListScope::Full);
        assert_eq!(lists.get_by_id("l2").unwrap().name, "Archive");
        assert_eq!(lists.get_by_name("Doing").unwrap().id, "l3");
        assert!(lists.get_by_id("nope").is_none());

        let open: Vec<&str> = lists.open().iter().map(|l| l.id.as_str()).collect();
        assert_eq!(open, vec!["l1", "l3"]);
    }

    #[test]
    fn test_duplicate_names_last_wins() {
        let lists = TrelloLists::new(&json!({"lists": [
            {"id": "a", "name": "Same"},
            {"id": "b", "name": "Same"}
        ]}))
        .unwrap();
        assert_eq!(lists.get_by_name("Same").unwrap().id, "b");
    }

    #[test]
    fn test_filter_by_list_names_keeps_container_order() {
        let lists = TrelloLists::new(&board_json()).unwrap();
        let subset = lists
            .filter_by_list_names(&["Doing".to_string(), "Backlog".to_string()])
            .unwrap();
        assert_eq!(names(&subset), vec!["Backlog", "Doing"]);
        assert!(subset.is_filtered());
        assert!(subset.get_by_id("l2").is_none());
    }

    #[test]
    fn test_filter_by_list_names_reports_every_missing_name() {
        let lists = TrelloLists::new(&board_json()).unwrap();
        let err = lists
            .filter_by_list_names(&[
                "Backlog".to_string(),
                "Non-Existent List".to_string(),
                "Another Missing".to_string(),
            ])
            .unwrap_err();

        match err {
            TrelloError::ListsNotFound { names } => {
                assert_eq!(names, vec!["Non-Existent List", "Another Missing"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_filter_by_list_filter() {
        let lists = TrelloLists::new(&board_json()).unwrap();

        let all = lists.filter_by_list_filter(ListFilter::All);
        assert_eq!(all.len(), 3);
        assert_eq!(all.scope(), ListScope::Full);

        let open = lists.filter_by_list_filter(ListFilter::Open);
        assert_eq!(names(&open), vec!["Backlog", "Doing"]);
        assert_eq!(open.scope(), ListScope::FilteredSubset);
    }
}
