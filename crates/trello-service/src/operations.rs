//! Export pipeline for one board at a time.

use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use trello_core::TrelloResult;
use trello_domain::{
    CardFilterer, TrelloApi, TrelloBoard, TrelloCards, TrelloChecklists, TrelloFilters,
    TrelloLists, TrelloObjectParser,
};
use uuid::Uuid;

use crate::cleanup::{CleanupPrompt, CleanupReport, CleanupRun};
use crate::title_service::{EnrichmentStats, TitleEnrichmentService};

/// A fetched board together with the list container it was built from.
#[derive(Debug, Clone)]
pub struct ExportedBoard {
    pub board: TrelloBoard,
    /// Same lists and cards as `board`, with the scope the filters produced.
    pub lists: TrelloLists,
    pub enrichment: EnrichmentStats,
}

/// State of one export run.
///
/// Board ids are remembered per name and board JSON per id, so a board is
/// fetched from the API at most once per session.
pub struct ExportSession {
    id: Uuid,
    api: Arc<dyn TrelloApi>,
    titles: TitleEnrichmentService,
    board_ids: HashMap<String, String>,
    board_json: HashMap<String, Arc<Value>>,
}

impl ExportSession {
    pub fn new(api: Arc<dyn TrelloApi>, titles: TitleEnrichmentService) -> Self {
        let id = Uuid::new_v4();
        tracing::debug!(session = %id, "starting export session");
        Self {
            id,
            api,
            titles,
            board_ids: HashMap::new(),
            board_json: HashMap::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn title_service(&self) -> &TitleEnrichmentService {
        &self.titles
    }

    pub async fn list_boards(&mut self) -> TrelloResult<BTreeMap<String, String>> {
        let boards = self.api.list_boards().await?;
        for (name, id) in &boards {
            self.board_ids.insert(name.clone(), id.clone());
        }
        Ok(boards)
    }

    /// Fetches, filters and enriches a board and downloads its attachments.
    pub async fn get_board(
        &mut self,
        name: &str,
        filters: &TrelloFilters,
        download_comments: bool,
    ) -> TrelloResult<ExportedBoard> {
        let mut exported = self.build_board(name, filters, download_comments).await?;
        self.api.download_attachments(&mut exported.board).await?;
        exported.lists =
            TrelloLists::from_lists(exported.board.lists.clone(), exported.lists.scope());
        Ok(exported)
    }

    /// Like [`get_board`](Self::get_board) without comments and without
    /// downloading attachments.
    pub async fn get_lists_and_cards(
        &mut self,
        name: &str,
        filters: &TrelloFilters,
    ) -> TrelloResult<ExportedBoard> {
        self.build_board(name, filters, false).await
    }

    /// Walks the filtered board asking `prompt` which cards to delete.
    pub async fn cleanup_board(
        &mut self,
        name: &str,
        filters: &TrelloFilters,
        prompt: &mut dyn CleanupPrompt,
    ) -> TrelloResult<CleanupReport> {
        tracing::info!("Starting cleanup for board: {}", name);
        let exported = self.get_lists_and_cards(name, filters).await?;
        CleanupRun::new(&exported.board)
            .execute(self.api.as_ref(), prompt)
            .await
    }

    async fn build_board(
        &mut self,
        name: &str,
        filters: &TrelloFilters,
        download_comments: bool,
    ) -> TrelloResult<ExportedBoard> {
        let board_id = self.board_id(name).await?;
        let board_json = self.board_json(&board_id).await?;
        tracing::info!("Processing board: {} ({})", name, board_id);

        let mut lists = TrelloLists::new(&board_json)?;
        if let Some(names) = &filters.list_names {
            lists = lists.filter_by_list_names(names)?;
        }
        if let Some(list_filter) = filters.list_filter {
            lists = lists.filter_by_list_filter(list_filter);
        }

        let checklists = TrelloChecklists::new(&board_json)?;
        // fills every list of `lists` with its cards
        let cards = TrelloCards::new(&board_json, &mut lists, &checklists)?;
        tracing::debug!("Parsed {} cards", cards.len());

        let scope = lists.scope();
        let mut board = TrelloBoard::new(
            board_id,
            name.to_string(),
            Arc::clone(&board_json),
            lists.into_lists(),
        );

        let flags = filters.card_filters.flags();
        for list in &mut board.lists {
            list.cards = CardFilterer::filter(list, flags);
        }

        if download_comments {
            self.fetch_comments(&mut board).await?;
        }

        let enrichment = self.titles.enrich(&mut board).await;

        let lists = TrelloLists::from_lists(board.lists.clone(), scope);
        Ok(ExportedBoard {
            board,
            lists,
            enrichment,
        })
    }

    async fn fetch_comments(&self, board: &mut TrelloBoard) -> TrelloResult<()> {
        let total = board.card_count();
        let mut done = 0;
        for list in &mut board.lists {
            for card in &mut list.cards {
                done += 1;
                tracing::debug!("Fetching comments for card {} / {}", done, total);
                let actions = self.api.get_actions_for_card(&card.id).await?;
                card.comments = TrelloObjectParser::parse_comments_for_card(&card.id, &actions);
            }
        }
        Ok(())
    }

    async fn board_id(&mut self, name: &str) -> TrelloResult<String> {
        if let Some(id) = self.board_ids.get(name) {
            return Ok(id.clone());
        }
        let id = self.api.get_board_id(name).await?;
        self.board_ids.insert(name.to_string(), id.clone());
        Ok(id)
    }

    async fn board_json(&mut self, board_id: &str) -> TrelloResult<Arc<Value>> {
        if let Some(json) = self.board_json.get(board_id) {
            return Ok(Arc::clone(json));
        }
        let json = Arc::new(self.api.get_board_details(board_id).await?);
        self.board_json
            .insert(board_id.to_string(), Arc::clone(&json));
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;
    use trello_core::TrelloError;
    use trello_domain::{CardFilters, ListFilter, MockTitleFetcher, MockTrelloApi};
    use trello_persistence::TitleCache;

    fn board_json() -> Value {
        json!({
            "id": "b1",
            "name": "Work",
            "lists": [
                {"id": "l1", "name": "Todo", "closed": false, "pos": 1, "idBoard": "b1"},
                {"id": "l2", "name": "Done", "closed": false, "pos": 2, "idBoard": "b1"}
            ],
            "checklists": [],
            "cards": [
                {"id": "c1", "name": "Write docs", "idList": "l1", "desc": "details", "idChecklists": []},
                {"id": "c2", "name": "Empty", "idList": "l1", "desc": "", "idChecklists": []},
                {"id": "c3", "name": "Shipped", "idList": "l2", "desc": "", "idChecklists": []}
            ]
        })
    }

    async fn session(api: MockTrelloApi, dir: &std::path::Path) -> ExportSession {
        let mut fetcher = MockTitleFetcher::new();
        fetcher.expect_fetch_title().returning(|_| Ok(None));
        let titles = TitleEnrichmentService::new(
            TitleCache::load(dir.join("cache")).await,
            Arc::new(fetcher),
        );
        ExportSession::new(Arc::new(api), titles)
    }

    #[tokio::test]
    async fn test_board_is_fetched_once_per_session() {
        let dir = tempdir().unwrap();
        let mut api = MockTrelloApi::new();
        api.expect_get_board_id()
            .times(1)
            .returning(|_| Ok("b1".to_string()));
        api.expect_get_board_details()
            .times(1)
            .returning(|_| Ok(board_json()));

        let mut session = session(api, dir.path()).await;
        let filters = TrelloFilters::default();
        let first = session.get_lists_and_cards("Work", &filters).await.unwrap();
        let second = session.get_lists_and_cards("Work", &filters).await.unwrap();

        assert_eq!(first.board.card_count(), 3);
        assert_eq!(second.board.card_count(), 3);
    }

    #[tokio::test]
    async fn test_list_boards_seeds_board_ids() {
        let dir = tempdir().unwrap();
        let mut api = MockTrelloApi::new();
        api.expect_list_boards()
            .returning(|| Ok(BTreeMap::from([("Work".to_string(), "b1".to_string())])));
        api.expect_get_board_id().never();
        api.expect_get_board_details()
            .withf(|id| id == "b1")
            .returning(|_| Ok(board_json()));

        let mut session = session(api, dir.path()).await;
        assert_eq!(session.list_boards().await.unwrap().len(), 1);
        session
            .get_lists_and_cards("Work", &TrelloFilters::default())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_card_filters_overwrite_list_cards() {
        let dir = tempdir().unwrap();
        let mut api = MockTrelloApi::new();
        api.expect_get_board_id().returning(|_| Ok("b1".to_string()));
        api.expect_get_board_details()
            .returning(|_| Ok(board_json()));

        let mut session = session(api, dir.path()).await;
        let filters = TrelloFilters::new().with_card_filters(CardFilters::OnlyDescription);
        let exported = session.get_lists_and_cards("Work", &filters).await.unwrap();

        assert_eq!(exported.board.lists[0].cards.len(), 1);
        assert_eq!(exported.board.lists[0].cards[0].id, "c1");
        assert!(exported.board.lists[1].cards.is_empty());
        assert_eq!(exported.lists.get_by_id("l1").unwrap().cards.len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_list_names_fail_before_cards_are_parsed() {
        let dir = tempdir().unwrap();
        let mut api = MockTrelloApi::new();
        api.expect_get_board_id().returning(|_| Ok("b1".to_string()));
        api.expect_get_board_details()
            .returning(|_| Ok(board_json()));

        let mut session = session(api, dir.path()).await;
        let filters = TrelloFilters::new()
            .with_list_names(vec!["Todo".to_string(), "Nope".to_string()])
            .with_list_filter(ListFilter::Open);
        let err = session
            .get_lists_and_cards("Work", &filters)
            .await
            .unwrap_err();

        assert!(matches!(err, TrelloError::ListsNotFound { names } if names == vec!["Nope"]));
    }

    #[tokio::test]
    async fn test_get_board_fetches_comments_and_downloads() {
        let dir = tempdir().unwrap();
        let mut api = MockTrelloApi::new();
        api.expect_get_board_id().returning(|_| Ok("b1".to_string()));
        api.expect_get_board_details()
            .returning(|_| Ok(board_json()));
        // only the surviving card of the filtered list gets its comments fetched
        api.expect_get_actions_for_card()
            .withf(|id| id == "c1")
            .times(1)
            .returning(|_| {
                Ok(vec![json!({
                    "id": "a1", "type": "commentCard", "date": "2024-01-01T00:00:00Z",
                    "memberCreator": {"username": "sam"}, "data": {"text": "done?"}
                })])
            });
        api.expect_download_attachments()
            .times(1)
            .returning(|_| Ok(()));

        let mut session = session(api, dir.path()).await;
        let filters = TrelloFilters::new()
            .with_list_names(vec!["Todo".to_string()])
            .with_card_filters(CardFilters::OnlyDescription);
        let exported = session.get_board("Work", &filters, true).await.unwrap();

        assert_eq!(exported.board.lists.len(), 1);
        assert_eq!(exported.board.lists[0].cards[0].comments[0].author, "sam");
        assert!(exported.lists.is_filtered());
        assert_eq!(
            exported.lists.get_by_id("l1").unwrap().cards[0].comments.len(),
            1
        );
    }

    #[tokio::test]
    async fn test_unknown_board() {
        let dir = tempdir().unwrap();
        let mut api = MockTrelloApi::new();
        api.expect_get_board_id().returning(|name| {
            Err(TrelloError::BoardNotFound {
                name: name.to_string(),
                known: vec!["Work".to_string()],
            })
        });

        let mut session = session(api, dir.path()).await;
        let err = session
            .get_board("Play", &TrelloFilters::default(), false)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Play"));
    }
}
