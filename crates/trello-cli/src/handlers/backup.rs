use crate::cli::BackupArgs;
use crate::context::CliContext;
use crate::output;
use serde::Serialize;
use std::path::{Path, PathBuf};
use trello_domain::export::{BoardExporter, CardRow};
use trello_service::EnrichmentStats;

#[derive(Debug, Serialize)]
pub struct BackupSummary {
    pub board: String,
    pub board_id: String,
    pub export_file: PathBuf,
    pub rows_file: PathBuf,
    pub lists: usize,
    pub cards: usize,
    pub rows: usize,
    pub attachments_downloaded: usize,
    pub enrichment: EnrichmentStats,
}

pub async fn handle(ctx: &CliContext, args: BackupArgs) -> anyhow::Result<()> {
    let filters = args.filters.to_filters();
    let mut session = ctx.session().await?;
    let exported = session
        .get_board(&args.board, &filters, args.comments)
        .await?;
    let board = &exported.board;

    let out_dir = ctx.output_dir();
    let export = BoardExporter::export_board(board);
    let export_file = out_dir.join(format!("{}.json", export.simple_name));
    BoardExporter::export_to_file(&export, &export_file)?;

    let rows = BoardExporter::board_rows(
        board,
        filters.card_filters.flags(),
        ctx.config.effective_http_server_port(),
    );
    let rows_file = out_dir.join(format!("{}-rows.json", export.simple_name));
    write_rows(&rows, &rows_file)?;

    let attachments_downloaded = board
        .lists
        .iter()
        .flat_map(|list| &list.cards)
        .flat_map(|card| &card.attachments)
        .filter(|attachment| attachment.is_downloaded())
        .count();

    tracing::info!(
        "Exported board '{}' to {}",
        board.name,
        export_file.display()
    );
    output::output_success(BackupSummary {
        board: board.name.clone(),
        board_id: board.id.clone(),
        export_file,
        rows_file,
        lists: exported.lists.len(),
        cards: board.card_count(),
        rows: rows.len(),
        attachments_downloaded,
        enrichment: exported.enrichment,
    });
    Ok(())
}

fn write_rows(rows: &[CardRow], path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, serde_json::to_string_pretty(rows)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_rows_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("work-rows.json");
        let rows = vec![CardRow {
            list_name: "Todo".to_string(),
            card_name: "Card".to_string(),
            ..Default::default()
        }];

        write_rows(&rows, &path).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written[0]["list_name"], "Todo");
        assert_eq!(written[0]["attachment_url"], "");
    }
}
