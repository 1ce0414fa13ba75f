use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use trello_domain::{CardFilters, ListFilter, TrelloFilters};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_COMMIT_HASH"),
    ")"
);

#[derive(Parser)]
#[command(name = "trello-backup")]
#[command(about = "Back up Trello boards into readable exports", long_about = None)]
#[command(version, long_version = LONG_VERSION)]
pub struct Cli {
    /// Path to a config file (defaults to the per-user config.toml)
    #[arg(long, global = true, value_name = "PATH", env = "TRELLO_BACKUP_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the boards visible to the configured account
    Boards,
    /// Export a board to JSON, downloading its attachments
    Backup(BackupArgs),
    /// Interactively delete cards of a board
    Cleanup(CleanupArgs),
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Args)]
pub struct FilterArgs {
    /// Only process this list (repeatable). Every list must exist on the board.
    #[arg(long = "list", value_name = "NAME")]
    pub lists: Vec<String>,

    /// Which lists to keep: all, open
    #[arg(long)]
    pub list_filter: Option<ListFilter>,

    /// Which cards to keep: all, open, desc-and-checklist, desc-and-attachment,
    /// checklist-and-attachment, only-description
    #[arg(long, default_value = "all")]
    pub card_filter: CardFilters,
}

impl FilterArgs {
    pub fn to_filters(&self) -> TrelloFilters {
        let mut filters = TrelloFilters::new().with_card_filters(self.card_filter);
        if !self.lists.is_empty() {
            filters = filters.with_list_names(self.lists.clone());
        }
        if let Some(list_filter) = self.list_filter {
            filters = filters.with_list_filter(list_filter);
        }
        filters
    }
}

#[derive(Args)]
pub struct BackupArgs {
    /// Board name
    pub board: String,

    #[command(flatten)]
    pub filters: FilterArgs,

    /// Also fetch the comments of every exported card
    #[arg(long)]
    pub comments: bool,

    /// Output directory (overrides the configured one)
    #[arg(long, value_name = "DIR")]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct CleanupArgs {
    /// Board name
    pub board: String,

    #[command(flatten)]
    pub filters: FilterArgs,
}
