mod cli;
mod context;
mod handlers;
mod output;
mod prompt;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use context::CliContext;
use tracing_subscriber::EnvFilter;

const DEBUG_LOG_ENV: &str = "TRELLO_BACKUP_DEBUG_LOG";

fn init_tracing() -> anyhow::Result<()> {
    if let Ok(log_path) = std::env::var(DEBUG_LOG_ENV) {
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        tracing_subscriber::fmt()
            .with_writer(log_file)
            .with_max_level(tracing::Level::DEBUG)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .init();
    } else {
        // stdout carries the JSON responses
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
            )
            .init();
    }
    Ok(())
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    if let Commands::Completions { shell } = cli.command {
        clap_complete::generate(
            shell,
            &mut Cli::command(),
            "trello-backup",
            &mut std::io::stdout(),
        );
        return Ok(());
    }

    let ctx = CliContext::load(cli.config.as_deref())?;
    match cli.command {
        Commands::Boards => handlers::boards::handle(&ctx).await?,
        Commands::Backup(args) => {
            let ctx = ctx.with_output_dir(args.output.clone());
            handlers::backup::handle(&ctx, args).await?
        }
        Commands::Cleanup(args) => handlers::cleanup::handle(&ctx, args).await?,
        Commands::Completions { .. } => {}
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        tracing::error!("{:#}", e);
        output::output_error(&e.to_string());
    }
    Ok(())
}
