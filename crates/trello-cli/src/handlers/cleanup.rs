use crate::cli::CleanupArgs;
use crate::context::CliContext;
use crate::output;
use crate::prompt::DialoguerPrompt;

pub async fn handle(ctx: &CliContext, args: CleanupArgs) -> anyhow::Result<()> {
    let filters = args.filters.to_filters();
    let mut session = ctx.session().await?;
    let report = session
        .cleanup_board(&args.board, &filters, &mut DialoguerPrompt)
        .await?;
    if report.aborted {
        tracing::info!("Cleanup aborted by user");
    }
    output::output_success(report);
    Ok(())
}
