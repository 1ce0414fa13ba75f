use crate::context::CliContext;
use crate::output;
use serde::Serialize;

#[derive(Serialize)]
struct BoardEntry {
    name: String,
    id: String,
}

pub async fn handle(ctx: &CliContext) -> anyhow::Result<()> {
    let mut session = ctx.session().await?;
    let boards = session.list_boards().await?;
    let entries = boards
        .into_iter()
        .map(|(name, id)| BoardEntry { name, id })
        .collect();
    output::output_list(entries);
    Ok(())
}
