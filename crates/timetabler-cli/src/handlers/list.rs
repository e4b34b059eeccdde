use crate::context::AppContext;
use crate::presentation::views::TimetableListView;
use anyhow::Result;
use is_terminal::IsTerminal;

pub fn handle(ctx: &AppContext) -> Result<()> {
    let entries = ctx.workspace().summaries()?;
    tracing::debug!(count = entries.len(), "listing timetables");

    let color = std::io::stdout().is_terminal();
    print!("{}", TimetableListView::new(ctx.data_dir(), &entries, color));
    Ok(())
}
