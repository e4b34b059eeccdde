use crate::context::AppContext;
use crate::presentation::views::ValidationView;
use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use std::path::Path;
use timetabler_runtime::TimetableSummary;

pub fn handle(ctx: &AppContext, path: &Path) -> Result<()> {
    let timetable = ctx
        .workspace()
        .open_timetable(path)
        .with_context(|| format!("{} is not a valid timetable", path.display()))?;

    let summary = TimetableSummary::of(&timetable);
    let color = std::io::stdout().is_terminal();
    print!("{}", ValidationView::new(&summary, color));
    Ok(())
}
