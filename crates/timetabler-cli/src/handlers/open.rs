use crate::context::AppContext;
use crate::presentation::renderers::TuiFrontend;
use anyhow::{Context, Result};
use std::path::Path;

use super::session;

pub fn handle(ctx: &AppContext, path: &Path) -> Result<()> {
    let timetable = ctx
        .workspace()
        .open_timetable(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    {
        let mut frontend = TuiFrontend::new()?;
        session::quit_on_interrupt(session::edit(ctx, &mut frontend, timetable))?;
    }
    println!("{}", session::FAREWELL);
    Ok(())
}
