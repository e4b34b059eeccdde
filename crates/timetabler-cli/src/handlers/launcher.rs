use crate::context::AppContext;
use crate::presentation::renderers::TuiFrontend;
use anyhow::Result;

use super::session;

pub fn handle(ctx: &AppContext) -> Result<()> {
    {
        let mut frontend = TuiFrontend::new()?;
        session::quit_on_interrupt(session::run_launcher(ctx, &mut frontend))?;
    }
    println!("{}", session::FAREWELL);
    Ok(())
}
