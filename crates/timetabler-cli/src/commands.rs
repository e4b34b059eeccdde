use super::args::{Cli, Commands};
use super::handlers;
use crate::context::AppContext;
use crate::logging;
use anyhow::Result;

pub fn run(cli: Cli) -> Result<()> {
    let ctx = AppContext::from_cli(&cli)?;

    if let Err(e) = logging::init(&ctx.workspace().log_path(), cli.log_level) {
        eprintln!("Warning: logging disabled: {:#}", e);
    }
    tracing::debug!(data_dir = %ctx.data_dir().display(), "starting");

    match cli.command {
        None => handlers::launcher::handle(&ctx),
        Some(Commands::Open { path }) => handlers::open::handle(&ctx, &path),
        Some(Commands::New) => handlers::new::handle(&ctx),
        Some(Commands::List) => handlers::list::handle(&ctx),
        Some(Commands::Validate { path }) => handlers::validate::handle(&ctx, &path),
    }
}
