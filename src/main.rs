mod app;
mod config;
mod db;
mod error;
mod logging;
mod models;
mod panes;
mod selection;
mod store;

use clap::Parser;
use tracing::info;

use crate::{app::App, config::Config, db::Database};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let config = Config::parse();
    let _log_guard = logging::init_logging(&config)?;
    info!(version = env!("CARGO_PKG_VERSION"), "starting notepane");

    let db = if config.in_memory {
        Database::open_in_memory()?
    } else {
        Database::new(&config.db)?
    };
    let mut app = App::new(db)?;
    ratatui::run(|t| app.run(t))?;

    info!("exiting");
    Ok(())
}
