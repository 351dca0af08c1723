use std::path::PathBuf;

use clap::Parser;

/// Three-pane notes for the terminal.
#[derive(Debug, Parser)]
#[command(name = "notepane", version, about)]
pub struct Config {
    /// SQLite file holding folders and notes
    #[arg(long, env = "NOTEPANE_DB", default_value = "notes.db")]
    pub db: PathBuf,

    /// Keep everything in memory; nothing survives exit
    #[arg(long)]
    pub in_memory: bool,

    /// Where logs go (the terminal is taken by the UI)
    #[arg(long, env = "NOTEPANE_LOG_FILE", default_value = "notepane.log")]
    pub log_file: PathBuf,

    /// tracing filter directive, e.g. `debug` or `notepane=trace`
    #[arg(long, env = "NOTEPANE_LOG", default_value = "info")]
    pub log_level: String,
}
