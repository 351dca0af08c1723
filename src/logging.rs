use std::fs::OpenOptions;

use color_eyre::eyre::{WrapErr, eyre};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Sends `tracing` output to the configured log file.
///
/// The returned guard flushes pending lines on drop, so keep it alive until
/// the program exits.
pub fn init_logging(config: &Config) -> color_eyre::Result<WorkerGuard> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)
        .wrap_err_with(|| format!("failed to open log file {}", config.log_file.display()))?;

    let filter = EnvFilter::try_new(&config.log_level)
        .wrap_err_with(|| format!("invalid log filter {:?}", config.log_level))?;
    let (writer, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_env_filter(filter)
        .with_ansi(false)
        .try_init()
        .map_err(|err| eyre!("failed to install log subscriber: {err}"))?;

    Ok(guard)
}
