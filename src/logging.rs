//! File-only logging. The terminal belongs to the TUI, so nothing is ever
//! written to stdout or stderr once the alternate screen is up.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::LevelFilter;

const LOG_DIR_NAME: &str = "logs";
const LOG_FILE_NAME: &str = "proposta.log";

/// Install the global logger, appending to `<data_dir>/logs/proposta.log`.
/// Returns the log file path so it can be mentioned on fatal errors.
pub fn init_logging(data_dir: &Path, level: LevelFilter) -> Result<PathBuf> {
    let log_dir = data_dir.join(LOG_DIR_NAME);
    fs::create_dir_all(&log_dir).context("failed to create log directory")?;
    let log_path = log_dir.join(LOG_FILE_NAME);

    fern::Dispatch::new()
        .level(level)
        // reqwest/hyper are chatty at debug level.
        .level_for("hyper", LevelFilter::Warn)
        .level_for("hyper_util", LevelFilter::Warn)
        .level_for("reqwest", LevelFilter::Warn)
        .level_for("rustls", LevelFilter::Warn)
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} [{}] {}: {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .chain(fern::log_file(&log_path).context("failed to open log file")?)
        .apply()
        .context("logger already initialised")?;

    log::info!("logging to {}", log_path.display());
    Ok(log_path)
}
