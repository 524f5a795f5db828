//! Binary entry point: load settings, start file logging, wire the drafting
//! client and drive the Ratatui event loop until the user exits.
use std::sync::Arc;

use anyhow::Context;
use event_proposal::config::{self, Settings};
use event_proposal::drafting::GeminiClient;
use event_proposal::logging::init_logging;
use event_proposal::{run_app, App};

const EXPORT_DIR_NAME: &str = "propostas";

fn main() -> anyhow::Result<()> {
    let (settings, config_error) = Settings::load();
    let data_dir = config::data_dir()?;
    init_logging(&data_dir, settings.level_filter())?;
    if let Some(err) = &config_error {
        log::warn!("ignoring config file: {err:#}");
    }
    log::info!(
        "starting with model {} (api key {})",
        settings.model,
        if settings.has_api_key() { "set" } else { "missing" }
    );

    let client = GeminiClient::new(&settings).context("failed to build drafting client")?;
    let mut app = App::new(&settings, Arc::new(client), data_dir.join(EXPORT_DIR_NAME));
    if let Some(err) = &config_error {
        app.report_startup_error(err);
    }
    let result = run_app(&mut app);
    if let Err(err) = &result {
        log::error!("terminal loop failed: {err:#}");
    }
    result
}
