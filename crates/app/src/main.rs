use anyhow::{Context, Result};
use log::LevelFilter;
use simplelog::{ColorChoice, CombinedLogger, TermLogger, TerminalMode, WriteLogger};
use snip_vision_core::{Config, ui};
use std::fs::OpenOptions;

/// Rolling log of informational and error events.
const LOG_FILE: &str = "vision.log";

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    snip_vision_core::init();

    init_logging().context("Failed to initialize logging")?;

    // Missing credentials abort here, before any window is shown
    let config = Config::load().context(
        "Failed to load configuration. Set OPENAI_API_KEY in the environment or a .env file",
    )?;

    log::info!("Snip Vision starting up");

    ui::run_app(config).context("UI terminated with an error")?;

    Ok(())
}

fn init_logging() -> Result<()> {
    let log_file = OpenOptions::new().create(true).append(true).open(LOG_FILE)?;

    CombinedLogger::init(vec![
        TermLogger::new(
            LevelFilter::Info,
            simplelog::Config::default(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ),
        WriteLogger::new(LevelFilter::Info, simplelog::Config::default(), log_file),
    ])?;

    Ok(())
}
