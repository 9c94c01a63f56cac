//! CraftLaunch - a decorative game launcher for the terminal
//!
//! Entry point: sets up logging and the terminal, then hands off to the app.

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod app;
mod config;
mod launcher;
mod themes;
mod ui;
mod views;

use app::App;
use config::LauncherSettings;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing()?;

    // A broken settings file should not keep the launcher from opening
    let (settings, settings_error) = match LauncherSettings::load() {
        Ok(settings) => (settings, None),
        Err(e) => {
            warn!("Falling back to default settings: {:#}", e);
            (LauncherSettings::default(), Some(format!("{:#}", e)))
        }
    };
    info!("Loaded settings for launcher {}", settings.version);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let mut app = App::new(settings);
    if let Some(message) = settings_error {
        app.report_error("Settings not loaded, using defaults", message);
    }
    let result = app.run().await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen, DisableMouseCapture)?;

    result
}

/// Log to a file, the terminal belongs to the UI
fn init_tracing() -> Result<()> {
    let path = config::log_file();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("craftlaunch=info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}
