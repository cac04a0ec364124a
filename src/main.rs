// Entry point for the glass-player landing page
// Sets up file logging, loads the site config and hands over to the TUI.

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use glass_player::config::{SiteConfig, APP_DIR};
use glass_player::ui::app::LandingApp;

// The terminal belongs to the TUI, so logs go to a file in the cache dir.
fn init_logging() -> Result<()> {
    let dir = dirs::cache_dir()
        .context("no cache directory for the log file")?
        .join(APP_DIR);
    fs::create_dir_all(&dir)?;
    let file = File::create(dir.join("glass-player.log"))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Suppress ALSA error messages that pollute TUI
    std::env::set_var("ALSA_PCM_NO_MMAP", "1");

    if let Err(err) = init_logging() {
        eprintln!("logging disabled: {err:#}");
    }

    let config = SiteConfig::load().context("failed to load site config")?;
    tracing::info!(title = %config.title, "starting");

    let mut app = LandingApp::new(config)?;
    app.run().await?;

    tracing::info!("bye");
    Ok(())
}
