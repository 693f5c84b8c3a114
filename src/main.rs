//! snapboard - a kanban board with a snapping drag-and-drop engine.
//!
//! This is the main binary that resolves the drag settings and launches the
//! TUI application.

use snapboard_config::{DeviceProfile, Settings};
use snapboard_protocol::dummy::dummy_board;
use snapboard_tui::{App, terminal};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding the log filter. Logging is off without it.
const LOG_ENV: &str = "SNAPBOARD_LOG";

/// Log file, relative to the working directory.
const LOG_FILE: &str = "snapboard.log";

/// Installs a file logger when `SNAPBOARD_LOG` is set.
///
/// The terminal belongs to the UI, so logs never go to stdout or stderr.
fn init_tracing() -> anyhow::Result<()> {
    let Ok(directives) = std::env::var(LOG_ENV) else {
        return Ok(());
    };
    let env_filter = EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new("info"));

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(LOG_FILE)?;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false),
        )
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;

    // A broken settings file should not keep the board from opening
    let profile = DeviceProfile::detect();
    let config = match Settings::load().and_then(|settings| settings.resolve(&profile)) {
        Ok(config) => config,
        Err(err) => {
            warn!(%err, "falling back to the detected preset");
            Settings::default().resolve(&profile)?
        }
    };
    info!(?profile, "starting");

    // Install panic hook to restore terminal on panic
    terminal::install_panic_hook();

    let mut terminal = terminal::setup_terminal()?;
    let mut app = App::new(dummy_board(), config);

    let result = app.run(&mut terminal).await;

    // Always restore terminal, even if app.run() failed
    terminal::restore_terminal(&mut terminal)?;

    result
}
