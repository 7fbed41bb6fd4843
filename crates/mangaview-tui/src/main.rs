//! mangaview - a swipeable manga viewer for the terminal.
//!
//! Loads the remote manga manifest (through the offline cache when enabled)
//! and shows one slide per page. Arrow keys or a mouse drag change slides.

mod app;
mod ui;

use std::io;
use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use mangaview_core::api::{HttpNetwork, ManifestClient, Request};
use mangaview_core::cache::{DiskCacheStorage, OfflineCache, PRECACHE_ASSETS};
use mangaview_core::config::Config;
use mangaview_core::models::SlideDeck;
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use app::{App, OfflineStatus};
use ui::input::{handle_key, handle_mouse};
use ui::render::render;

// ============================================================================
// Constants
// ============================================================================

/// Timeout for polling terminal events (in milliseconds)
const EVENT_POLL_TIMEOUT_MS: u64 = 100;

/// Log file prefix inside the cache directory
const LOG_FILE_PREFIX: &str = "mangaview.log";

/// Initialize the tracing subscriber for logging.
///
/// The terminal belongs to the UI, so logs go to a daily file under the
/// cache directory. Use RUST_LOG to control the level (e.g., RUST_LOG=debug).
fn init_tracing(log_dir: &Path) -> WorkerGuard {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .with(filter)
        .init();
    guard
}

/// Fetch the manifest, routed through the offline cache when enabled.
async fn load_deck(config: &Config, cache_dir: &Path) -> Result<(SlideDeck, OfflineStatus)> {
    let network = HttpNetwork::new()?;

    if !config.offline_cache_enabled() {
        let client = ManifestClient::new(network, config.manifest_url());
        return Ok((client.load_manifest().await, OfflineStatus::Disabled));
    }

    let storage = DiskCacheStorage::new(cache_dir.join("caches"))?;
    let interceptor = match OfflineCache::with_assets(
        storage,
        network.clone(),
        config.cache_name(),
        config.origin(),
        &PRECACHE_ASSETS,
    ) {
        Ok(interceptor) => interceptor,
        Err(e) => {
            warn!(error = %e, "Offline cache misconfigured, using the network directly");
            let client = ManifestClient::new(network, config.manifest_url());
            return Ok((client.load_manifest().await, OfflineStatus::Failed(e.to_string())));
        }
    };

    // Installed once per cache name, like a service worker version
    let offline = if interceptor.is_installed().await {
        OfflineStatus::Installed {
            age: cache_age(&interceptor).await,
        }
    } else {
        match interceptor.install().await {
            Ok(_) => OfflineStatus::Installed { age: None },
            Err(e) => {
                warn!(error = %e, "Offline cache install failed");
                OfflineStatus::Failed(e.to_string())
            }
        }
    };

    let client = ManifestClient::new(&interceptor, config.manifest_url());
    Ok((client.load_manifest().await, offline))
}

/// Age of the cached site root, for the status bar.
async fn cache_age(interceptor: &OfflineCache<DiskCacheStorage, HttpNetwork>) -> Option<String> {
    let root: &Request = interceptor.assets().first()?;
    let cache = interceptor
        .storage()
        .open_disk(interceptor.cache_name())
        .await
        .ok()?;
    cache.entry_age(root).await.ok().flatten()
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("Warning: could not read config ({}), using defaults", e);
        Config::default()
    });
    let cache_dir = config.cache_dir()?;
    std::fs::create_dir_all(&cache_dir)?;

    // Initialize logging
    let _log_guard = init_tracing(&cache_dir);
    info!(manifest = config.manifest_url(), "mangaview starting");

    let (deck, offline) = load_deck(&config, &cache_dir).await?;
    let mut app = App::new(deck, offline, config.fullscreen_button_enabled());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    app.terminal_rows = terminal.size()?.height;

    // Main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        error!(error = %e, "Viewer loop failed");
        eprintln!("Error: {}", e);
    }

    info!("mangaview shutting down");
    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| render(f, app))?;

        if event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            match event::read()? {
                Event::Key(key) => {
                    // Ctrl+C to quit
                    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                        return Ok(());
                    }
                    if handle_key(app, key) {
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => handle_mouse(app, mouse),
                Event::Resize(_, rows) => app.terminal_rows = rows,
                _ => {}
            }
        }
    }
}
