//! Courtside TUI entry point: load config, start the worker, run the event loop.

use std::fs::{self, OpenOptions};
use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::mpsc;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use courtside_core::{config, Config, StatsClient};
use courtside_tui::worker::{self, WorkerCommand};
use courtside_tui::{handle_key, ui, AppState};

const LOG_ENV: &str = "COURTSIDE_LOG";

#[derive(Parser)]
#[command(name = "courtside-tui", version, about = "NBA stats dashboard for the terminal")]
struct Args {
    /// Config file (default: $COURTSIDE_CONFIG, then the user config dir)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Backend base URL, overriding the config file
    #[arg(long)]
    api_url: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref()).context("loading config")?;
    if let Some(url) = args.api_url {
        config.api.base_url = url;
        config.validate().context("--api-url")?;
    }

    // The terminal belongs to the UI, so logs go to a file.
    let log_path = init_logging()?;
    info!(log = %log_path.display(), backend = %config.api.base_url, "courtside starting");

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    let client = StatsClient::from_config(&config.api).context("building HTTP client")?;

    // Worker channels
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();
    let worker_handle =
        worker::spawn_worker(client, cmd_rx, resp_tx).context("spawning worker thread")?;

    let mut app = AppState::new(
        cmd_tx.clone(),
        resp_rx,
        config.default_season,
        config.api.base_url.clone(),
    );
    app.refresh();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    // Shutdown worker; an in-flight request finishes first.
    let _ = cmd_tx.send((app.generation, WorkerCommand::Shutdown));
    let _ = worker_handle.join();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("courtside stopped");
    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        // 1. Render
        terminal.draw(|f| ui::draw(f, app))?;

        // 2. Drain worker responses (non-blocking)
        while let Ok(resp) = app.worker_rx.try_recv() {
            app.apply_response(resp);
        }

        // 3. Poll for input events (50ms timeout for ~20 FPS tick)
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                handle_key(app, key);
            }
        }

        // 4. Check quit
        if !app.running {
            break;
        }
    }
    Ok(())
}

/// Append-mode file logging under the user data dir, filtered by
/// `$COURTSIDE_LOG` (falling back to `$RUST_LOG`, then `info`).
fn init_logging() -> Result<PathBuf> {
    let dir = config::data_dir();
    fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;
    let path = dir.join("courtside-tui.log");
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening {}", path.display()))?;

    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(path)
}
