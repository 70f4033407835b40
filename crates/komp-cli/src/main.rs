//! Komp CLI
//!
//! Terminal client for the competitions backend. With a subcommand it runs
//! headless and prints plain tables; without one it opens the interactive
//! ratatui TUI.

use std::io;
use std::time::Duration;

use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::sync::mpsc;
use tracing::info;

use komp_api::ApiClient;
use komp_cli::app::App;
use komp_cli::commands::{self, Command};
use komp_cli::tasks::{spawn_badge_refresher, Dispatcher, UiMsg};
use komp_cli::ui;
use komp_core::tracing_init::init_tracing;
use komp_core::{config, EventBus, SessionStore};

#[derive(Parser, Debug)]
#[command(name = "komp")]
#[command(version, about = "Competitions client", long_about = None)]
struct Cli {
    /// Backend base URL (overrides config).
    #[arg(long, env = "KOMP_API_URL")]
    api_url: Option<String>,

    /// Emit logs as JSON (headless mode).
    #[arg(long)]
    log_json: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // File-descriptor logging only; TUI mode keeps the terminal clean by
    // defaulting to warnings.
    let is_headless = cli.command.is_some();
    if is_headless {
        init_tracing("komp=info", cli.log_json);
    } else {
        init_tracing("komp=warn", false);
    }

    info!(version = env!("CARGO_PKG_VERSION"), "Starting komp CLI");

    let mut config = config::load_config()?;
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }

    let session = SessionStore::new();
    let client = ApiClient::new(&config.api, session)?;

    if let Some(command) = cli.command {
        commands::run(&client, command).await
    } else {
        run_tui(client, &config.ui).await
    }
}

/// Run the interactive TUI mode.
async fn run_tui(client: ApiClient, ui_config: &config::UiConfig) -> anyhow::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_tui_loop(&mut terminal, client, ui_config).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Main TUI event loop: draw, poll keys, drain background results, tick.
async fn run_tui_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    client: ApiClient,
    ui_config: &config::UiConfig,
) -> anyhow::Result<()>
where
    <B as ratatui::backend::Backend>::Error: std::error::Error + Send + Sync + 'static,
{
    let (tx, mut rx) = mpsc::unbounded_channel::<UiMsg>();
    let bus = EventBus::default();
    let dispatcher = Dispatcher::new(client, tx, bus);

    let mut app = App::new(ui_config.clone(), dispatcher.client().session().user());
    app.load_initial(&dispatcher);

    spawn_badge_refresher(&dispatcher, Duration::from_secs(ui_config.badge_poll_secs));

    loop {
        terminal.draw(|frame| ui::draw(frame, &mut app))?;

        // Poll for terminal events with a short timeout so background
        // results and timers stay responsive.
        let has_terminal_event =
            tokio::task::block_in_place(|| event::poll(Duration::from_millis(50)))?;
        if has_terminal_event {
            let ev = tokio::task::block_in_place(event::read)?;
            if let Event::Key(key) = ev {
                if key.kind != KeyEventKind::Release {
                    app.handle_key(key, &dispatcher);
                }
            }
        }

        // Drain background task results (non-blocking).
        while let Ok(msg) = rx.try_recv() {
            app.handle_msg(msg, &dispatcher);
        }

        app.tick(&dispatcher);

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
