use std::io::{self, Stdout};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::runtime::Runtime;
use tracing::{error, info};

use mview::app::App;
use mview::cli::{failure_report, Cli};
use mview::config;
use mview::gateway::MongoGateway;
use mview::nav::Navigator;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = cli
        .connection_string()
        .map_err(anyhow::Error::from)
        .and_then(|uri| run(&cli, &uri));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            let (message, status) = failure_report(&e);
            eprintln!("Error: {message}");
            if status == 2 {
                eprintln!("Run `mview --help` for usage.");
            }
            ExitCode::from(status)
        }
    }
}

fn run(cli: &Cli, uri: &str) -> Result<()> {
    // An explicit --config must load; the default location falls back to defaults.
    let cfg = match &cli.config {
        Some(path) => config::load_config_from(path)?,
        None => config::load_config().unwrap_or_else(|e| {
            eprintln!("Warning: Failed to load config: {:#}", e);
            config::Config::default()
        }),
    };

    let _log_guard = mview::logging::init(&cfg.log).unwrap_or_else(|e| {
        eprintln!("Warning: logging disabled: {:#}", e);
        None
    });
    info!(version = env!("CARGO_PKG_VERSION"), "starting mview");

    let rt = Runtime::new().context("failed to initialize tokio runtime")?;

    let gateway = MongoGateway::connect(rt.handle().clone(), uri, &cfg.connection)
        .context("failed to connect to mongodb")?;

    let mut nav = Navigator::new(gateway, cfg.browse.document_limit);
    nav.start().context("failed to list databases")?;

    let mut terminal =
        init_terminal().context("failed to initialize terminal; are you running in a real TTY?")?;

    let mut app = App::new(nav, &cfg.display);
    let res = app.run(&mut terminal);

    restore_terminal(terminal)?;
    info!("exiting");
    res
}

fn init_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    undo_on_error(enter_screen(), || {
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = disable_raw_mode();
    })
}

fn enter_screen() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Run `undo` if `result` is an error, then hand the result back.
fn undo_on_error<T>(result: Result<T>, undo: impl FnOnce()) -> Result<T> {
    if result.is_err() {
        undo();
    }
    result
}

fn restore_terminal(mut terminal: Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
