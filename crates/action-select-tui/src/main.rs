use anyhow::{Context, Result};
use ratatui::{
    backend::CrosstermBackend,
    crossterm::{
        event::{self, DisableMouseCapture, EnableMouseCapture},
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    },
    Terminal,
};
use std::io;
use std::time::Duration;

mod app;
mod logger;
mod service;

use action_select_config::AppConfig;
use app::App;
use service::ServiceConnection;

const USAGE: &str = "Usage: action-select [--] [service command...]";

/// How long to wait for terminal input before checking the service again
const POLL_INTERVAL: Duration = Duration::from_millis(50);

fn main() -> Result<()> {
    logger::init();

    let service_command = match parse_cli(std::env::args().skip(1).collect()) {
        Cli::Help => {
            println!("{}", USAGE);
            return Ok(());
        }
        Cli::Run { service_command } => service_command,
    };

    let mut config = AppConfig::load();
    if config.override_service(service_command) {
        log::info!("Service command taken from the command line");
    }
    let connection = {
        let (program, args) = config.service()?;
        log::info!("Action service command: {} {:?}", program, args);
        ServiceConnection::spawn(program, args)?
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config, connection);

    // Main event loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    let (invocation, connection) = app.finish();
    connection.shutdown();

    if let Err(err) = result {
        log::error!("{:#}", err);
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }

    match invocation {
        Some(invocation) => {
            log::info!("Invoked '{}' with {:?}", invocation.key, invocation.args);
            let output = serde_json::json!({
                "key": invocation.key,
                "args": invocation.args,
            });
            println!("{}", output);
        }
        None => log::info!("Palette dismissed"),
    }

    log::info!("Exiting action-select");
    Ok(())
}

/// Parsed command line
#[derive(Debug, PartialEq, Eq)]
enum Cli {
    Help,
    /// Run with this service command (empty: use the configured one)
    Run { service_command: Vec<String> },
}

/// Only a leading `-h`/`--help` is ours; everything else, and everything
/// after a leading `--`, belongs to the service command.
fn parse_cli(mut args: Vec<String>) -> Cli {
    if args.first().is_some_and(|arg| arg == "-h" || arg == "--help") {
        return Cli::Help;
    }
    if args.first().is_some_and(|arg| arg == "--") {
        args.remove(0);
    }
    Cli::Run {
        service_command: args,
    }
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<ServiceConnection>,
) -> Result<()> {
    app.start()?;

    while app.is_running() {
        terminal
            .draw(|frame| app.render(frame))
            .context("Failed to draw palette")?;

        if event::poll(POLL_INTERVAL)? {
            app.handle_terminal_event(event::read()?)?;
        }

        let events = app.service().drain();
        for event in events {
            app.handle_service_event(event)?;
        }
    }

    Ok(())
}
