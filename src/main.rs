use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

// Declare modules
mod app;
mod client;
mod config;
mod constants;
mod domain;
mod event;
mod handler;
mod network;
mod tui;
mod ui;
mod widgets;

use crate::{
    app::App,
    client::DagClient,
    config::AppConfig,
    constants::TICK_RATE,
    event::{Action, NetworkUpdateEvent},
    handler::handle_event,
    network::NetworkManager,
    tui::Tui,
};

// LazyDag version from Cargo.toml
const VERSION: &str = env!("CARGO_PKG_VERSION");

// ASCII art logo
const LOGO: &str = r#"
██╗      █████╗ ███████╗██╗   ██╗██████╗  █████╗  ██████╗
██║     ██╔══██╗╚══███╔╝╚██╗ ██╔╝██╔══██╗██╔══██╗██╔════╝
██║     ███████║  ███╔╝  ╚████╔╝ ██║  ██║███████║██║  ███╗
██║     ██╔══██║ ███╔╝    ╚██╔╝  ██║  ██║██╔══██║██║   ██║
███████╗██║  ██║███████╗   ██║   ██████╔╝██║  ██║╚██████╔╝
╚══════╝╚═╝  ╚═╝╚══════╝   ╚═╝   ╚═════╝ ╚═╝  ╚═╝ ╚═════╝
"#;

/// LazyDag - Terminal UI for parallel-execution transaction DAGs
#[derive(Parser)]
#[command(version = VERSION, about, long_about = None)]
struct Cli {
    /// Analyzer API base URL (overrides config and environment)
    #[arg(long)]
    api_url: Option<String>,

    /// Block number to open at startup (defaults to the server's head)
    #[arg(long)]
    block: Option<i64>,

    /// Subcommand to run
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Display version with ASCII art
    Version,
}

/// Application entry point
#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    if let Some(Commands::Version) = cli.command {
        println!("{LOGO}");
        println!("LazyDag v{VERSION}");
        println!("A terminal UI for exploring parallel-execution transaction DAGs");
        return Ok(());
    }

    color_eyre::install()?;

    let config = AppConfig::load();
    let api_url = config.resolve_api_url(cli.api_url.as_deref());

    let mut terminal = tui::init()?;
    let mut app = App::new();
    let size = terminal.size()?;
    app.update_terminal_size(size.width, size.height);

    let runtime = tokio::runtime::Handle::current();
    let (network_event_sender, mut network_event_receiver) =
        mpsc::channel::<NetworkUpdateEvent>(100);

    let network_manager = NetworkManager::new(
        DagClient::new(api_url),
        runtime.clone(),
        network_event_sender,
    );

    // Initial data: analyzer progress once, the requested (or head) DAG,
    // then the periodic analyzer poll.
    network_manager.fetch_analyzer_state();
    app.request_block(cli.block, &network_manager);
    network_manager.start_analyzer_poll();

    run_app(
        &mut terminal,
        &mut app,
        &network_manager,
        &mut network_event_receiver,
    )
    .await?;

    tui::restore()?;
    Ok(())
}

/// Main application loop.
async fn run_app(
    terminal: &mut Tui,
    app: &mut App,
    network_manager: &NetworkManager,
    network_event_receiver: &mut mpsc::Receiver<NetworkUpdateEvent>,
) -> Result<()> {
    let mut last_tick = Instant::now();

    loop {
        if app.exit {
            break;
        }

        terminal.draw(|frame| ui::render(app, frame))?;

        // Poll for terminal events with a very small timeout, then check
        // network events and sleep if nothing is pending.
        let terminal_event_ready = crossterm::event::poll(Duration::from_millis(1))?;

        if terminal_event_ready {
            match crossterm::event::read() {
                Ok(event) => {
                    // Handle terminal resize immediately; the next loop
                    // iteration redraws.
                    if let crossterm::event::Event::Resize(width, height) = event {
                        app.update_terminal_size(width, height);
                        continue;
                    }
                    if let Some(action) = handle_event(app, event) {
                        if let Err(e) = app.update(action, network_manager) {
                            app.update(
                                Action::ShowMessage(format!("Error: {e}")),
                                network_manager,
                            )?;
                        }
                    }
                }
                Err(_) => {
                    app.exit = true;
                }
            }
        }

        // Check for network events non-blockingly
        match network_event_receiver.try_recv() {
            Ok(network_event) => {
                let action = match network_event {
                    NetworkUpdateEvent::DagFetched { request_id, result } => {
                        Action::UpdateDag { request_id, result }
                    }
                    NetworkUpdateEvent::AnalyzerStateFetched(res) => {
                        Action::UpdateAnalyzerState(res)
                    }
                };
                if let Err(e) = app.update(action, network_manager) {
                    app.update(
                        Action::ShowMessage(format!("Error: {e}")),
                        network_manager,
                    )?;
                }
            }
            Err(mpsc::error::TryRecvError::Empty) => {}
            Err(mpsc::error::TryRecvError::Disconnected) => {
                app.exit = true;
            }
        }

        if last_tick.elapsed() >= TICK_RATE {
            last_tick = Instant::now();
        }

        // Small sleep to keep CPU usage down when no events are pending
        if !terminal_event_ready {
            let remaining_timeout = TICK_RATE
                .checked_sub(last_tick.elapsed())
                .unwrap_or_else(|| Duration::from_millis(5));
            tokio::time::sleep(remaining_timeout.min(Duration::from_millis(50))).await;
        }
    }
    Ok(())
}
