use anyhow::Result;
use clap::Parser;
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

use veritui::api::{ApiData, ApiMessage};
use veritui::app::{App, Command};
use veritui::config::Config;
use veritui::{logging, ui};

#[derive(Parser, Debug)]
#[command(name = "veritui", version, about = "Terminal client for a fake news detection service")]
struct Args {
    /// Path to a config file (defaults to the user config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the API base URL
    #[arg(short, long)]
    server: Option<String>,

    /// Override the log filter (e.g. "debug" or "veritui=trace")
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref())?;
    config.apply_overrides(args.server, args.log_level);

    let _log_guard = logging::init_tracing(&config.logging)?;
    tracing::info!(server = %config.server.base_url, "starting veritui");

    let terminal = ratatui::init();
    let result = run(terminal, config).await;
    ratatui::restore();

    result
}

async fn run(mut terminal: ratatui::DefaultTerminal, config: Config) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<ApiMessage>();
    let mut app = App::new(&config);

    let mut events = EventStream::new();
    let mut tick = tokio::time::interval(Duration::from_millis(250));

    // One deferred refresh shortly after startup, not a poll
    let bootstrap = tokio::time::sleep(Duration::from_millis(
        config.server.startup_fetch_delay_ms,
    ));
    tokio::pin!(bootstrap);
    let mut bootstrapped = false;

    loop {
        terminal.draw(|frame| ui::draw(frame, &app))?;

        tokio::select! {
            maybe_event = events.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        if let Some(command) = app.on_key(key) {
                            spawn_fetch(tx.clone(), command);
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(error)) => {
                        tracing::error!(%error, "terminal event stream error");
                    }
                    None => break,
                }
            }
            Some(message) = rx.recv() => {
                app.apply_message(message);
            }
            _ = tick.tick() => {
                app.tick(Instant::now());
            }
            _ = &mut bootstrap, if !bootstrapped => {
                bootstrapped = true;
                if let Some(command) = app.refresh_news() {
                    spawn_fetch(tx.clone(), command);
                }
            }
        }

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}

/// Drive a prepared remote call to completion on the runtime and hand
/// the outcome back to the app. Failures become an Error payload; the
/// underlying cause only goes to the log.
fn spawn_fetch(tx: mpsc::UnboundedSender<ApiMessage>, command: Command) {
    tokio::spawn(async move {
        let data = match command.fetcher.fetch().await {
            Ok(data) => data,
            Err(error) => {
                tracing::error!(%error, panel = ?command.panel, "fetch failed");
                ApiData::Error(error.to_string())
            }
        };

        let _ = tx.send(ApiMessage {
            panel: command.panel,
            data,
        });
    });
}
