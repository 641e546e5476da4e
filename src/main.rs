//! Binary entrypoint for mediashow.
//!
//! Headless harness around the library: scans the media folder, runs the
//! controller loop, maps stdin lines through the keyboard table, and logs
//! every published state transition. A graphical shell would replace the
//! stdin/log halves and drive the same channels.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{ArgAction, Parser};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;
use tracing::{Level, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use mediashow::events::{Command, SlideshowSnapshot, VideoSignal};
use mediashow::platform::DesktopPlatform;
use mediashow::{catalog, config, controller, keyboard};

/// Simple CLI
#[derive(Debug, Parser)]
#[command(name = "mediashow", about = "Slideshow viewer for local photo/video folders")]
struct Cli {
    /// Folder to scan for photos and videos
    folder: PathBuf,

    /// Path to the persisted YAML settings file
    #[arg(short, long, value_name = "FILE", default_value = "settings.yaml")]
    settings: PathBuf,

    /// Increase log verbosity (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbosity: u8) -> Result<()> {
    // map -v to log level
    let level = match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::from_default_env()
        .add_directive(format!("mediashow={level}").parse()?);
    fmt().with_env_filter(filter).with_target(true).init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let settings = config::load_settings(&cli.settings);
    info!(
        photo_secs = settings.photo_display_seconds,
        video_secs = settings.video_display_seconds,
        play_to_end = settings.play_video_to_end,
        "settings loaded"
    );

    let (command_tx, command_rx) = mpsc::channel::<Command>(16);
    let (_video_tx, video_rx) = mpsc::channel::<VideoSignal>(16);
    let (state_tx, state_rx) = watch::channel(SlideshowSnapshot::default());
    let cancel = CancellationToken::new();

    let slideshow =
        controller::SlideshowController::new(Vec::new(), settings, Arc::new(DesktopPlatform));
    let controller_task = tokio::spawn(controller::run(
        slideshow,
        command_rx,
        video_rx,
        state_tx,
        cancel.clone(),
    ));

    // Initial catalog load; failure is surfaced, not fatal.
    let initial = match catalog::list_items(&cli.folder) {
        Ok(items) => Command::CatalogLoaded(items),
        Err(err) => Command::CatalogFailed(err.to_string()),
    };
    command_tx.send(initial).await?;

    tokio::spawn(log_state(state_rx));
    tokio::spawn(read_stdin(command_tx));

    tokio::signal::ctrl_c().await?;
    info!("shutting down");
    cancel.cancel();
    controller_task.await??;
    Ok(())
}

/// Log each published state transition.
async fn log_state(mut state_rx: watch::Receiver<SlideshowSnapshot>) {
    let mut last_shown: Option<String> = None;
    while state_rx.changed().await.is_ok() {
        let snap = state_rx.borrow_and_update().clone();
        if let Some(message) = &snap.last_error {
            warn!(%message, "slideshow has no media");
            continue;
        }
        let shown = snap.current_item.as_ref().map(|item| item.id.clone());
        if shown != last_shown {
            match &snap.current_item {
                Some(item) => info!(
                    name = %item.name,
                    position = snap.current_index.map_or(0, |i| i + 1),
                    total = snap.total_count,
                    order = snap.display_order.label(),
                    filter = snap.media_filter.label(),
                    "showing"
                ),
                None => info!("nothing to show"),
            }
            last_shown = shown;
        }
    }
}

/// Map stdin lines (space, left, right, s, f, m, o) onto controller commands.
async fn read_stdin(command_tx: mpsc::Sender<Command>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        let key = line.trim();
        match keyboard::lookup(key) {
            Some(shortcut) => {
                if command_tx.send(shortcut.command()).await.is_err() {
                    break;
                }
            }
            None if key.is_empty() => {}
            None => warn!(key, "unbound key"),
        }
    }
}
