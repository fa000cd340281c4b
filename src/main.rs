//! skywatch - terminal flight tracker
//!
//! Connects to an SBS BaseStation feed, merges updates into a per-aircraft
//! table, and renders the fleet over a pannable/zoomable ASCII basemap.
//! The feed runs as a producer task; all state mutation and rendering
//! happen on this event loop, with rendering driven by a fixed tick so the
//! frame cost stays bounded no matter how fast the feed talks.

mod aircraft_tracker;
mod app;
mod config;
mod geodata;
mod render;
mod sbs;
mod ui;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use ratatui::DefaultTerminal;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use app::App;
use config::Config;
use geodata::GeometrySource;
use render::MapEngine;
use sbs::FeedEvent;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env();

    // The TUI owns stdout, so logs go to a file
    let log_file = std::fs::File::create(&config.log_path)
        .with_context(|| format!("failed to open log file {}", config.log_path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .init();

    info!("skywatch starting");
    info!("  Feed: {}", config.feed_addr);
    info!("  Basemap: {}", config.basemap_path.display());
    info!("  Airports: {}", config.airports_path.display());

    // Geometry problems surface here, before any terminal state changes
    let polygons = geodata::load_basemap(&config.basemap_path)
        .context("loading basemap geometry")?;
    let airports = geodata::load_airports(&config.airports_path)
        .context("loading airport geometry")?;
    let geometry = GeometrySource::new(polygons, airports);
    info!(
        "Loaded {} outlines, {} airports, bounds ({:.2}, {:.2})..({:.2}, {:.2})",
        geometry.polygons.len(),
        geometry.airports.len(),
        geometry.bounds.min_x,
        geometry.bounds.min_y,
        geometry.bounds.max_x,
        geometry.bounds.max_y
    );

    let (feed_tx, feed_rx) = mpsc::channel::<FeedEvent>(1024);
    let feed_task = tokio::spawn(sbs::run_feed(config.feed_addr.clone(), feed_tx));

    let mut app = App::new(MapEngine::new(geometry));

    let terminal = ratatui::init();
    let result = run(terminal, &mut app, feed_rx, config.render_tick_ms).await;
    ratatui::restore();

    feed_task.abort();
    info!(
        "Shutdown complete. {} aircraft tracked this session.",
        app.table.len()
    );
    result
}

/// Single consuming event loop: feed messages and key presses mutate
/// state, the tick renders it.
async fn run(
    mut terminal: DefaultTerminal,
    app: &mut App,
    mut feed_rx: mpsc::Receiver<FeedEvent>,
    tick_ms: u64,
) -> Result<()> {
    let mut events = EventStream::new();
    let mut tick = tokio::time::interval(Duration::from_millis(tick_ms.max(1)));
    let mut feed_open = true;

    loop {
        tokio::select! {
            _ = tick.tick() => {
                terminal
                    .draw(|frame| ui::draw(frame, app))
                    .context("drawing frame")?;
            }

            event = feed_rx.recv(), if feed_open => {
                match event {
                    Some(event) => app.on_feed_event(event),
                    // Closed channel: the feed task already posted Lost
                    None => feed_open = false,
                }
            }

            event = events.next() => {
                match event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        if app.on_key(key) {
                            return Ok(());
                        }
                    }
                    // Resize needs no handling: the engine's cache compares
                    // dimensions on the next draw
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e).context("reading terminal events"),
                    None => return Ok(()),
                }
            }
        }
    }
}
