//! Application state: aircraft table, map engine, feed status
//!
//! Everything here is mutated from the single consuming event loop. The
//! feed task never touches this struct; it only posts `FeedEvent`s.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{info, warn};

use crate::aircraft_tracker::AircraftTable;
use crate::render::{MapCommand, MapEngine};
use crate::sbs::{FeedEvent, SbsMessage};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedStatus {
    Connecting,
    Live,
    Lost(String),
}

pub struct App {
    pub table: AircraftTable,
    pub engine: MapEngine,
    pub feed_status: FeedStatus,
    auto_centered: bool,
}

impl App {
    pub fn new(engine: MapEngine) -> Self {
        Self {
            table: AircraftTable::new(),
            engine,
            feed_status: FeedStatus::Connecting,
            auto_centered: false,
        }
    }

    /// Merge a feed event into the table. The first position fix of the
    /// session recenters the map on that aircraft, once.
    pub fn on_feed_event(&mut self, event: FeedEvent) {
        match event {
            FeedEvent::Message(msg) => {
                if self.feed_status == FeedStatus::Connecting {
                    self.feed_status = FeedStatus::Live;
                }
                if !self.auto_centered {
                    if let SbsMessage::Position { lat, lon, .. } = &msg {
                        info!("First contact at ({:.4}, {:.4}), centering view", lat, lon);
                        self.engine.apply(MapCommand::Recenter {
                            lat: *lat,
                            lon: *lon,
                        });
                        self.auto_centered = true;
                    }
                }
                self.table.apply(msg);
            }
            FeedEvent::Lost(reason) => {
                warn!("Feed lost: {}", reason);
                self.feed_status = FeedStatus::Lost(reason);
            }
        }
    }

    /// Handle a key press. Returns true when the app should quit.
    pub fn on_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return true,

            KeyCode::Up | KeyCode::Char('k') => self.engine.apply(MapCommand::PanUp),
            KeyCode::Down | KeyCode::Char('l') => self.engine.apply(MapCommand::PanDown),
            KeyCode::Left | KeyCode::Char('j') => self.engine.apply(MapCommand::PanLeft),
            KeyCode::Right | KeyCode::Char(';') => self.engine.apply(MapCommand::PanRight),

            KeyCode::Char('+') | KeyCode::Char('K') => self.engine.apply(MapCommand::ZoomIn),
            KeyCode::Char('-') | KeyCode::Char('L') => self.engine.apply(MapCommand::ZoomOut),

            KeyCode::Char('r') => self.engine.apply(MapCommand::Reset),
            _ => {}
        }
        false
    }
}
