//! Aircraft state tracking and aggregation
//!
//! Merges partial SBS updates into one record per aircraft. Fields are
//! last-writer-wins: a message only ever fills or replaces the fields it
//! carries, so a blank callsign or a missing position never erases data
//! learned earlier. Records are kept for the whole session; staleness is
//! observable through `last_seen` but pruning is left to a future layer.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::sbs::SbsMessage;

/// Aircraft counted as "active" in the header readout if seen within this
/// window.
const ACTIVE_WINDOW_SECS: u64 = 60;

/// Merged state of a single aircraft.
#[derive(Debug, Clone)]
pub struct Aircraft {
    /// ICAO hex identifier from the feed
    pub icao: String,
    /// Flight callsign, once one has been reported
    pub callsign: Option<String>,
    /// Last known fix as (lat, lon)
    pub position: Option<(f64, f64)>,
    /// Ground speed in knots
    pub ground_speed_kts: Option<f64>,
    /// Track over ground in degrees
    pub track_deg: Option<f64>,
    /// Last update time
    pub last_seen: Instant,
}

impl Aircraft {
    fn new(icao: String) -> Self {
        Self {
            icao,
            callsign: None,
            position: None,
            ground_speed_kts: None,
            track_deg: None,
            last_seen: Instant::now(),
        }
    }

    pub fn age(&self) -> Duration {
        self.last_seen.elapsed()
    }
}

/// The session-wide aircraft table, keyed by ICAO id.
#[derive(Debug, Default)]
pub struct AircraftTable {
    aircraft: HashMap<String, Aircraft>,
}

impl AircraftTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one feed message, creating the record on first sighting.
    /// Returns the merged record.
    pub fn apply(&mut self, msg: SbsMessage) -> &Aircraft {
        let icao = msg.icao().to_string();
        let entry = self.aircraft.entry(icao.clone()).or_insert_with(|| {
            debug!("New aircraft tracked: {}", icao);
            Aircraft::new(icao.clone())
        });

        match msg {
            SbsMessage::Identification { callsign, .. } => {
                if !callsign.is_empty() {
                    entry.callsign = Some(callsign);
                }
            }
            SbsMessage::Position { lat, lon, .. } => {
                if lat != 0.0 || lon != 0.0 {
                    entry.position = Some((lat, lon));
                }
            }
            SbsMessage::Velocity {
                ground_speed_kts,
                track_deg,
                ..
            } => {
                if ground_speed_kts != 0.0 {
                    entry.ground_speed_kts = Some(ground_speed_kts);
                }
                if track_deg != 0.0 {
                    entry.track_deg = Some(track_deg);
                }
            }
        }
        entry.last_seen = Instant::now();
        entry
    }

    pub fn get(&self, icao: &str) -> Option<&Aircraft> {
        self.aircraft.get(icao)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Aircraft> {
        self.aircraft.values()
    }

    pub fn len(&self) -> usize {
        self.aircraft.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aircraft.is_empty()
    }

    /// Aircraft seen within the activity window.
    pub fn active_count(&self) -> usize {
        self.aircraft
            .values()
            .filter(|a| a.age() < Duration::from_secs(ACTIVE_WINDOW_SECS))
            .count()
    }

    /// Aircraft with a position fix.
    pub fn fix_count(&self) -> usize {
        self.aircraft
            .values()
            .filter(|a| a.position.is_some())
            .count()
    }
}
