//! SBS BaseStation line parser
//!
//! BaseStation (port 30003) lines are comma-separated; field 1 is the
//! transmission type, field 4 the ICAO hex id. Only types 1 (callsign),
//! 3 (position) and 4 (velocity) carry data this tracker uses, so each
//! maps to its own variant and everything else is discarded.

/// One decoded partial aircraft update.
#[derive(Debug, Clone, PartialEq)]
pub enum SbsMessage {
    Identification {
        icao: String,
        callsign: String,
    },
    Position {
        icao: String,
        lat: f64,
        lon: f64,
    },
    Velocity {
        icao: String,
        ground_speed_kts: f64,
        track_deg: f64,
    },
}

impl SbsMessage {
    pub fn icao(&self) -> &str {
        match self {
            SbsMessage::Identification { icao, .. } => icao,
            SbsMessage::Position { icao, .. } => icao,
            SbsMessage::Velocity { icao, .. } => icao,
        }
    }
}

/// Parse a single feed line. Returns `None` for anything that is not a
/// usable MSG record: wrong prefix, too few fields, empty ICAO id,
/// unrecognized type, or a recognized type with no usable payload.
pub fn parse_line(line: &str) -> Option<SbsMessage> {
    let fields: Vec<&str> = line.trim().split(',').collect();
    if fields.len() < 11 || fields[0] != "MSG" {
        return None;
    }

    let icao = fields[4].trim();
    if icao.is_empty() {
        return None;
    }

    match fields[1] {
        "1" => {
            let callsign = fields[10].trim();
            if callsign.is_empty() {
                return None;
            }
            Some(SbsMessage::Identification {
                icao: icao.to_string(),
                callsign: callsign.to_string(),
            })
        }
        "3" => {
            if fields.len() < 16 {
                return None;
            }
            let lat: f64 = fields[14].trim().parse().ok()?;
            let lon: f64 = fields[15].trim().parse().ok()?;
            // The exact (0, 0) pair is the upstream no-fix sentinel, not a
            // position on the prime meridian.
            if lat == 0.0 && lon == 0.0 {
                return None;
            }
            Some(SbsMessage::Position {
                icao: icao.to_string(),
                lat,
                lon,
            })
        }
        "4" => {
            if fields.len() < 14 {
                return None;
            }
            let ground_speed_kts: f64 = fields[11].trim().parse().ok()?;
            let track_deg: f64 = fields[12].trim().parse().ok()?;
            if ground_speed_kts == 0.0 && track_deg == 0.0 {
                return None;
            }
            Some(SbsMessage::Velocity {
                icao: icao.to_string(),
                ground_speed_kts,
                track_deg,
            })
        }
        _ => None,
    }
}
