//! Configuration loaded from environment variables

use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// SBS BaseStation feed address
    pub feed_addr: String,

    /// GeoJSON file with boundary/coastline outlines
    pub basemap_path: PathBuf,

    /// GeoJSON file with airport points
    pub airports_path: PathBuf,

    /// Render tick interval in milliseconds
    pub render_tick_ms: u64,

    /// Log file path (stdout belongs to the TUI)
    pub log_path: PathBuf,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            feed_addr: std::env::var("FEED_ADDR")
                .unwrap_or_else(|_| "localhost:30003".to_string()),

            basemap_path: std::env::var("BASEMAP_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("mapdata/basemap.geojson")),

            airports_path: std::env::var("AIRPORTS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("mapdata/airports.geojson")),

            render_tick_ms: std::env::var("RENDER_TICK_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(50), // ~20 Hz, independent of feed rate

            log_path: std::env::var("SKYWATCH_LOG")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("skywatch.log")),
        }
    }
}
