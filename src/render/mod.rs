//! Map render engine
//!
//! Ties the viewport, the cached static layer and the aircraft overlay
//! together behind a small command interface. All mutation happens on the
//! single consuming task; a command's effect is visible to the next
//! `render` call.

pub mod grid;
mod overlay;
mod projector;
mod static_layer;
mod viewport;

pub use viewport::RECENTER_ZOOM_MULT;

use crate::aircraft_tracker::AircraftTable;
use crate::geodata::GeometrySource;
use grid::Grid;
use static_layer::StaticLayer;
use viewport::Viewport;

/// Pan step as a fraction of the current view extent.
const PAN_FRACTION: f64 = 0.1;

/// Zoom-out multiplier per step; zoom-in uses the reciprocal.
const ZOOM_STEP: f64 = 1.2;

/// Discrete view mutations, dispatched statelessly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MapCommand {
    PanUp,
    PanDown,
    PanLeft,
    PanRight,
    ZoomIn,
    ZoomOut,
    Reset,
    Recenter { lat: f64, lon: f64 },
}

pub struct MapEngine {
    geometry: GeometrySource,
    viewport: Viewport,
    static_layer: StaticLayer,
}

impl MapEngine {
    /// An empty geometry set is valid and degrades to an all-blank basemap.
    pub fn new(geometry: GeometrySource) -> Self {
        let viewport = Viewport::new(geometry.bounds);
        Self {
            geometry,
            viewport,
            static_layer: StaticLayer::new(),
        }
    }

    pub fn apply(&mut self, command: MapCommand) {
        match command {
            MapCommand::PanUp => self.viewport.pan(0.0, PAN_FRACTION),
            MapCommand::PanDown => self.viewport.pan(0.0, -PAN_FRACTION),
            MapCommand::PanLeft => self.viewport.pan(-PAN_FRACTION, 0.0),
            MapCommand::PanRight => self.viewport.pan(PAN_FRACTION, 0.0),
            MapCommand::ZoomIn => self.viewport.zoom(1.0 / ZOOM_STEP),
            MapCommand::ZoomOut => self.viewport.zoom(ZOOM_STEP),
            MapCommand::Reset => self.viewport.reset(),
            MapCommand::Recenter { lat, lon } => {
                self.viewport.recenter(lat, lon, RECENTER_ZOOM_MULT)
            }
        }
    }

    /// Magnification relative to the full extent, for the footer readout.
    pub fn zoom_level(&self) -> f64 {
        self.viewport.zoom_level()
    }

    /// Produce the composited frame: cached basemap copy plus the live
    /// aircraft layer. Dimensions may change freely between calls; a
    /// mismatch against the cache forces exactly one rebuild.
    pub fn render(&mut self, table: &AircraftTable, width: usize, height: usize) -> Grid {
        let mut grid =
            self.static_layer
                .grid(&self.geometry, &mut self.viewport, width, height);
        overlay::composite(&mut grid, table, self.viewport.view());
        grid
    }

    #[cfg(test)]
    pub(crate) fn rebuilds(&self) -> u64 {
        self.static_layer.rebuilds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geodata::{GeoPoint, PolyShape};
    use crate::sbs::SbsMessage;

    fn engine() -> MapEngine {
        let outline: Vec<(f64, f64)> = (0..=60)
            .map(|i| {
                let t = i as f64 / 60.0;
                (-100.0 + 200.0 * t, -50.0 + 100.0 * t)
            })
            .collect();
        MapEngine::new(GeometrySource::new(
            vec![PolyShape::new(outline)],
            vec![GeoPoint { x: 0.0, y: 0.0 }],
        ))
    }

    #[test]
    fn test_render_is_stable_without_commands() {
        let mut engine = engine();
        let table = AircraftTable::new();
        let a = engine.render(&table, 40, 20);
        let b = engine.render(&table, 40, 20);
        assert_eq!(a, b);
        assert_eq!(engine.rebuilds(), 1);
    }

    #[test]
    fn test_each_command_triggers_one_rebuild() {
        let mut engine = engine();
        let table = AircraftTable::new();
        engine.render(&table, 40, 20);

        for command in [
            MapCommand::PanLeft,
            MapCommand::ZoomIn,
            MapCommand::Reset,
            MapCommand::Recenter { lat: 10.0, lon: 10.0 },
        ] {
            let before = engine.rebuilds();
            engine.apply(command);
            engine.render(&table, 40, 20);
            engine.render(&table, 40, 20);
            assert_eq!(engine.rebuilds(), before + 1, "command {command:?}");
        }
    }

    #[test]
    fn test_resize_invalidates_without_a_command() {
        let mut engine = engine();
        let table = AircraftTable::new();
        engine.render(&table, 40, 20);
        let resized = engine.render(&table, 50, 22);
        assert_eq!(engine.rebuilds(), 2);
        assert_eq!(resized.width(), 50);
        assert_eq!(resized.height(), 22);
    }

    #[test]
    fn test_zoom_level_tracks_commands() {
        let mut engine = engine();
        assert!((engine.zoom_level() - 1.0).abs() < 1e-9);
        engine.apply(MapCommand::ZoomIn);
        assert!((engine.zoom_level() - ZOOM_STEP).abs() < 1e-9);
        engine.apply(MapCommand::ZoomOut);
        assert!((engine.zoom_level() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_aircraft_drawn_over_basemap() {
        let mut engine = engine();
        let mut table = AircraftTable::new();
        table.apply(SbsMessage::Position {
            icao: "A1".into(),
            lat: 10.0,
            lon: 10.0,
        });
        let grid = engine.render(&table, 60, 24);
        let mut found = false;
        for row in 0..grid.height() {
            for col in 0..grid.width() {
                if grid.get(col, row).paint == grid::Paint::Aircraft {
                    found = true;
                }
            }
        }
        assert!(found);
    }

    #[test]
    fn test_degenerate_dimensions_clamp() {
        let mut engine = engine();
        let table = AircraftTable::new();
        let grid = engine.render(&table, 0, 0);
        assert_eq!(grid.width(), 1);
        assert_eq!(grid.height(), 1);
    }
}
