//! Aircraft icon and callsign label compositing
//!
//! Draws the live layer onto a copy of the static grid in two passes:
//! every icon first, then every label. Table iteration order is hash-map
//! order, so layering must not depend on it; the pass split guarantees a
//! label never ends up underneath an icon drawn later.

use std::collections::HashMap;

use crate::aircraft_tracker::AircraftTable;
use crate::geodata::GeoRect;
use crate::render::grid::{Cell, Grid, Paint};
use crate::render::projector::project;

const AIRCRAFT_GLYPH: char = '✈';

/// Draw the aircraft layer in place.
pub fn composite(grid: &mut Grid, table: &AircraftTable, view: &GeoRect) {
    let width = grid.width();
    let height = grid.height();

    // Pass 1: icons. Aircraft without a position fix are skipped.
    let mut icon_cells: HashMap<&str, (i64, i64)> = HashMap::new();
    for aircraft in table.iter() {
        let Some((lat, lon)) = aircraft.position else {
            continue;
        };
        let (col, row) = project(lon, lat, view, width, height);
        if grid.in_bounds(col, row) {
            grid.set(
                col,
                row,
                Cell {
                    glyph: AIRCRAFT_GLYPH,
                    paint: Paint::Aircraft,
                },
            );
            icon_cells.insert(aircraft.icao.as_str(), (col, row));
        }
    }

    // Pass 2: callsign labels, one row below the icon. Labels only land in
    // blank cells and never wrap past the right edge.
    for aircraft in table.iter() {
        let Some(&(col, row)) = icon_cells.get(aircraft.icao.as_str()) else {
            continue;
        };
        let Some(callsign) = &aircraft.callsign else {
            continue;
        };

        let label_row = row + 1;
        if label_row >= height as i64 {
            continue;
        }

        for (i, ch) in callsign.chars().enumerate() {
            let label_col = col + i as i64;
            if label_col >= width as i64 {
                break;
            }
            if grid.in_bounds(label_col, label_row)
                && grid.get(label_col as usize, label_row as usize).is_blank()
            {
                grid.set(
                    label_col,
                    label_row,
                    Cell {
                        glyph: ch,
                        paint: Paint::Label,
                    },
                );
            }
        }
    }
}
