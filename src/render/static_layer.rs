//! Cached rasterization of the static basemap
//!
//! Rebuilding the geometry layer is the expensive part of a frame, so it
//! is memoized and only redone when the viewport moved or the grid size
//! changed. Handed-out grids are deep copies; overlay drawing can never
//! corrupt the cache.

use tracing::debug;

use crate::geodata::GeometrySource;
use crate::render::grid::{Cell, Grid, Paint};
use crate::render::projector::project;
use crate::render::viewport::Viewport;

/// Draw every Nth outline vertex. Density control, not correctness.
const VERTEX_STEP: usize = 3;

const MAP_GLYPH: char = '.';
const AIRPORT_GLYPH: char = '*';

#[derive(Debug, Default)]
pub struct StaticLayer {
    cached: Option<Grid>,
    rebuilds: u64,
}

impl StaticLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of full rasterizations performed so far.
    pub fn rebuilds(&self) -> u64 {
        self.rebuilds
    }

    /// Return a copy of the basemap grid for the requested dimensions,
    /// re-rasterizing first if the viewport moved, no cache exists yet, or
    /// the cached dimensions differ.
    pub fn grid(
        &mut self,
        geometry: &GeometrySource,
        viewport: &mut Viewport,
        width: usize,
        height: usize,
    ) -> Grid {
        let width = width.max(1);
        let height = height.max(1);

        let moved = viewport.take_dirty();
        let stale = match &self.cached {
            Some(grid) => moved || grid.width() != width || grid.height() != height,
            None => true,
        };

        if stale {
            self.cached = Some(rasterize(geometry, viewport, width, height));
            self.rebuilds += 1;
            debug!(
                "Static layer rebuilt ({}x{}, {} rebuilds total)",
                width, height, self.rebuilds
            );
        }

        match &self.cached {
            Some(grid) => grid.clone(),
            None => Grid::blank(width, height),
        }
    }
}

fn rasterize(
    geometry: &GeometrySource,
    viewport: &Viewport,
    width: usize,
    height: usize,
) -> Grid {
    let mut grid = Grid::blank(width, height);
    let view = viewport.view();

    for poly in &geometry.polygons {
        if !poly.bounds.intersects(view) {
            continue;
        }
        for &(x, y) in poly.vertices.iter().step_by(VERTEX_STEP) {
            let (col, row) = project(x, y, view, width, height);
            grid.set(
                col,
                row,
                Cell {
                    glyph: MAP_GLYPH,
                    paint: Paint::Map,
                },
            );
        }
    }

    // Airports take visual priority over plain geometry.
    for airport in &geometry.airports {
        let (col, row) = project(airport.x, airport.y, view, width, height);
        grid.set(
            col,
            row,
            Cell {
                glyph: AIRPORT_GLYPH,
                paint: Paint::Airport,
            },
        );
    }

    grid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geodata::{GeoPoint, GeoRect, PolyShape};

    fn cross_geometry() -> GeometrySource {
        // Dense diagonal so subsampling still leaves marks on screen
        let vertices: Vec<(f64, f64)> = (0..=100)
            .map(|i| {
                let t = i as f64 / 100.0;
                (-10.0 + 20.0 * t, -10.0 + 20.0 * t)
            })
            .collect();
        GeometrySource::new(
            vec![PolyShape::new(vertices)],
            vec![GeoPoint { x: 0.0, y: 0.0 }],
        )
    }

    fn count_paint(grid: &Grid, paint: Paint) -> usize {
        let mut n = 0;
        for row in 0..grid.height() {
            for cell in grid.row(row) {
                if cell.paint == paint {
                    n += 1;
                }
            }
        }
        n
    }

    #[test]
    fn test_rebuild_only_when_needed() {
        let geometry = cross_geometry();
        let mut viewport = Viewport::new(geometry.bounds);
        let mut layer = StaticLayer::new();

        let first = layer.grid(&geometry, &mut viewport, 40, 20);
        let second = layer.grid(&geometry, &mut viewport, 40, 20);
        assert_eq!(layer.rebuilds(), 1);
        assert_eq!(first, second);

        viewport.pan(0.25, 0.0);
        let third = layer.grid(&geometry, &mut viewport, 40, 20);
        assert_eq!(layer.rebuilds(), 2);
        assert_ne!(second, third);
    }

    #[test]
    fn test_dimension_change_invalidates() {
        let geometry = cross_geometry();
        let mut viewport = Viewport::new(geometry.bounds);
        let mut layer = StaticLayer::new();

        layer.grid(&geometry, &mut viewport, 40, 20);
        let resized = layer.grid(&geometry, &mut viewport, 60, 20);
        assert_eq!(layer.rebuilds(), 2);
        assert_eq!(resized.width(), 60);
    }

    #[test]
    fn test_handed_out_grid_is_a_copy() {
        let geometry = cross_geometry();
        let mut viewport = Viewport::new(geometry.bounds);
        let mut layer = StaticLayer::new();

        let mut grid = layer.grid(&geometry, &mut viewport, 40, 20);
        for row in 0..grid.height() {
            for col in 0..grid.width() {
                grid.set(
                    col as i64,
                    row as i64,
                    Cell {
                        glyph: 'X',
                        paint: Paint::Label,
                    },
                );
            }
        }
        let fresh = layer.grid(&geometry, &mut viewport, 40, 20);
        assert_eq!(layer.rebuilds(), 1);
        assert!(count_paint(&fresh, Paint::Label) == 0);
        assert!(count_paint(&fresh, Paint::Map) > 0);
    }

    #[test]
    fn test_offscreen_polygon_is_culled() {
        let geometry = cross_geometry();
        let mut viewport = Viewport::new(geometry.bounds);
        // Pan far away from the data region
        for _ in 0..10 {
            viewport.pan(1.0, 0.0);
        }
        let mut layer = StaticLayer::new();
        let grid = layer.grid(&geometry, &mut viewport, 40, 20);
        assert_eq!(count_paint(&grid, Paint::Map), 0);
    }

    #[test]
    fn test_airport_overwrites_map_glyph() {
        // Airport sits exactly on the outline
        let geometry = GeometrySource::new(
            vec![PolyShape::new(vec![(0.0, 0.0); 6])],
            vec![GeoPoint { x: 0.0, y: 0.0 }],
        );
        let mut viewport = Viewport::new(GeoRect::new(-10.0, -10.0, 10.0, 10.0));
        let mut layer = StaticLayer::new();
        let grid = layer.grid(&geometry, &mut viewport, 20, 20);
        assert_eq!(count_paint(&grid, Paint::Airport), 1);
        assert_eq!(count_paint(&grid, Paint::Map), 0);
    }

    #[test]
    fn test_empty_geometry_renders_blank() {
        let geometry = GeometrySource::new(vec![], vec![]);
        let mut viewport = Viewport::new(GeoRect::new(-10.0, -10.0, 10.0, 10.0));
        let mut layer = StaticLayer::new();
        let grid = layer.grid(&geometry, &mut viewport, 10, 10);
        assert_eq!(count_paint(&grid, Paint::Blank), 100);
    }
}
