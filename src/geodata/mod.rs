//! Static vector geometry for the basemap
//!
//! Holds the polygon and point collections the renderer rasterizes. All
//! geometry is loaded once at startup and never mutated afterwards; the
//! render core only sees these plain types, never the on-disk format.

mod loader;

pub use loader::{load_airports, load_basemap, GeoDataError};

/// Axis-aligned geographic rectangle in lon/lat degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoRect {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl GeoRect {
    /// Inverted sentinel rect that any real point expands.
    pub const fn empty() -> Self {
        Self {
            min_x: 1e9,
            min_y: 1e9,
            max_x: -1e9,
            max_y: -1e9,
        }
    }

    pub const fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Grow the rect to cover a point.
    pub fn expand(&mut self, x: f64, y: f64) {
        if x < self.min_x {
            self.min_x = x;
        }
        if x > self.max_x {
            self.max_x = x;
        }
        if y < self.min_y {
            self.min_y = y;
        }
        if y > self.max_y {
            self.max_y = y;
        }
    }

    /// Axis-aligned overlap test.
    pub fn intersects(&self, other: &GeoRect) -> bool {
        !(self.max_x < other.min_x
            || self.min_x > other.max_x
            || self.max_y < other.min_y
            || self.min_y > other.max_y)
    }
}

/// A single airport (or other point feature) location.
#[derive(Debug, Clone, Copy)]
pub struct GeoPoint {
    pub x: f64,
    pub y: f64,
}

/// Boundary/coastline outline: an ordered vertex run plus its bounding rect.
#[derive(Debug, Clone)]
pub struct PolyShape {
    pub vertices: Vec<(f64, f64)>,
    pub bounds: GeoRect,
}

impl PolyShape {
    pub fn new(vertices: Vec<(f64, f64)>) -> Self {
        let mut bounds = GeoRect::empty();
        for &(x, y) in &vertices {
            bounds.expand(x, y);
        }
        Self { vertices, bounds }
    }
}

/// Everything the renderer needs: outlines, airports, and the union bounds
/// of all outline vertices (the full-extent zoom-out limit).
#[derive(Debug, Clone)]
pub struct GeometrySource {
    pub polygons: Vec<PolyShape>,
    pub airports: Vec<GeoPoint>,
    pub bounds: GeoRect,
}

impl GeometrySource {
    pub fn new(polygons: Vec<PolyShape>, airports: Vec<GeoPoint>) -> Self {
        let mut bounds = GeoRect::empty();
        for poly in &polygons {
            for &(x, y) in &poly.vertices {
                bounds.expand(x, y);
            }
        }
        // With no outlines at all, fall back to the whole world so the
        // viewport still has a sane full extent.
        if bounds.min_x > bounds.max_x {
            bounds = GeoRect::new(-180.0, -90.0, 180.0, 90.0);
        }
        Self {
            polygons,
            airports,
            bounds,
        }
    }
}
