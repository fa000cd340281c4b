//! Geographic to grid-cell projection
//!
//! A simple linear rectangle mapping, not a cartographic projection. Pure:
//! callers clip the result, the projector never does.

use crate::geodata::GeoRect;

/// Terminal cells are taller than wide; dividing the column by this keeps
/// the output visually square. Applied to the horizontal axis only.
pub const CHAR_ASPECT: f64 = 1.9;

/// Nudge applied to a degenerate (zero-extent) axis before dividing.
const DEGENERATE_EPSILON: f64 = 1e-6;

/// Map a lon/lat position into `(col, row)` for a `width x height` grid.
/// Row 0 is the north edge. The result may fall outside the grid.
pub fn project(lon: f64, lat: f64, view: &GeoRect, width: usize, height: usize) -> (i64, i64) {
    let mut view = *view;
    if view.max_x == view.min_x {
        view.max_x += DEGENERATE_EPSILON;
    }
    if view.max_y == view.min_y {
        view.max_y += DEGENERATE_EPSILON;
    }

    let nx = (lon - view.min_x) / (view.max_x - view.min_x);
    let ny = (view.max_y - lat) / (view.max_y - view.min_y);

    let col = (nx * width as f64 / CHAR_ASPECT).floor() as i64;
    let row = (ny * height as f64).floor() as i64;
    (col, row)
}
