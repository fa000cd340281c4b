//! Viewport state machine: pan, zoom, reset, recenter
//!
//! Owns the currently visible geographic rectangle and the full-extent
//! rectangle it can never zoom out beyond. Every mutation marks the view
//! dirty so the static layer knows to re-rasterize.

use crate::geodata::GeoRect;

/// Auto-center zoom: new extent = original extent / this multiplier.
pub const RECENTER_ZOOM_MULT: f64 = 25.5;

#[derive(Debug, Clone)]
pub struct Viewport {
    original: GeoRect,
    view: GeoRect,
    dirty: bool,
}

impl Viewport {
    pub fn new(original: GeoRect) -> Self {
        Self {
            original,
            view: original,
            dirty: true,
        }
    }

    pub fn view(&self) -> &GeoRect {
        &self.view
    }

    pub fn original(&self) -> &GeoRect {
        &self.original
    }

    /// Shift the view by fractions of its current extent. Travel past the
    /// original extent is allowed; empty space simply renders blank.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        let shift_x = self.view.width() * dx;
        let shift_y = self.view.height() * dy;

        self.view.min_x += shift_x;
        self.view.max_x += shift_x;
        self.view.min_y += shift_y;
        self.view.max_y += shift_y;
        self.dirty = true;
    }

    /// Scale the view about its center. Factor < 1 zooms in, > 1 zooms
    /// out. A zoom that would exceed the original extent on either axis
    /// snaps back to the full extent instead.
    pub fn zoom(&mut self, factor: f64) {
        let (center_x, center_y) = self.view.center();
        let new_width = self.view.width() * factor;
        let new_height = self.view.height() * factor;

        if new_width > self.original.width() || new_height > self.original.height() {
            self.view = self.original;
            self.dirty = true;
            return;
        }

        self.view.min_x = center_x - new_width / 2.0;
        self.view.max_x = center_x + new_width / 2.0;
        self.view.min_y = center_y - new_height / 2.0;
        self.view.max_y = center_y + new_height / 2.0;
        self.dirty = true;
    }

    /// Snap back to the full extent.
    pub fn reset(&mut self) {
        self.view = self.original;
        self.dirty = true;
    }

    /// Center the view on a position at `zoom_mult` times the original
    /// extent, keeping the original geographic aspect ratio.
    pub fn recenter(&mut self, lat: f64, lon: f64, zoom_mult: f64) {
        let orig_width = self.original.width();
        let orig_height = self.original.height();
        let aspect = if orig_height != 0.0 {
            orig_width / orig_height
        } else {
            1.0
        };

        let new_width = if zoom_mult != 0.0 {
            orig_width / zoom_mult
        } else {
            orig_width
        };
        let new_height = if aspect != 0.0 {
            new_width / aspect
        } else {
            new_width
        };

        self.view.min_x = lon - new_width / 2.0;
        self.view.max_x = lon + new_width / 2.0;
        self.view.min_y = lat - new_height / 2.0;
        self.view.max_y = lat + new_height / 2.0;
        self.dirty = true;
    }

    /// Magnification relative to the full extent, measured on the X axis.
    pub fn zoom_level(&self) -> f64 {
        if self.view.width() == 0.0 {
            return 1.0;
        }
        self.original.width() / self.view.width()
    }

    /// Consume the dirty flag. Returns true if any mutation happened since
    /// the last call.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}
