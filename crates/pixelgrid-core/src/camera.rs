//! Continuous pan/zoom camera state for the infinite canvas.
//!
//! The camera is a plain value owned by the active viewport and passed
//! explicitly to the region calculator and the render pipeline. All
//! mutation goes through [`CameraState::pan_by`] and [`CameraState::zoom_at`],
//! which keep the invariants:
//!
//! - `MIN_SCALE <= scale <= MAX_SCALE`
//! - `offset_x >= 0`, `offset_y >= 0` (the lattice has an origin boundary;
//!   nothing exists at negative world coordinates)
//!
//! `offset` is the world coordinate under the viewport's top-left corner;
//! `scale` is screen pixels per world unit.

use crate::config::{MAX_SCALE, MIN_SCALE};
use serde::{Deserialize, Serialize};

/// Camera state: world offset of the viewport origin plus zoom scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraState {
    pub offset_x: f64,
    pub offset_y: f64,
    pub scale: f64,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            scale: 1.0,
        }
    }
}

impl CameraState {
    pub fn new(offset_x: f64, offset_y: f64, scale: f64) -> Self {
        Self {
            offset_x: offset_x.max(0.0),
            offset_y: offset_y.max(0.0),
            scale: scale.clamp(MIN_SCALE, MAX_SCALE),
        }
    }

    /// World coordinate currently under the given canvas-local pixel.
    pub fn world_at(&self, canvas_x: f64, canvas_y: f64) -> (f64, f64) {
        (
            self.offset_x + canvas_x / self.scale,
            self.offset_y + canvas_y / self.scale,
        )
    }

    /// Pan by a delta in canvas pixels.
    ///
    /// The delta is divided by the current scale so panning speed tracks the
    /// screen, not the world. Offsets clamp at the origin boundary.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.offset_x = (self.offset_x + dx / self.scale).max(0.0);
        self.offset_y = (self.offset_y + dy / self.scale).max(0.0);
    }

    /// Zoom toward the canvas-local point `(canvas_x, canvas_y)`.
    ///
    /// The world point under the cursor stays under the cursor, except where
    /// clamping of the scale bounds or the origin boundary forces deviation.
    /// A `delta_factor` that would push the scale outside
    /// `[MIN_SCALE, MAX_SCALE]` is clamped, not rejected.
    pub fn zoom_at(&mut self, canvas_x: f64, canvas_y: f64, delta_factor: f64) {
        let (world_x, world_y) = self.world_at(canvas_x, canvas_y);
        let new_scale = (self.scale * (1.0 + delta_factor)).clamp(MIN_SCALE, MAX_SCALE);

        // Commit all three fields together so no intermediate state is
        // observable.
        self.offset_x = (world_x - canvas_x / new_scale).max(0.0);
        self.offset_y = (world_y - canvas_y / new_scale).max(0.0);
        self.scale = new_scale;
    }
}
