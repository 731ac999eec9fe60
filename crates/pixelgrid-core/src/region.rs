//! Visible-region calculation.
//!
//! Derives the lattice-aligned world rectangle covered by the viewport from
//! the camera state. Cheap enough to recompute every frame; never cached.

use crate::camera::CameraState;
use crate::config::BASE_CELL_SIZE;

/// Axis-aligned world-space rectangle currently visible.
///
/// `start_x`/`start_y` are snapped down to the cell lattice and the end edges
/// carry one extra cell of overscan, so geometry never clips at the viewport
/// edge during fractional-cell scroll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleRegion {
    pub start_x: f64,
    pub start_y: f64,
    pub end_x: f64,
    pub end_y: f64,
}

impl VisibleRegion {
    /// Compute the visible region for a camera and a viewport size in pixels.
    pub fn compute(camera: &CameraState, viewport_width: f64, viewport_height: f64) -> Self {
        let visible_width = viewport_width / camera.scale;
        let visible_height = viewport_height / camera.scale;

        let start_x = (camera.offset_x / BASE_CELL_SIZE).floor() * BASE_CELL_SIZE;
        let start_y = (camera.offset_y / BASE_CELL_SIZE).floor() * BASE_CELL_SIZE;

        Self {
            start_x,
            start_y,
            end_x: start_x + visible_width + BASE_CELL_SIZE,
            end_y: start_y + visible_height + BASE_CELL_SIZE,
        }
    }

    pub fn width(&self) -> f64 {
        self.end_x - self.start_x
    }

    pub fn height(&self) -> f64 {
        self.end_y - self.start_y
    }

    /// Inclusive lattice-coordinate range of cells intersecting this region.
    pub fn cell_range(&self) -> (i64, i64, i64, i64) {
        (
            (self.start_x / BASE_CELL_SIZE).floor() as i64,
            (self.start_y / BASE_CELL_SIZE).floor() as i64,
            ((self.end_x / BASE_CELL_SIZE).ceil() as i64) - 1,
            ((self.end_y / BASE_CELL_SIZE).ceil() as i64) - 1,
        )
    }

    /// Whether the cell at lattice coordinates `(x, y)` intersects the region.
    pub fn contains_cell(&self, x: i64, y: i64) -> bool {
        let min_x = x as f64 * BASE_CELL_SIZE;
        let min_y = y as f64 * BASE_CELL_SIZE;
        min_x + BASE_CELL_SIZE > self.start_x
            && min_x < self.end_x
            && min_y + BASE_CELL_SIZE > self.start_y
            && min_y < self.end_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_camera_scenario() {
        // scale=1, offset=(0,0), viewport 500x500, cell 50
        let region = VisibleRegion::compute(&CameraState::default(), 500.0, 500.0);
        assert_eq!(region.start_x, 0.0);
        assert_eq!(region.start_y, 0.0);
        assert_eq!(region.end_x, 550.0);
        assert_eq!(region.end_y, 550.0);
    }

    #[test]
    fn start_snaps_to_lattice_below_offset() {
        let cam = CameraState::new(130.0, 260.0, 1.0);
        let region = VisibleRegion::compute(&cam, 500.0, 400.0);
        assert_eq!(region.start_x, 100.0);
        assert_eq!(region.start_y, 250.0);
        assert!(region.start_x <= cam.offset_x);
        assert!(region.start_y <= cam.offset_y);
    }

    #[test]
    fn covers_viewport_with_overscan() {
        let cam = CameraState::new(333.3, 77.7, 0.4);
        let (w, h) = (800.0, 600.0);
        let region = VisibleRegion::compute(&cam, w, h);
        assert!(region.start_x <= cam.offset_x);
        assert!(region.end_x >= region.start_x + w / cam.scale);
        assert!(region.start_y <= cam.offset_y);
        assert!(region.end_y >= region.start_y + h / cam.scale);
    }

    #[test]
    fn zoom_out_widens_region() {
        let near = VisibleRegion::compute(&CameraState::new(0.0, 0.0, 2.0), 500.0, 500.0);
        let far = VisibleRegion::compute(&CameraState::new(0.0, 0.0, 0.5), 500.0, 500.0);
        assert!(far.width() > near.width());
        assert!(far.height() > near.height());
    }

    #[test]
    fn cell_range_matches_contains() {
        let cam = CameraState::new(120.0, 40.0, 1.0);
        let region = VisibleRegion::compute(&cam, 300.0, 300.0);
        let (x0, y0, x1, y1) = region.cell_range();
        assert!(region.contains_cell(x0, y0));
        assert!(region.contains_cell(x1, y1));
        assert!(!region.contains_cell(x0 - 1, y0));
        assert!(!region.contains_cell(x1 + 1, y1));
    }
}
