//! Geometry generation for the visible region.
//!
//! Both generators are pure: they read the region (and the cell field) and
//! produce fresh primitive lists every frame. Nothing is diffed or cached;
//! at these sizes regeneration is cheaper than bookkeeping.

use crate::cells::CellField;
use crate::color::Color;
use crate::config::{BASE_CELL_SIZE, BUFFER_RATIO, MIN_SCALE};
use crate::region::VisibleRegion;
use glam::Vec2;

/// A grid line segment in world coordinates, line-list topology.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub start: Vec2,
    pub end: Vec2,
}

impl LineSegment {
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }
}

/// Generate grid lines on every lattice boundary inside `region`.
///
/// Verticals first, then horizontals, each spanning the full region extent.
pub fn grid_lines(region: &VisibleRegion) -> Vec<LineSegment> {
    let vertical = ((region.end_x - region.start_x) / BASE_CELL_SIZE).floor() as usize + 1;
    let horizontal = ((region.end_y - region.start_y) / BASE_CELL_SIZE).floor() as usize + 1;
    let mut lines = Vec::with_capacity(vertical + horizontal);

    let mut x = region.start_x;
    while x <= region.end_x {
        lines.push(LineSegment::new(
            Vec2::new(x as f32, region.start_y as f32),
            Vec2::new(x as f32, region.end_y as f32),
        ));
        x += BASE_CELL_SIZE;
    }

    let mut y = region.start_y;
    while y <= region.end_y {
        lines.push(LineSegment::new(
            Vec2::new(region.start_x as f32, y as f32),
            Vec2::new(region.end_x as f32, y as f32),
        ));
        y += BASE_CELL_SIZE;
    }

    lines
}

/// Brightness modifier for the grid color uniform.
///
/// Near the minimum zoom the lattice is dense enough to shimmer, so the
/// grid dims to half brightness instead.
pub fn grid_brightness(scale: f64) -> f32 {
    if scale > MIN_SCALE * BUFFER_RATIO { 1.0 } else { 0.5 }
}

/// One cell quad in world coordinates with its fill color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellQuad {
    pub min: Vec2,
    pub max: Vec2,
    pub color: Color,
}

impl CellQuad {
    /// Corner positions in triangle-strip order:
    /// (min,min), (max,min), (min,max), (max,max).
    pub fn corners(&self) -> [Vec2; 4] {
        [
            Vec2::new(self.min.x, self.min.y),
            Vec2::new(self.max.x, self.min.y),
            Vec2::new(self.min.x, self.max.y),
            Vec2::new(self.max.x, self.max.y),
        ]
    }

    /// Per-vertex colors; the cell color repeated for each corner.
    pub fn vertex_colors(&self) -> [Color; 4] {
        [self.color; 4]
    }
}

/// Generate one quad per cell intersecting `region`.
pub fn cell_quads(field: &CellField, region: &VisibleRegion) -> Vec<CellQuad> {
    field
        .cells_in(region)
        .map(|cell| {
            let min_x = cell.x as f64 * BASE_CELL_SIZE;
            let min_y = cell.y as f64 * BASE_CELL_SIZE;
            CellQuad {
                min: Vec2::new(min_x as f32, min_y as f32),
                max: Vec2::new(
                    (min_x + BASE_CELL_SIZE) as f32,
                    (min_y + BASE_CELL_SIZE) as f32,
                ),
                color: cell.color,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::CameraState;
    use crate::cells::PixelCell;

    fn identity_region() -> VisibleRegion {
        VisibleRegion::compute(&CameraState::default(), 500.0, 500.0)
    }

    #[test]
    fn grid_line_counts_for_identity_scenario() {
        // Region (0,0)-(550,550): 12 verticals + 12 horizontals.
        let lines = grid_lines(&identity_region());
        assert_eq!(lines.len(), 24);

        let verticals = lines.iter().filter(|l| l.start.x == l.end.x).count();
        let horizontals = lines.iter().filter(|l| l.start.y == l.end.y).count();
        assert_eq!(verticals, 12);
        assert_eq!(horizontals, 12);
    }

    #[test]
    fn grid_lines_span_full_region() {
        let region = identity_region();
        for line in grid_lines(&region) {
            if line.start.x == line.end.x {
                assert_eq!(line.start.y, region.start_y as f32);
                assert_eq!(line.end.y, region.end_y as f32);
            } else {
                assert_eq!(line.start.x, region.start_x as f32);
                assert_eq!(line.end.x, region.end_x as f32);
            }
        }
    }

    #[test]
    fn grid_line_count_matches_formula() {
        let cam = CameraState::new(275.0, 130.0, 0.5);
        let region = VisibleRegion::compute(&cam, 640.0, 480.0);
        let lines = grid_lines(&region);
        let expected_v = ((region.end_x - region.start_x) / BASE_CELL_SIZE).floor() as usize + 1;
        let expected_h = ((region.end_y - region.start_y) / BASE_CELL_SIZE).floor() as usize + 1;
        assert_eq!(lines.len(), expected_v + expected_h);
    }

    #[test]
    fn brightness_dims_near_min_scale() {
        assert_eq!(grid_brightness(1.0), 1.0);
        assert_eq!(grid_brightness(MIN_SCALE * BUFFER_RATIO + 0.001), 1.0);
        assert_eq!(grid_brightness(MIN_SCALE * BUFFER_RATIO), 0.5);
        assert_eq!(grid_brightness(MIN_SCALE), 0.5);
    }

    #[test]
    fn quad_corners_are_strip_ordered() {
        let quad = CellQuad {
            min: Vec2::new(100.0, 150.0),
            max: Vec2::new(150.0, 200.0),
            color: Color::WHITE,
        };
        let corners = quad.corners();
        assert_eq!(corners[0], Vec2::new(100.0, 150.0));
        assert_eq!(corners[1], Vec2::new(150.0, 150.0));
        assert_eq!(corners[2], Vec2::new(100.0, 200.0));
        assert_eq!(corners[3], Vec2::new(150.0, 200.0));
        assert_eq!(quad.vertex_colors(), [Color::WHITE; 4]);
    }

    #[test]
    fn cell_quads_positions_match_lattice() {
        let mut field = CellField::new();
        field.replace([PixelCell::new(2, 3, Color::BLACK)]);
        let quads = cell_quads(&field, &identity_region());
        assert_eq!(quads.len(), 1);
        assert_eq!(quads[0].min, Vec2::new(100.0, 150.0));
        assert_eq!(quads[0].max, Vec2::new(150.0, 200.0));
    }

    #[test]
    fn vertex_count_is_four_per_included_cell() {
        // 1000 pseudo-random cells in [0, 100) on both axes.
        let mut state = 0x9e3779b97f4a7c15u64;
        let mut cells = Vec::with_capacity(1000);
        for _ in 0..1000 {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            cells.push(PixelCell::new(
                (state % 100) as i64,
                ((state >> 32) % 100) as i64,
                Color::WHITE,
            ));
        }
        let mut field = CellField::new();
        field.replace(cells);

        let region = identity_region();
        let quads = cell_quads(&field, &region);
        let included = field.cells_in(&region).count();
        assert_eq!(quads.len(), included);

        let vertex_count: usize = quads.iter().map(|q| q.corners().len()).sum();
        assert_eq!(vertex_count, 4 * included);
    }
}
